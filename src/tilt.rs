//! Pointer-driven 3D tilt for project cards.
//!
//! A card is either at rest or tilted toward the pointer. The state is never
//! stored apart from the card: each transition rewrites the card's
//! `transform` style.

use std::fmt;

use crate::dom::{NodeId, Rect, RenderTarget};

/// Pointer offset in pixels per degree of rotation.
pub const SENSITIVITY: f64 = 10.0;
pub const PERSPECTIVE_PX: f64 = 1000.0;
pub const HOVER_SCALE: f64 = 1.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TiltState {
    Idle,
    Tilted { rotate_x: f64, rotate_y: f64 },
}

impl TiltState {
    /// Tilt for a pointer at client coordinates over a card with bounding box `rect`.
    ///
    /// Vertical offset from the center drives the X rotation; horizontal offset
    /// drives the Y rotation with its sign flipped.
    pub fn toward(rect: Rect, client_x: f64, client_y: f64) -> Self {
        let x = client_x - rect.left;
        let y = client_y - rect.top;
        let center_x = rect.width / 2.0;
        let center_y = rect.height / 2.0;

        TiltState::Tilted {
            rotate_x: normalize_zero((y - center_y) / SENSITIVITY),
            rotate_y: normalize_zero(-(x - center_x) / SENSITIVITY),
        }
    }

    pub fn rotation(&self) -> (f64, f64) {
        match self {
            TiltState::Idle => (0.0, 0.0),
            TiltState::Tilted { rotate_x, rotate_y } => (*rotate_x, *rotate_y),
        }
    }

    pub fn scale(&self) -> f64 {
        match self {
            TiltState::Idle => 1.0,
            TiltState::Tilted { .. } => HOVER_SCALE,
        }
    }
}

impl fmt::Display for TiltState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiltState::Idle => write!(
                f,
                "perspective({}px) rotateX(0) rotateY(0) scale3d(1, 1, 1)",
                PERSPECTIVE_PX
            ),
            TiltState::Tilted { rotate_x, rotate_y } => write!(
                f,
                "perspective({}px) rotateX({}deg) rotateY({}deg) scale3d({s}, {s}, {s})",
                PERSPECTIVE_PX,
                rotate_x,
                rotate_y,
                s = HOVER_SCALE
            ),
        }
    }
}

/// Pointer moved over `card`: tilt toward the pointer.
pub fn handle_tilt<T: RenderTarget + ?Sized>(
    target: &mut T,
    card: NodeId,
    client_x: f64,
    client_y: f64,
) -> TiltState {
    let rect = target.bounding_client_rect(card);
    let state = TiltState::toward(rect, client_x, client_y);
    target.set_style(card, "transform", &state.to_string());
    state
}

/// Pointer left `card`: back to rest.
pub fn reset_tilt<T: RenderTarget + ?Sized>(target: &mut T, card: NodeId) -> TiltState {
    let state = TiltState::Idle;
    target.set_style(card, "transform", &state.to_string());
    state
}

// -0.0 would print as "-0".
fn normalize_zero(value: f64) -> f64 {
    value + 0.0
}
