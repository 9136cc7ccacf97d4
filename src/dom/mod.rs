//! The document surface the page is rendered into.
//!
//! Anything that can look elements up, build new ones, and deliver pointer
//! events can host the page; [`Document`] is the in-memory host used by the
//! server and the tests.

mod document;

pub(crate) use document::escape_text;
pub use document::Document;

use crate::tilt::{handle_tilt, reset_tilt};

/// Handle to an element owned by a [`RenderTarget`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Bounding box in client coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Rect {
            left,
            top,
            width,
            height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    PointerMove,
    PointerLeave,
    Click,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    PointerMove { client_x: f64, client_y: f64 },
    PointerLeave,
    Click,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::PointerMove { .. } => EventKind::PointerMove,
            Event::PointerLeave => EventKind::PointerLeave,
            Event::Click => EventKind::Click,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollToOptions {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// What an element does when one of its events fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Listener {
    Tilt,
    ResetTilt,
    ScrollPastViewport,
}

impl Listener {
    pub fn handle<T: RenderTarget + ?Sized>(&self, target: &mut T, current: NodeId, event: &Event) {
        match (self, event) {
            (Listener::Tilt, Event::PointerMove { client_x, client_y }) => {
                handle_tilt(target, current, *client_x, *client_y);
            }
            (Listener::ResetTilt, _) => {
                reset_tilt(target, current);
            }
            (Listener::ScrollPastViewport, _) => scroll_past_viewport(target),
            // A tilt needs pointer coordinates.
            (Listener::Tilt, _) => {}
        }
    }
}

/// Smoothly scrolls one full viewport down, past the hero section.
pub fn scroll_past_viewport<T: RenderTarget + ?Sized>(target: &mut T) {
    let top = target.inner_height();
    target.scroll_to(ScrollToOptions {
        top,
        behavior: ScrollBehavior::Smooth,
    });
}

pub trait RenderTarget {
    /// First connected element matching `.class`, `#id` or a tag name.
    fn query_selector(&self, selector: &str) -> Option<NodeId>;

    fn get_element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Creates a detached element; it becomes queryable once appended.
    fn create_element(&mut self, tag: &str) -> NodeId;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn set_class_name(&mut self, node: NodeId, class_name: &str) {
        self.set_attribute(node, "class", class_name);
    }

    /// Replaces all children of `node` with a single text run.
    fn set_text_content(&mut self, node: NodeId, text: &str);

    /// Moves `child` to the end of `parent`. Appending an element into itself
    /// or into one of its own descendants is refused and leaves the tree as is.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    fn style(&self, node: NodeId, property: &str) -> Option<String>;

    fn bounding_client_rect(&self, node: NodeId) -> Rect;

    fn add_event_listener(&mut self, node: NodeId, kind: EventKind, listener: Listener);

    fn inner_height(&self) -> f64;

    fn scroll_to(&mut self, options: ScrollToOptions);
}
