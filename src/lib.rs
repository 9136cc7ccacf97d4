//! Portfolio page rendering: project cards with a pointer tilt, a scroll
//! indicator and a footer year, over any [`dom::RenderTarget`].

pub mod dom;
pub mod error;
pub mod page;
pub mod render;
pub mod server;
pub mod site;
pub mod tilt;
pub mod types;
