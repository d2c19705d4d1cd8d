//! Input handling: platform-agnostic pointer events and viewport
//! normalization.

/// Platform-agnostic input events.
pub mod event;
/// Pixel → normalized device coordinate conversion.
pub mod pointer;

pub use event::{InputEvent, PointerSource};
pub use pointer::Viewport;
