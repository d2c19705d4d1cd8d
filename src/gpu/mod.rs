//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization and dynamic buffer
//! management.

/// Per-frame vertex and instance buffers.
pub mod dynamic_buffer;
/// wgpu device, surface, and queue initialization.
pub mod render_context;

pub use render_context::{RenderContext, RenderContextError};
