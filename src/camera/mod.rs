//! Camera for viewing the tile grid.
//!
//! A fixed perspective camera that tracks the viewport aspect.

/// Camera controller sized to the viewport.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
