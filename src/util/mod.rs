//! Shared utilities: frame timing.

pub mod frame_timing;

pub use frame_timing::{FrameClock, FrameTick};
