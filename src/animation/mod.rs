//! Per-frame motion: idle bob, hover lift, rotation tweens, continuous
//! spin, and the ambient star field.

pub mod driver;
pub mod easing;
pub mod stars;
pub mod tween;

pub use driver::AnimationDriver;
pub use easing::EasingFunction;
pub use stars::StarField;
pub use tween::RotationTween;
