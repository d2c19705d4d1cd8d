//! Rotation tween about the vertical axis.

use super::easing::EasingFunction;

/// Eases a tile's `rotation_y` from one angle to another.
///
/// Times are seconds on the engine clock. A tween is sampled, never
/// stepped, so sampling the same instant twice yields the same angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTween {
    from: f32,
    to: f32,
    start: f32,
    duration: f32,
    easing: EasingFunction,
}

impl RotationTween {
    /// Tween from `from` to `to` radians, starting at `start` seconds and
    /// lasting `duration` seconds.
    #[must_use]
    pub fn new(
        from: f32,
        to: f32,
        start: f32,
        duration: f32,
        easing: EasingFunction,
    ) -> Self {
        Self {
            from,
            to,
            start,
            duration: duration.max(0.0),
            easing,
        }
    }

    /// Target angle in radians.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Normalized progress (0.0 to 1.0) at time `now`.
    #[must_use]
    pub fn progress(&self, now: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    /// Interpolated angle at time `now`.
    #[must_use]
    pub fn sample(&self, now: f32) -> f32 {
        let eased = self.easing.evaluate(self.progress(now));
        self.from + (self.to - self.from) * eased
    }

    /// Whether the tween has reached its target.
    #[must_use]
    pub fn is_finished(&self, now: f32) -> bool {
        self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    #[test]
    fn samples_endpoints_and_clamps() {
        let tween = RotationTween::new(0.0, PI, 1.0, 0.6, EasingFunction::CubicOut);
        assert_eq!(tween.sample(0.0), 0.0);
        assert_eq!(tween.sample(1.0), 0.0);
        assert!((tween.sample(1.6) - PI).abs() < 1e-6);
        assert!((tween.sample(10.0) - PI).abs() < 1e-6);
        assert!(!tween.is_finished(1.3));
        assert!(tween.is_finished(1.6));
    }

    #[test]
    fn reverse_tween_starts_from_given_angle() {
        let tween = RotationTween::new(2.0, 0.0, 0.0, 1.0, EasingFunction::Linear);
        assert!((tween.sample(0.25) - 1.5).abs() < 1e-6);
        assert_eq!(tween.target(), 0.0);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let tween = RotationTween::new(0.0, 1.0, 5.0, 0.0, EasingFunction::Linear);
        assert!(tween.is_finished(5.0));
        assert_eq!(tween.sample(5.0), 1.0);
    }
}
