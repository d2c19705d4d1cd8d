//! Easing curves for rotation tweens.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Maps linear tween progress to eased progress. Both ends are fixed:
/// every curve maps 0 to 0 and 1 to 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Constant speed.
    Linear,
    /// `1 - (1 - t)²`.
    QuadOut,
    /// `1 - (1 - t)³`: quick start, long settle.
    #[default]
    CubicOut,
    /// Half a cosine wave: slow at both ends.
    SineInOut,
}

impl EasingFunction {
    /// Curve used by hover tweens unless configured otherwise.
    pub const DEFAULT: Self = Self::CubicOut;

    /// Eased progress at `t`, which is clamped to `[0, 1]` first.
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let rest = 1.0 - t;
        match self {
            Self::Linear => t,
            Self::QuadOut => 1.0 - rest * rest,
            Self::CubicOut => 1.0 - rest * rest * rest,
            Self::SineInOut => 0.5 - 0.5 * (t * std::f32::consts::PI).cos(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingFunction; 4] = [
        EasingFunction::Linear,
        EasingFunction::QuadOut,
        EasingFunction::CubicOut,
        EasingFunction::SineInOut,
    ];

    #[test]
    fn every_curve_pins_its_endpoints() {
        for ease in ALL {
            assert!(ease.evaluate(0.0).abs() < 1e-6, "{ease:?}");
            assert!((ease.evaluate(1.0) - 1.0).abs() < 1e-6, "{ease:?}");
            assert!(ease.evaluate(-3.0).abs() < 1e-6, "{ease:?}");
            assert!((ease.evaluate(7.0) - 1.0).abs() < 1e-6, "{ease:?}");
        }
    }

    #[test]
    fn cubic_out_front_loads_the_motion() {
        assert!((EasingFunction::CubicOut.evaluate(0.5) - 0.875).abs() < 1e-6);
        assert!((EasingFunction::QuadOut.evaluate(0.5) - 0.75).abs() < 1e-6);
        assert!((EasingFunction::SineInOut.evaluate(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn default_is_cubic_out() {
        assert_eq!(EasingFunction::default(), EasingFunction::DEFAULT);
    }
}
