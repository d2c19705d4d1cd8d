use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::EasingFunction;

/// How a tile reacts to the pointer entering and leaving it.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum HoverFeedback {
    /// Ease the tile to a half turn on enter and back to rest on exit.
    #[default]
    Tween,
    /// Spin continuously while hovered; snap back to rest on exit.
    Spin,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Hover", inline)]
#[serde(default)]
/// Hover feedback parameters.
pub struct HoverOptions {
    /// Rotation strategy used for enter/exit feedback.
    #[schemars(title = "Feedback")]
    pub feedback: HoverFeedback,
    /// Duration of an enter or exit tween, in seconds.
    #[schemars(title = "Tween Duration", range(min = 0.05, max = 3.0), extend("step" = 0.05))]
    pub tween_secs: f32,
    /// Curve applied to enter and exit tweens.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
    /// Rotation reached by the enter tween, in degrees.
    #[schemars(skip)]
    pub tween_degrees: f32,
    /// Extra height added while a tile is hovered (0 disables).
    #[schemars(title = "Lift", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub lift: f32,
    /// Spin increment per frame in spin mode, radians.
    #[schemars(title = "Spin Rate", range(min = 0.0, max = 0.3), extend("step" = 0.005))]
    pub spin_per_frame: f32,
}

impl Default for HoverOptions {
    fn default() -> Self {
        Self {
            feedback: HoverFeedback::Tween,
            tween_secs: 0.6,
            easing: EasingFunction::DEFAULT,
            tween_degrees: 180.0,
            lift: 0.5,
            spin_per_frame: 0.05,
        }
    }
}
