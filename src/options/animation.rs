use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Idle Motion", inline)]
#[serde(default)]
/// Idle bob applied to every tile.
pub struct AnimationOptions {
    /// Angular speed of the bob, radians per second.
    #[schemars(title = "Bob Speed", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub bob_speed: f32,
    /// Peak vertical displacement of the bob.
    #[schemars(title = "Bob Height", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub bob_amplitude: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            bob_speed: 0.5,
            bob_amplitude: 0.2,
        }
    }
}
