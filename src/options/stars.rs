use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Stars", inline)]
#[serde(default)]
/// Background star field with pointer parallax.
pub struct StarOptions {
    /// Whether the star field is generated and drawn.
    #[schemars(title = "Show Stars")]
    pub enabled: bool,
    /// Number of stars.
    #[schemars(skip)]
    pub count: u32,
    /// Stars are scattered in a shell between these radii.
    #[schemars(skip)]
    pub inner_radius: f32,
    /// Outer radius of the star shell.
    #[schemars(skip)]
    pub outer_radius: f32,
    /// Continuous rotation about the vertical axis, radians per second.
    #[schemars(title = "Drift", range(min = 0.0, max = 0.2), extend("step" = 0.005))]
    pub rotation_speed: f32,
    /// Scale of the pointer-driven parallax offset.
    #[schemars(title = "Parallax", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub parallax_factor: f32,
    /// Fraction of the remaining parallax distance covered per frame.
    #[schemars(skip)]
    pub smoothing: f32,
    /// Seed for star placement.
    #[schemars(skip)]
    pub seed: u64,
}

impl Default for StarOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            count: 1500,
            inner_radius: 80.0,
            outer_radius: 400.0,
            rotation_speed: 0.02,
            parallax_factor: 0.5,
            smoothing: 0.05,
            seed: 0x5EED,
        }
    }
}
