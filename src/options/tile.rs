use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tiles", inline)]
#[serde(default)]
/// Tile geometry parameters.
pub struct TileOptions {
    /// Edge length of the primitive box, and the size icon models are
    /// normalised to.
    #[schemars(title = "Tile Size", range(min = 0.5, max = 4.5), extend("step" = 0.1))]
    pub size: f32,
}

impl Default for TileOptions {
    fn default() -> Self {
        Self { size: 3.0 }
    }
}
