use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
/// Responsive grid parameters.
pub struct LayoutOptions {
    /// Distance between neighbouring cell centres, in world units.
    #[schemars(title = "Spacing", range(min = 1.0, max = 12.0), extend("step" = 0.5))]
    pub spacing: f32,
    /// Viewport widths below this (pixels) get a single column.
    #[schemars(skip)]
    pub narrow_breakpoint: f32,
    /// Viewport widths at or above this (pixels) get three columns.
    #[schemars(skip)]
    pub wide_breakpoint: f32,
    /// How far below a tile's centre its label is anchored.
    #[schemars(title = "Label Offset", range(min = 0.0, max = 5.0), extend("step" = 0.1))]
    pub label_offset: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            spacing: 5.0,
            narrow_breakpoint: 600.0,
            wide_breakpoint: 900.0,
            label_offset: 2.2,
        }
    }
}
