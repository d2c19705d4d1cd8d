//! Centralized runtime options with TOML support.
//!
//! Every tweakable setting (layout, hover feedback, idle motion, camera,
//! stars, lighting, tile geometry) lives here. Options serialize to/from
//! TOML so a deployment can override any subset of them.

mod animation;
mod camera;
mod hover;
mod layout;
mod lighting;
mod stars;
mod tile;

use std::path::Path;

pub use animation::AnimationOptions;
pub use camera::CameraOptions;
pub use hover::{HoverFeedback, HoverOptions};
pub use layout::LayoutOptions;
pub use lighting::LightingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use stars::StarOptions;
pub use tile::TileOptions;

use crate::error::VitrineError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[hover]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Responsive grid parameters.
    pub layout: LayoutOptions,
    /// Hover feedback parameters.
    pub hover: HoverOptions,
    /// Idle bob parameters.
    pub animation: AnimationOptions,
    /// Camera projection and framing.
    pub camera: CameraOptions,
    /// Background star field.
    pub stars: StarOptions,
    /// Lighting parameters.
    pub lighting: LightingOptions,
    /// Tile geometry.
    pub tile: TileOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, VitrineError> {
        toml::from_str(content)
            .map_err(|e| VitrineError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::Io`] if the file cannot be read, or
    /// [`VitrineError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, VitrineError> {
        let content = std::fs::read_to_string(path).map_err(VitrineError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), VitrineError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VitrineError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VitrineError::Io)?;
        }
        std::fs::write(path, content).map_err(VitrineError::Io)
    }
}
