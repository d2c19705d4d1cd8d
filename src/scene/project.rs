//! Project entries and the manifest that lists them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VitrineError;

fn default_link() -> String {
    "#".into()
}

/// One project shown as a tile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    /// Label text.
    pub title: String,
    /// URL opened when the tile is activated.
    #[serde(default = "default_link")]
    pub link: String,
    /// Tint as `0xRRGGBB`.
    #[serde(default)]
    pub color: u32,
    /// Optional glTF/GLB icon model, relative to the asset root. Tiles
    /// without one get a box.
    #[serde(default)]
    pub icon: Option<String>,
}

impl Project {
    /// Project without an icon.
    #[must_use]
    pub fn new(title: impl Into<String>, link: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            color,
            icon: None,
        }
    }

    /// Attach an icon model path.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Tint as linear RGB in [0, 1]. The hex value is sRGB-encoded, as
    /// colours are written on the web.
    #[must_use]
    pub fn color_rgb(&self) -> [f32; 3] {
        let channel = |shift: u32| {
            let encoded = ((self.color >> shift) & 0xff) as f32 / 255.0;
            srgb_to_linear(encoded)
        };
        [channel(16), channel(8), channel(0)]
    }
}

/// Decode one sRGB channel in [0, 1] to linear light.
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else if c >= 1.0 {
        1.0
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// The ordered list of projects. Order defines each tile's identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ProjectManifest {
    /// Projects in display order.
    pub projects: Vec<Project>,
}

impl ProjectManifest {
    /// Parse a TOML manifest (`[[projects]]` tables).
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::ManifestParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, VitrineError> {
        toml::from_str(content)
            .map_err(|e| VitrineError::ManifestParse(e.to_string()))
    }

    /// Parse a JSON manifest: either `{"projects": [...]}` or a bare array.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::ManifestParse`] on malformed JSON.
    pub fn from_json(content: &str) -> Result<Self, VitrineError> {
        let value: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| VitrineError::ManifestParse(e.to_string()))?;
        let manifest = if value.is_array() {
            serde_json::from_value(value).map(|projects| Self { projects })
        } else {
            serde_json::from_value(value)
        };
        manifest.map_err(|e| VitrineError::ManifestParse(e.to_string()))
    }

    /// Load a TOML manifest from disk.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::Io`] if the file cannot be read, or
    /// [`VitrineError::ManifestParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, VitrineError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Nine placeholder projects with distinct colors.
    #[must_use]
    pub fn placeholder() -> Self {
        const COLORS: [u32; 9] = [
            0xff_0000, 0x00_ff00, 0x00_00ff, 0xff_ff00, 0xff_00ff, 0x00_ffff,
            0xff_ffff, 0x88_8888, 0x00_0000,
        ];
        let projects = COLORS
            .iter()
            .enumerate()
            .map(|(i, &color)| Project::new(format!("Project {}", i + 1), "#", color))
            .collect();
        Self { projects }
    }

    /// Number of projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the manifest lists no projects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_decodes_from_srgb_to_linear() {
        let p = Project::new("x", "#", 0xff_8000);
        let [r, g, b] = p.color_rgb();
        assert_eq!(r, 1.0);
        // sRGB mid-grey is roughly a fifth of full linear intensity.
        assert!((g - 0.215_86).abs() < 1e-4);
        assert_eq!(b, 0.0);
        assert!((srgb_to_linear(0.02) - 0.02 / 12.92).abs() < 1e-7);
    }

    #[test]
    fn toml_manifest_with_hex_colors_and_defaults() {
        let manifest = ProjectManifest::from_toml(
            r#"
[[projects]]
title = "Ray tracer"
link = "https://example.com/rt"
color = 0xff0000
icon = "icons/rt.glb"

[[projects]]
title = "Notes"
"#,
        )
        .unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.projects[0].color, 0xff_0000);
        assert_eq!(manifest.projects[0].icon.as_deref(), Some("icons/rt.glb"));
        assert_eq!(manifest.projects[1].link, "#");
        assert_eq!(manifest.projects[1].icon, None);
    }

    #[test]
    fn json_manifest_accepts_object_or_array() {
        let object = ProjectManifest::from_json(
            r#"{"projects":[{"title":"A","link":"https://a.dev","color":255}]}"#,
        )
        .unwrap();
        let array =
            ProjectManifest::from_json(r#"[{"title":"A","link":"https://a.dev","color":255}]"#)
                .unwrap();
        assert_eq!(object, array);
        assert_eq!(array.projects[0].color_rgb(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn malformed_manifest_is_reported() {
        assert!(matches!(
            ProjectManifest::from_toml("[[projects]]\ncolor = 3"),
            Err(VitrineError::ManifestParse(_))
        ));
        assert!(matches!(
            ProjectManifest::from_json("{"),
            Err(VitrineError::ManifestParse(_))
        ));
    }

    #[test]
    fn placeholder_lists_nine_projects() {
        let manifest = ProjectManifest::placeholder();
        assert_eq!(manifest.len(), 9);
        assert_eq!(manifest.projects[8].title, "Project 9");
    }
}
