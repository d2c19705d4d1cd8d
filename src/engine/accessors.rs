//! Read-only queries for [`ShowcaseEngine`].

use super::ShowcaseEngine;
use crate::animation::StarField;
use crate::assets::LoadTracker;
use crate::camera::core::{Camera, CameraUniform};
use crate::input::Viewport;
use crate::interaction::HoverState;
use crate::labels::{project_labels, LabelAnchor};
use crate::scene::{ProjectManifest, SceneState, Tile, TileId};

// ── Scene ──

impl ShowcaseEngine {
    /// Tiles in layout order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        self.scene.tiles()
    }

    /// Tile by id, if it has joined.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.scene.tile(id)
    }

    /// The full scene state.
    #[must_use]
    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// The project list the engine was built with.
    #[must_use]
    pub fn manifest(&self) -> &ProjectManifest {
        &self.manifest
    }

    /// Currently hovered tile.
    #[must_use]
    pub fn hovered(&self) -> Option<TileId> {
        self.hover.state().tile()
    }

    /// Hover state machine state.
    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        self.hover.state()
    }

    /// Label anchors for this frame, in viewport pixels.
    #[must_use]
    pub fn labels(&self) -> Vec<LabelAnchor> {
        project_labels(&self.camera.camera, &self.viewport, self.scene.tiles())
    }
}

// ── Loading ──

impl ShowcaseEngine {
    /// Load bookkeeping.
    #[must_use]
    pub fn loads(&self) -> &LoadTracker {
        &self.loads
    }

    /// Whether any load is still outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.loads.all_settled()
    }
}

// ── View ──

impl ShowcaseEngine {
    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera.camera
    }

    /// Camera uniform ready for upload.
    #[must_use]
    pub fn camera_uniform(&self) -> &CameraUniform {
        &self.camera.uniform
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Star field, when enabled.
    #[must_use]
    pub fn stars(&self) -> Option<&StarField> {
        self.stars.as_ref()
    }

    /// Engine clock, seconds.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
