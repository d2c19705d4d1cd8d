//! Input dispatch for [`ShowcaseEngine`].

use super::ShowcaseEngine;
use crate::input::{InputEvent, Viewport};
use crate::interaction::{apply_enter, apply_exit, HoverTransition, LinkOpener};
use crate::picking::{self, PickTarget, Ray};
use crate::scene::TileId;

/// What one input event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputResponse {
    /// Hover enter/exit caused by a pointer move.
    pub hover: HoverTransition,
    /// Tile whose link was opened by a pointer down.
    pub activated: Option<TileId>,
    /// Whether the viewport changed size.
    pub resized: bool,
}

impl ShowcaseEngine {
    /// Process a platform-agnostic input event.
    ///
    /// Pointer moves update hover, pointer downs open the tile's link via
    /// `opener`, resizes relayout the grid. Mouse and touch are treated the
    /// same; every event is picked independently.
    pub fn handle_input(
        &mut self,
        event: InputEvent,
        opener: &mut dyn LinkOpener,
    ) -> InputResponse {
        match event {
            InputEvent::PointerMoved { x, y, .. } => InputResponse {
                hover: self.dispatch_pointer_moved(x, y),
                ..InputResponse::default()
            },
            InputEvent::PointerDown { x, y, .. } => InputResponse {
                activated: self.dispatch_pointer_down(x, y, opener),
                ..InputResponse::default()
            },
            InputEvent::Resized { width, height } => {
                self.resize(width, height);
                InputResponse {
                    resized: true,
                    ..InputResponse::default()
                }
            }
        }
    }

    /// The tile under a viewport pixel position.
    #[must_use]
    pub fn pick_at(&self, x: f32, y: f32) -> PickTarget {
        let Some(ndc) = self.viewport.to_ndc(x, y) else {
            return PickTarget::None;
        };
        let ray = Ray::from_ndc(&self.camera.camera, ndc);
        picking::pick_tile(&self.scene, &ray)
    }

    /// Track a new viewport size and relayout.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        self.camera.resize(width, height);
        self.relayout();
        log::debug!("resized to {width}x{height}");
    }

    fn dispatch_pointer_moved(&mut self, x: f32, y: f32) -> HoverTransition {
        if let Some(ndc) = self.viewport.to_ndc(x, y) {
            self.pointer_ndc = ndc;
        }
        let hit = self.pick_at(x, y).tile();
        let transition = self.hover.on_pick(hit);
        let now = self.elapsed;
        if let Some(tile) = transition.exited.and_then(|id| self.scene.tile_mut(id)) {
            apply_exit(tile, &self.options.hover, now);
        }
        if let Some(tile) = transition.entered.and_then(|id| self.scene.tile_mut(id)) {
            apply_enter(tile, &self.options.hover, now);
        }
        transition
    }

    fn dispatch_pointer_down(
        &mut self,
        x: f32,
        y: f32,
        opener: &mut dyn LinkOpener,
    ) -> Option<TileId> {
        let id = self.pick_at(x, y).tile()?;
        let tile = self.scene.tile(id)?;
        log::info!("opening '{}' -> {}", tile.title, tile.link);
        opener.open(&tile.link);
        Some(id)
    }
}
