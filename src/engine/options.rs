//! Options methods for [`ShowcaseEngine`].

use super::ShowcaseEngine;
use crate::animation::StarField;
use crate::interaction::{apply_enter, apply_exit};
use crate::options::{HoverOptions, Options};

impl ShowcaseEngine {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options and push the changes to every subsystem.
    ///
    /// Tile size applies to loads started afterwards; tiles already in the
    /// scene keep their mesh.
    ///
    /// Changing the hover feedback mode while a tile is hovered replays
    /// that tile's exit under the old mode and its enter under the new one.
    pub fn set_options(&mut self, new: Options) {
        let stars_changed = new.stars != self.options.stars;
        let old_hover = std::mem::replace(&mut self.options, new).hover;

        if old_hover.feedback != self.options.hover.feedback {
            self.replay_hover(&old_hover);
        }

        self.camera.set_options(&self.options.camera);
        self.driver
            .set_options(self.options.animation.clone(), self.options.hover.clone());
        if stars_changed {
            self.stars = self
                .options
                .stars
                .enabled
                .then(|| StarField::new(&self.options.stars));
        }
        self.relayout();
        log::debug!("options applied");
    }

    fn replay_hover(&mut self, old: &HoverOptions) {
        let now = self.elapsed;
        let Some(id) = self.scene.hovered() else {
            return;
        };
        if let Some(tile) = self.scene.tile_mut(id) {
            apply_exit(tile, old, now);
            apply_enter(tile, &self.options.hover, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::PrimitiveProvider;
    use crate::input::{InputEvent, PointerSource};
    use crate::options::HoverFeedback;
    use crate::scene::ProjectManifest;
    use crate::util::frame_timing::FrameTick;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved { x, y, source: PointerSource::Mouse }
    }

    fn no_open(_: &str) {}

    #[test]
    fn changing_spacing_relayouts_loaded_tiles() {
        let mut engine =
            ShowcaseEngine::new(Options::default(), ProjectManifest::placeholder(), 1000, 800);
        engine.load_inline(&PrimitiveProvider);
        let mut options = engine.options().clone();
        options.layout.spacing = 8.0;
        engine.set_options(options);
        assert_eq!(engine.tiles()[0].base_position.x, -8.0);
    }

    #[test]
    fn switching_spin_to_tween_stops_the_spin_after_exit() {
        let mut options = Options::default();
        options.hover.feedback = HoverFeedback::Spin;
        let mut engine = ShowcaseEngine::new(options, ProjectManifest::placeholder(), 1000, 800);
        engine.load_inline(&PrimitiveProvider);
        let centre = engine.tiles()[4].display_position;
        let ndc = engine.camera().view_projection().project_point3(centre);
        let px = engine.viewport().from_ndc(ndc.truncate());
        let _ = engine.handle_input(moved(px.x, px.y), &mut no_open);
        assert!(engine.tiles()[4].is_rotating);

        let mut options = engine.options().clone();
        options.hover.feedback = HoverFeedback::Tween;
        engine.set_options(options);
        assert!(!engine.tiles()[4].is_rotating);
        assert!(engine.tiles()[4].rotation_tween.is_some());

        let _ = engine.handle_input(moved(1.0, 1.0), &mut no_open);
        for frame in 1..=60_u64 {
            engine.update(FrameTick::at(frame as f32 / 60.0, 1.0 / 60.0, frame));
        }
        let tile = &engine.tiles()[4];
        assert!(!tile.is_hovered);
        assert!(!tile.is_rotating);
        assert!(tile.rotation_y.abs() < 1e-4);
    }

    #[test]
    fn enabling_stars_builds_the_field() {
        let mut engine =
            ShowcaseEngine::new(Options::default(), ProjectManifest::placeholder(), 800, 600);
        assert!(engine.stars().is_none());
        let mut options = Options::default();
        options.stars.enabled = true;
        options.stars.count = 50;
        engine.set_options(options);
        assert_eq!(engine.stars().map(|s| s.positions().len()), Some(50));
    }
}
