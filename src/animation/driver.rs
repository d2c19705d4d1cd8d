//! Per-frame tile motion.

use glam::Vec3;

use crate::options::{AnimationOptions, HoverOptions};
use crate::scene::Tile;

/// Derives each tile's display transform from its resting position, its
/// hover state, and the engine clock.
///
/// Display transforms are recomputed from `base_position` every frame and
/// never written back, so relayout and animation cannot drift apart.
#[derive(Debug, Clone, Default)]
pub struct AnimationDriver {
    animation: AnimationOptions,
    hover: HoverOptions,
}

impl AnimationDriver {
    /// Driver with the given motion parameters.
    #[must_use]
    pub fn new(animation: AnimationOptions, hover: HoverOptions) -> Self {
        Self { animation, hover }
    }

    /// Replace the motion parameters.
    pub fn set_options(&mut self, animation: AnimationOptions, hover: HoverOptions) {
        self.animation = animation;
        self.hover = hover;
    }

    /// Idle bob offset for a tile with the given phase at `elapsed`.
    #[must_use]
    pub fn bob(&self, phase: f32, elapsed: f32) -> f32 {
        (elapsed * self.animation.bob_speed + phase).sin() * self.animation.bob_amplitude
    }

    /// Recompute display positions (bob and hover lift) without advancing
    /// any rotation.
    pub fn place(&self, tiles: &mut [Tile], elapsed: f32) {
        for tile in tiles {
            let mut y = tile.base_position.y + self.bob(tile.id.phase(), elapsed);
            if tile.is_hovered {
                y += self.hover.lift;
            }
            tile.display_position =
                Vec3::new(tile.base_position.x, y, tile.base_position.z);
        }
    }

    /// Advance rotations by one frame: continuous spin and active tweens.
    /// Finished tweens are dropped once their target is applied.
    pub fn advance(&self, tiles: &mut [Tile], elapsed: f32) {
        for tile in tiles {
            if tile.is_rotating {
                tile.rotation_y += self.hover.spin_per_frame;
            }
            if let Some(tween) = tile.rotation_tween {
                tile.rotation_y = tween.sample(elapsed);
                if tween.is_finished(elapsed) {
                    tile.rotation_tween = None;
                }
            }
        }
    }

    /// One full frame: [`Self::advance`] then [`Self::place`].
    pub fn tick(&self, tiles: &mut [Tile], elapsed: f32) {
        self.advance(tiles, elapsed);
        self.place(tiles, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;
    use crate::assets::primitive::box_asset;
    use crate::interaction::apply_enter;
    use crate::scene::{NodeId, Project, TileId};

    fn tile(id: u32) -> Tile {
        let project = Project::new("T", "#", 0);
        let mut t =
            Tile::new(TileId(id), &project, box_asset(3.0), NodeId(0), NodeId(1), 2.2);
        t.base_position = Vec3::new(5.0, 10.0, 0.0);
        t
    }

    #[test]
    fn bob_follows_phase_shifted_sine() {
        let driver = AnimationDriver::default();
        let mut tiles = vec![tile(0), tile(3)];
        driver.place(&mut tiles, 2.0);
        let expected0 = 10.0 + (2.0_f32 * 0.5).sin() * 0.2;
        let expected3 = 10.0 + (2.0_f32 * 0.5 + 3.0).sin() * 0.2;
        assert!((tiles[0].display_position.y - expected0).abs() < 1e-6);
        assert!((tiles[1].display_position.y - expected3).abs() < 1e-6);
        assert_eq!(tiles[0].display_position.x, 5.0);
        assert_eq!(tiles[0].base_position.y, 10.0);
    }

    #[test]
    fn hovered_tile_is_lifted() {
        let driver = AnimationDriver::default();
        let mut tiles = vec![tile(1)];
        driver.place(&mut tiles, 1.0);
        let resting = tiles[0].display_position.y;
        tiles[0].is_hovered = true;
        driver.place(&mut tiles, 1.0);
        assert!((tiles[0].display_position.y - resting - 0.5).abs() < 1e-6);
    }

    #[test]
    fn spin_accumulates_per_frame_without_wrapping() {
        let driver = AnimationDriver::default();
        let mut tiles = vec![tile(0)];
        tiles[0].is_rotating = true;
        for frame in 0..200 {
            driver.tick(&mut tiles, frame as f32 / 60.0);
        }
        assert!((tiles[0].rotation_y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn finished_tween_is_dropped_at_target() {
        let driver = AnimationDriver::default();
        let mut tiles = vec![tile(0)];
        apply_enter(&mut tiles[0], &HoverOptions::default(), 0.0);
        driver.tick(&mut tiles, 0.3);
        assert!(tiles[0].rotation_tween.is_some());
        assert!(tiles[0].rotation_y > 0.0 && tiles[0].rotation_y < PI);
        driver.tick(&mut tiles, 0.7);
        assert!(tiles[0].rotation_tween.is_none());
        assert!((tiles[0].rotation_y - PI).abs() < 1e-6);
    }
}
