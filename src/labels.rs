//! Screen-space anchors for the floating project labels.
//!
//! Labels are drawn by the host as DOM elements on the web, so the core
//! only reports where each one belongs.

use glam::Vec3;

use crate::camera::core::Camera;
use crate::input::Viewport;
use crate::scene::{Tile, TileId};

/// Where to draw one tile's label this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelAnchor {
    /// Tile the label belongs to.
    pub tile: TileId,
    /// Label text.
    pub title: String,
    /// Horizontal pixel position of the label centre.
    pub x: f32,
    /// Vertical pixel position of the label centre.
    pub y: f32,
    /// `false` when the anchor is behind the camera or outside the clip
    /// volume.
    pub visible: bool,
}

/// Project every tile's label anchor into viewport pixels.
#[must_use]
pub fn project_labels(camera: &Camera, viewport: &Viewport, tiles: &[Tile]) -> Vec<LabelAnchor> {
    let view_proj = camera.view_projection();
    tiles
        .iter()
        .map(|tile| {
            let clip = view_proj * tile.label_anchor().extend(1.0);
            let (ndc, visible) = if clip.w > f32::EPSILON {
                let ndc = clip.truncate() / clip.w;
                (ndc, (0.0..=1.0).contains(&ndc.z))
            } else {
                (Vec3::ZERO, false)
            };
            let px = viewport.from_ndc(ndc.truncate());
            LabelAnchor {
                tile: tile.id,
                title: tile.title.clone(),
                x: px.x,
                y: px.y,
                visible,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::primitive::box_asset;
    use crate::scene::{NodeId, Project};

    fn camera() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 0.0, 20.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 800.0 / 600.0,
            fovy: 60.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    fn tile_at(id: u32, pos: Vec3) -> Tile {
        let project = Project::new(format!("Label {id}"), "#", 0);
        let mut t = Tile::new(TileId(id), &project, box_asset(3.0), NodeId(0), NodeId(1), 2.2);
        t.display_position = pos;
        t
    }

    #[test]
    fn label_sits_below_tile_centre() {
        let viewport = Viewport::new(800, 600);
        let labels = project_labels(&camera(), &viewport, &[tile_at(0, Vec3::ZERO)]);
        assert_eq!(labels.len(), 1);
        let label = &labels[0];
        assert!(label.visible);
        assert_eq!(label.title, "Label 0");
        assert!((label.x - 400.0).abs() < 1e-2);
        assert!(label.y > 300.0);
    }

    #[test]
    fn anchors_behind_the_camera_are_hidden() {
        let viewport = Viewport::new(800, 600);
        let labels =
            project_labels(&camera(), &viewport, &[tile_at(1, Vec3::new(0.0, 0.0, 40.0))]);
        assert!(!labels[0].visible);
    }
}
