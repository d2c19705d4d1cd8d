//! Ray picking against tile nodes.
//!
//! A pointer position becomes a world-space ray, which is tested against
//! every pickable node in its tile's local frame. The nearest hit node is
//! resolved to its owning tile through the scene's [`PickMap`].

mod pick_map;
mod ray;

pub use pick_map::{PickMap, PickTarget};
pub use ray::Ray;

use crate::scene::{NodeId, SceneState};

/// Nearest node under a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Tile owning the hit node.
    pub target: PickTarget,
    /// The node that was hit.
    pub node: NodeId,
    /// Distance from the ray origin to the hit, in world units.
    pub distance: f32,
}

/// Find the nearest pickable node along `ray`.
///
/// Tiles are tested at their current display transform, so a lifted or
/// rotated tile is picked where it is drawn.
#[must_use]
pub fn pick(scene: &SceneState, ray: &Ray) -> Option<PickHit> {
    let mut closest: Option<PickHit> = None;

    for tile in scene.tiles() {
        let model = tile.model_matrix();
        let local = ray.transformed(&model.inverse());
        for node in tile.nodes().iter().filter(|n| n.pickable) {
            let Some(t) = local.intersect_aabb(&node.bounds) else {
                continue;
            };
            let world_hit = model.transform_point3(local.at(t));
            let distance = world_hit.distance(ray.origin);
            if closest.map_or(true, |c| distance < c.distance) {
                closest = Some(PickHit {
                    target: scene.pick_map().resolve(node.id),
                    node: node.id,
                    distance,
                });
            }
        }
    }

    closest
}

/// The tile under `ray`, if any.
#[must_use]
pub fn pick_tile(scene: &SceneState, ray: &Ray) -> PickTarget {
    pick(scene, ray).map_or(PickTarget::None, |hit| hit.target)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::assets::primitive::box_asset;
    use crate::scene::{Project, TileId};

    fn scene_with(positions: &[(u32, Vec3)]) -> SceneState {
        let mut scene = SceneState::new();
        for &(id, pos) in positions {
            let project = Project::new(format!("P{id}"), "#", 0x10_2030);
            let _ = scene.join(TileId(id), &project, box_asset(3.0), 2.2);
            let tile = scene.tile_mut(TileId(id)).unwrap();
            tile.base_position = pos;
            tile.display_position = pos;
        }
        scene
    }

    #[test]
    fn nearest_tile_wins() {
        let scene = scene_with(&[
            (0, Vec3::new(0.0, 0.0, -5.0)),
            (1, Vec3::new(0.0, 0.0, 0.0)),
        ]);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 20.0), Vec3::NEG_Z);
        let hit = pick(&scene, &ray).unwrap();
        assert_eq!(hit.target, PickTarget::Tile(TileId(1)));
        assert!((hit.distance - 18.5).abs() < 1e-4);
    }

    #[test]
    fn empty_space_picks_nothing() {
        let scene = scene_with(&[(0, Vec3::ZERO)]);
        let ray = Ray::new(Vec3::new(10.0, 10.0, 20.0), Vec3::NEG_Z);
        assert!(pick(&scene, &ray).is_none());
        assert_eq!(pick_tile(&scene, &ray), PickTarget::None);
    }

    #[test]
    fn lifted_tile_is_picked_where_drawn() {
        let mut scene = scene_with(&[(0, Vec3::ZERO)]);
        scene.tile_mut(TileId(0)).unwrap().display_position = Vec3::new(0.0, 4.0, 0.0);
        let at_base = Ray::new(Vec3::new(0.0, 0.0, 20.0), Vec3::NEG_Z);
        let at_lift = Ray::new(Vec3::new(0.0, 4.0, 20.0), Vec3::NEG_Z);
        assert!(pick(&scene, &at_base).is_none());
        assert_eq!(pick_tile(&scene, &at_lift), PickTarget::Tile(TileId(0)));
    }

    #[test]
    fn labels_are_not_pickable() {
        let scene = scene_with(&[(0, Vec3::ZERO)]);
        // The label node sits 2.2 below the centre, outside the 3-unit box.
        let ray = Ray::new(Vec3::new(0.0, -2.2, 20.0), Vec3::NEG_Z);
        assert!(pick(&scene, &ray).is_none());
    }
}
