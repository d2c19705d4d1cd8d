//! A single interactive project tile.

use glam::{Mat4, Quat, Vec3};

use super::node::{Aabb, NodeId, NodeKind, VisualNode};
use super::project::Project;
use crate::animation::RotationTween;
use crate::assets::{LoadedAsset, MeshData};

/// Stable tile identity: the project's index in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl TileId {
    /// Index into the manifest.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Phase offset for the idle bob, so tiles desynchronize.
    #[must_use]
    pub fn phase(self) -> f32 {
        self.0 as f32
    }
}

/// One project entry in the 3D grid.
///
/// The tile exclusively owns its visual subtree (body mesh and label
/// node). `base_position` is written only by layout; `display_position`
/// and `rotation_y` are derived per frame by the animation driver.
#[derive(Debug, Clone)]
pub struct Tile {
    /// Stable identity.
    pub id: TileId,
    /// Label text.
    pub title: String,
    /// URL opened on activation.
    pub link: String,
    /// Linear RGB tint.
    pub color: [f32; 3],
    /// Resting grid position.
    pub base_position: Vec3,
    /// Position drawn this frame.
    pub display_position: Vec3,
    /// Rotation about the vertical axis, radians (unbounded).
    pub rotation_y: f32,
    /// Whether the pointer is over this tile.
    pub is_hovered: bool,
    /// Whether the tile spins continuously (spin feedback).
    pub is_rotating: bool,
    /// In-flight rotation tween (tween feedback).
    pub rotation_tween: Option<RotationTween>,
    mesh: MeshData,
    nodes: Vec<VisualNode>,
}

impl Tile {
    /// Build a tile from its project entry and loaded asset.
    ///
    /// `body_node` and `label_node` are the ids allocated for the body mesh
    /// and the label; `label_offset` is the label's distance below the
    /// tile centre.
    #[must_use]
    pub fn new(
        id: TileId,
        project: &Project,
        asset: LoadedAsset,
        body_node: NodeId,
        label_node: NodeId,
        label_offset: f32,
    ) -> Self {
        let label_anchor = Vec3::new(0.0, -label_offset, 0.0);
        let nodes = vec![
            VisualNode {
                id: body_node,
                owner: id,
                kind: asset.kind,
                bounds: asset.bounds,
                pickable: true,
            },
            VisualNode {
                id: label_node,
                owner: id,
                kind: NodeKind::Label,
                bounds: Aabb::new(label_anchor, label_anchor),
                pickable: false,
            },
        ];
        Self {
            id,
            title: project.title.clone(),
            link: project.link.clone(),
            color: project.color_rgb(),
            base_position: Vec3::ZERO,
            display_position: Vec3::ZERO,
            rotation_y: 0.0,
            is_hovered: false,
            is_rotating: false,
            rotation_tween: None,
            mesh: asset.mesh,
            nodes,
        }
    }

    /// Take over placement, hover and rotation state from `old`, the tile
    /// this one replaces.
    pub fn inherit_state(&mut self, old: &Tile) {
        self.base_position = old.base_position;
        self.display_position = old.display_position;
        self.rotation_y = old.rotation_y;
        self.is_hovered = old.is_hovered;
        self.is_rotating = old.is_rotating;
        self.rotation_tween = old.rotation_tween;
    }

    /// Id of the body mesh node. A replaced tile gets a fresh one.
    #[must_use]
    pub fn body_node(&self) -> NodeId {
        self.nodes[0].id
    }

    /// Nodes of this tile's visual subtree.
    #[must_use]
    pub fn nodes(&self) -> &[VisualNode] {
        &self.nodes
    }

    /// Body mesh (primitive or icon), in the tile's local frame.
    #[must_use]
    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    /// World transform for the current frame.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(
            Quat::from_rotation_y(self.rotation_y),
            self.display_position,
        )
    }

    /// World-space label anchor for the current frame.
    ///
    /// Labels follow the tile's position but not its rotation.
    #[must_use]
    pub fn label_anchor(&self) -> Vec3 {
        let local = self
            .nodes
            .iter()
            .find(|n| n.kind == NodeKind::Label)
            .map_or(Vec3::ZERO, |n| n.bounds.center());
        self.display_position + local
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::assets::primitive::box_asset;

    fn tile() -> Tile {
        let project = Project::new("Alpha", "https://example.com/alpha", 0xff_0000);
        Tile::new(TileId(3), &project, box_asset(3.0), NodeId(0), NodeId(1), 2.2)
    }

    #[test]
    fn new_tile_owns_body_and_label() {
        let t = tile();
        assert_eq!(t.nodes().len(), 2);
        assert!(t.nodes().iter().all(|n| n.owner == TileId(3)));
        assert!(t.nodes()[0].pickable);
        assert!(!t.nodes()[1].pickable);
        assert_eq!(t.color, [1.0, 0.0, 0.0]);
        assert!(!t.is_hovered && !t.is_rotating);
    }

    #[test]
    fn label_follows_position_not_rotation() {
        let mut t = tile();
        t.display_position = Vec3::new(5.0, 1.0, 0.0);
        t.rotation_y = FRAC_PI_2;
        let anchor = t.label_anchor();
        assert!((anchor - Vec3::new(5.0, -1.2, 0.0)).length() < 1e-5);
    }

    #[test]
    fn model_matrix_applies_rotation_then_translation() {
        let mut t = tile();
        t.display_position = Vec3::new(1.0, 2.0, 0.0);
        t.rotation_y = FRAC_PI_2;
        let p = t.model_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(1.0, 2.0, -1.0)).length() < 1e-5);
    }
}
