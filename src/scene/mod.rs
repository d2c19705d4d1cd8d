//! Scene state: the tile collection and its pick map.
//!
//! Tiles join the scene as their assets settle, in whatever order loads
//! complete. The collection is kept sorted by [`TileId`] so layout order is
//! manifest order regardless of completion order. Failed loads never join;
//! survivors compact into the grid.

mod node;
mod project;
mod tile;

pub use node::{Aabb, NodeId, NodeKind, VisualNode};
pub use project::{Project, ProjectManifest};
pub use tile::{Tile, TileId};

use crate::assets::LoadedAsset;
use crate::picking::PickMap;

/// Tiles currently in the scene plus the node → tile back-reference table.
#[derive(Debug, Default)]
pub struct SceneState {
    tiles: Vec<Tile>,
    pick_map: PickMap,
    next_node: u32,
}

impl SceneState {
    /// Empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tile built from a successfully loaded asset.
    ///
    /// Re-joining an id already present replaces that tile's mesh and
    /// nodes; placement, hover and rotation state carry over.
    pub fn join(
        &mut self,
        id: TileId,
        project: &Project,
        asset: LoadedAsset,
        label_offset: f32,
    ) -> &Tile {
        let previous = self.remove(id);

        let body = self.alloc_node();
        let label = self.alloc_node();
        let mut tile = Tile::new(id, project, asset, body, label, label_offset);
        if let Some(old) = previous {
            log::warn!("tile {} joined twice, replacing its mesh", id.0);
            tile.inherit_state(&old);
        }
        for node in tile.nodes().iter().filter(|n| n.pickable) {
            self.pick_map.insert(node.id, node.owner);
        }

        let slot = self.tiles.partition_point(|t| t.id < id);
        self.tiles.insert(slot, tile);
        log::debug!("tile {} '{}' joined the scene", id.0, project.title);
        &self.tiles[slot]
    }

    fn alloc_node(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        id
    }

    fn remove(&mut self, id: TileId) -> Option<Tile> {
        let pos = self.tiles.binary_search_by_key(&id, |t| t.id).ok()?;
        let tile = self.tiles.remove(pos);
        for node in tile.nodes() {
            self.pick_map.remove(node.id);
        }
        Some(tile)
    }

    /// Tiles in layout order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Mutable tiles in layout order.
    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    /// Tile by id.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles
            .binary_search_by_key(&id, |t| t.id)
            .ok()
            .map(|i| &self.tiles[i])
    }

    /// Mutable tile by id.
    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles
            .binary_search_by_key(&id, |t| t.id)
            .ok()
            .map(|i| &mut self.tiles[i])
    }

    /// Number of tiles in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no tile has joined yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The hovered tile, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<TileId> {
        self.tiles.iter().find(|t| t.is_hovered).map(|t| t.id)
    }

    /// Mark exactly `id` as hovered (or none), clearing every other tile.
    pub fn set_hovered(&mut self, id: Option<TileId>) {
        for tile in &mut self.tiles {
            tile.is_hovered = Some(tile.id) == id;
        }
    }

    /// Node → tile lookup for pick resolution.
    #[must_use]
    pub fn pick_map(&self) -> &PickMap {
        &self.pick_map
    }

    /// Drop every tile and node.
    pub fn teardown(&mut self) {
        self.tiles.clear();
        self.pick_map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::primitive::box_asset;
    use crate::picking::PickTarget;

    fn project(n: u32) -> Project {
        Project::new(format!("P{n}"), format!("https://example.com/{n}"), 0x44_4444)
    }

    #[test]
    fn out_of_order_joins_keep_manifest_order() {
        let mut scene = SceneState::new();
        for id in [4, 0, 2] {
            let _ = scene.join(TileId(id), &project(id), box_asset(3.0), 2.2);
        }
        let ids: Vec<_> = scene.tiles().iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![0, 2, 4]);
        assert_eq!(scene.tile(TileId(2)).unwrap().title, "P2");
        assert!(scene.tile(TileId(1)).is_none());
    }

    #[test]
    fn pickable_nodes_resolve_to_their_tile() {
        let mut scene = SceneState::new();
        let tile = scene.join(TileId(7), &project(7), box_asset(3.0), 2.2);
        let body = tile.nodes()[0].id;
        let label = tile.nodes()[1].id;
        assert_eq!(scene.pick_map().resolve(body), PickTarget::Tile(TileId(7)));
        assert_eq!(scene.pick_map().resolve(label), PickTarget::None);
    }

    #[test]
    fn hover_is_exclusive() {
        let mut scene = SceneState::new();
        for id in 0..3 {
            let _ = scene.join(TileId(id), &project(id), box_asset(3.0), 2.2);
        }
        scene.set_hovered(Some(TileId(1)));
        scene.set_hovered(Some(TileId(2)));
        assert_eq!(scene.hovered(), Some(TileId(2)));
        assert_eq!(scene.tiles().iter().filter(|t| t.is_hovered).count(), 1);
        scene.set_hovered(None);
        assert_eq!(scene.hovered(), None);
    }

    #[test]
    fn rejoin_keeps_hover_and_rotation() {
        let mut scene = SceneState::new();
        let first_body = scene.join(TileId(3), &project(3), box_asset(3.0), 2.2).body_node();
        scene.set_hovered(Some(TileId(3)));
        if let Some(tile) = scene.tile_mut(TileId(3)) {
            tile.base_position = glam::Vec3::new(5.0, 0.0, 0.0);
            tile.is_rotating = true;
            tile.rotation_y = 1.5;
        }
        let tile = scene.join(TileId(3), &project(3), box_asset(2.0), 2.2);
        assert!(tile.is_hovered && tile.is_rotating);
        assert_eq!(tile.rotation_y, 1.5);
        assert_eq!(tile.base_position.x, 5.0);
        assert_ne!(tile.body_node(), first_body);
        assert_eq!(scene.hovered(), Some(TileId(3)));
    }

    #[test]
    fn rejoin_replaces_and_teardown_clears() {
        let mut scene = SceneState::new();
        let first = scene.join(TileId(0), &project(0), box_asset(3.0), 2.2).nodes()[0].id;
        let _ = scene.join(TileId(0), &project(0), box_asset(3.0), 2.2);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.pick_map().resolve(first), PickTarget::None);
        scene.teardown();
        assert!(scene.is_empty());
        assert!(scene.pick_map().is_empty());
    }
}
