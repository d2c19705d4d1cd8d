//! Typed pick-target resolution from node ids.

use rustc_hash::FxHashMap;

use crate::scene::{NodeId, TileId};

/// A typed pick target resolved from a hit node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    /// No target (background, or a node no tile claims).
    None,
    /// A project tile.
    Tile(TileId),
}

impl PickTarget {
    /// The tile, if this target is one.
    #[must_use]
    pub fn tile(self) -> Option<TileId> {
        match self {
            Self::Tile(id) => Some(id),
            Self::None => None,
        }
    }

    /// Returns `true` if this target is `None`.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Maps pickable node ids to the tile that owns them.
///
/// Only pickable nodes are registered; everything else resolves to
/// [`PickTarget::None`].
#[derive(Debug, Clone, Default)]
pub struct PickMap {
    owners: FxHashMap<NodeId, TileId>,
}

impl PickMap {
    /// Empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` as belonging to `tile`.
    pub fn insert(&mut self, node: NodeId, tile: TileId) {
        let _ = self.owners.insert(node, tile);
    }

    /// Forget `node`.
    pub fn remove(&mut self, node: NodeId) {
        let _ = self.owners.remove(&node);
    }

    /// Resolve a hit node to its owning tile.
    #[must_use]
    pub fn resolve(&self, node: NodeId) -> PickTarget {
        self.owners
            .get(&node)
            .map_or(PickTarget::None, |&tile| PickTarget::Tile(tile))
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.owners.clear();
    }

    /// Number of registered nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Whether no node is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_nodes_resolve_to_none() {
        let mut map = PickMap::new();
        map.insert(NodeId(4), TileId(1));
        assert_eq!(map.resolve(NodeId(4)), PickTarget::Tile(TileId(1)));
        assert!(map.resolve(NodeId(5)).is_none());
        map.remove(NodeId(4));
        assert!(map.is_empty());
    }

    #[test]
    fn target_exposes_tile() {
        assert_eq!(PickTarget::Tile(TileId(2)).tile(), Some(TileId(2)));
        assert_eq!(PickTarget::None.tile(), None);
    }
}
