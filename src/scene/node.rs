//! Renderable nodes owned by a tile, and their local bounds.

use glam::Vec3;

use super::tile::TileId;

/// Identifier of a single renderable node, unique for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// What a node draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Generated box primitive.
    Primitive,
    /// Loaded icon model.
    Icon,
    /// Floating text label (drawn by the host overlay).
    Label,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box from two corners.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Cube of edge `size` centred on the origin.
    #[must_use]
    pub fn cube(size: f32) -> Self {
        let half = Vec3::splat(size * 0.5);
        Self::new(-half, half)
    }

    /// Tight bounds of a point set, or `None` when empty.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) =
            iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Self { min, max })
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Whether `point` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// One renderable piece of a tile's visual subtree.
///
/// `owner` is a non-owning back-reference: picking a node resolves to its
/// tile by lookup, never by walking a parent chain.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualNode {
    /// Session-unique node identifier.
    pub id: NodeId,
    /// Tile that owns this node.
    pub owner: TileId,
    /// What the node draws.
    pub kind: NodeKind,
    /// Bounds in the owning tile's local frame.
    pub bounds: Aabb,
    /// Whether pointer rays test against this node.
    pub pickable: bool,
}
