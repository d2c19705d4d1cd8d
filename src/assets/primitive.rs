//! Box primitive used for tiles without an icon.

use glam::Vec3;

use super::{AssetLoadError, AssetProvider, AssetRequest, LoadedAsset, MeshData, MeshVertex};
use crate::scene::{Aabb, NodeKind};

// (normal, tangent u, tangent v) for each face.
const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
];

/// Cube of edge `size` centred on the origin, four vertices per face so
/// each face shades flat.
#[must_use]
pub fn box_mesh(size: f32) -> MeshData {
    let half = size * 0.5;
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in FACES {
        let n = Vec3::from(normal);
        let u = Vec3::from(u);
        let v = Vec3::from(v);
        let base = vertices.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (n + u * su + v * sv) * half;
            vertices.push(MeshVertex {
                position: p.to_array(),
                normal,
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// A box body asset of edge `size`.
#[must_use]
pub fn box_asset(size: f32) -> LoadedAsset {
    LoadedAsset {
        mesh: box_mesh(size),
        bounds: Aabb::cube(size),
        kind: NodeKind::Primitive,
    }
}

/// Produces a box for every request. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimitiveProvider;

impl AssetProvider for PrimitiveProvider {
    fn load(&self, request: &AssetRequest) -> Result<LoadedAsset, AssetLoadError> {
        Ok(box_asset(request.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_has_24_vertices_and_12_triangles() {
        let mesh = box_mesh(3.0);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn faces_wind_counter_clockwise_outward() {
        let mesh = box_mesh(2.0);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from(mesh.vertices[i as usize].position));
            let face_normal = (b - a).cross(c - a).normalize();
            let stored = Vec3::from(mesh.vertices[tri[0] as usize].normal);
            assert!(face_normal.dot(stored) > 0.99);
        }
    }

    #[test]
    fn provider_honours_requested_size() {
        let request = AssetRequest {
            tile: crate::scene::TileId(0),
            icon: None,
            size: 4.0,
        };
        let asset = PrimitiveProvider.load(&request).unwrap();
        assert_eq!(asset.bounds, Aabb::cube(4.0));
        assert_eq!(asset.mesh.bounds(), Some(Aabb::cube(4.0)));
    }
}
