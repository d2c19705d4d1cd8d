//! glTF/GLB icon models.
//!
//! Icons are flattened into a single mesh in the tile's local frame, then
//! centred and scaled so their largest extent matches the tile size.

use std::path::{Path, PathBuf};

use glam::{Mat3, Mat4, Vec3};

use super::{AssetLoadError, AssetProvider, AssetRequest, LoadedAsset, MeshData, MeshVertex};
use crate::scene::{Aabb, NodeKind};

/// Loads icon models from files under a root directory.
#[derive(Debug, Clone)]
pub struct GltfProvider {
    root: PathBuf,
}

impl GltfProvider {
    /// Provider resolving icon paths against `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory icon paths are resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetProvider for GltfProvider {
    fn load(&self, request: &AssetRequest) -> Result<LoadedAsset, AssetLoadError> {
        let Some(icon) = request.icon.as_deref() else {
            return Err(AssetLoadError::EmptyMesh(format!(
                "tile {} (no icon named)",
                request.tile.0
            )));
        };
        let path = self.root.join(icon);
        let (document, buffers, _images) =
            gltf::import(&path).map_err(|e| match e {
                gltf::Error::Io(source) => AssetLoadError::Io {
                    path: path.clone(),
                    source,
                },
                other => AssetLoadError::Gltf(other.to_string()),
            })?;
        let mesh = flatten(&document, &buffers, icon)?;
        log::debug!(
            "icon {} loaded: {} vertices, {} triangles",
            path.display(),
            mesh.vertices.len(),
            mesh.indices.len() / 3
        );
        Ok(normalized_asset(mesh, request.size))
    }
}

/// Decode a self-contained GLB (or embedded glTF) from memory.
///
/// # Errors
///
/// Returns [`AssetLoadError::Gltf`] if decoding fails, or
/// [`AssetLoadError::EmptyMesh`] if the model has no triangles.
pub fn decode_slice(bytes: &[u8], size: f32, name: &str) -> Result<LoadedAsset, AssetLoadError> {
    let (document, buffers, _images) =
        gltf::import_slice(bytes).map_err(|e| AssetLoadError::Gltf(e.to_string()))?;
    let mesh = flatten(&document, &buffers, name)?;
    Ok(normalized_asset(mesh, size))
}

// Walks the default scene (or the first one), baking node transforms.
fn flatten(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
    name: &str,
) -> Result<MeshData, AssetLoadError> {
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| AssetLoadError::EmptyMesh(name.to_owned()))?;

    let mut mesh = MeshData::default();
    for node in scene.nodes() {
        append_node(&node, Mat4::IDENTITY, buffers, &mut mesh);
    }

    if mesh.is_empty() {
        return Err(AssetLoadError::EmptyMesh(name.to_owned()));
    }
    Ok(mesh)
}

fn append_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut MeshData,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    let normal_matrix = Mat3::from_mat4(world).inverse().transpose();

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            let reader =
                primitive.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<Vec3> = positions
                .map(|p| world.transform_point3(Vec3::from(p)))
                .collect();
            let indices: Vec<u32> = reader.read_indices().map_or_else(
                || (0..positions.len() as u32).collect(),
                |i| i.into_u32().collect(),
            );
            let normals: Vec<Vec3> = match reader.read_normals() {
                Some(n) => n
                    .map(|n| (normal_matrix * Vec3::from(n)).normalize_or_zero())
                    .collect(),
                None => face_normals(&positions, &indices),
            };

            let base = out.vertices.len() as u32;
            out.vertices.extend(positions.iter().zip(&normals).map(|(p, n)| {
                MeshVertex {
                    position: p.to_array(),
                    normal: n.to_array(),
                }
            }));
            out.indices.extend(
                indices
                    .chunks_exact(3)
                    .filter(|tri| tri.iter().all(|&i| (i as usize) < positions.len()))
                    .flatten()
                    .map(|&i| base + i),
            );
        }
    }

    for child in node.children() {
        append_node(&child, world, buffers, out);
    }
}

// Area-weighted vertex normals for models that ship without them.
fn face_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }
    normals.iter().map(|n| n.normalize_or(Vec3::Y)).collect()
}

/// Centre `mesh` on the origin and scale its largest extent to `size`.
fn normalized_asset(mut mesh: MeshData, size: f32) -> LoadedAsset {
    let bounds = mesh.bounds().unwrap_or_else(|| Aabb::cube(size));
    let extent = bounds.size().max_element();
    let scale = if extent > f32::EPSILON { size / extent } else { 1.0 };
    let center = bounds.center();
    for v in &mut mesh.vertices {
        v.position = ((Vec3::from(v.position) - center) * scale).to_array();
    }
    let bounds = mesh.bounds().unwrap_or_else(|| Aabb::cube(size));
    LoadedAsset {
        mesh,
        bounds,
        kind: NodeKind::Icon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::TileId;

    fn triangle_mesh() -> MeshData {
        let vertex = |x: f32, y: f32| MeshVertex {
            position: [x, y, 10.0],
            normal: [0.0, 0.0, 1.0],
        };
        MeshData {
            vertices: vec![vertex(4.0, 4.0), vertex(8.0, 4.0), vertex(4.0, 6.0)],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn normalization_centres_and_scales_to_tile_size() {
        let asset = normalized_asset(triangle_mesh(), 3.0);
        assert_eq!(asset.kind, NodeKind::Icon);
        assert!(asset.bounds.center().length() < 1e-5);
        assert!((asset.bounds.size().max_element() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn missing_normals_are_generated_from_faces() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let normals = face_normals(&positions, &[0, 1, 2]);
        assert!(normals.iter().all(|n| (*n - Vec3::Z).length() < 1e-6));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode_slice(b"not a model", 3.0, "junk").unwrap_err();
        assert!(matches!(err, AssetLoadError::Gltf(_)));
    }

    #[test]
    fn request_without_icon_is_rejected() {
        let provider = GltfProvider::new("assets/icons");
        let request = AssetRequest {
            tile: TileId(2),
            icon: None,
            size: 3.0,
        };
        assert!(matches!(
            provider.load(&request),
            Err(AssetLoadError::EmptyMesh(_))
        ));
        assert_eq!(provider.root(), Path::new("assets/icons"));
    }
}
