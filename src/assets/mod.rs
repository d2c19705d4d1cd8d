//! Tile body assets: meshes, providers, and the background loader.
//!
//! Every tile needs a body mesh before it can join the scene. A mesh comes
//! either from a generated box primitive or from a glTF icon model. Loads
//! are independent and may fail; a failure excludes that tile only.

pub mod icon;
mod loader;
pub mod primitive;

use std::fmt;
use std::path::PathBuf;

use glam::Vec3;

pub use icon::GltfProvider;
pub use loader::{AssetLoader, LoadCompletion, LoadTracker};
pub use primitive::PrimitiveProvider;

use crate::scene::{Aabb, NodeKind, TileId};

/// One load job: the body asset for a tile.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRequest {
    /// Tile the asset is for.
    pub tile: TileId,
    /// Icon model path (relative to the provider root), if any.
    pub icon: Option<String>,
    /// Edge length the mesh is normalized to.
    pub size: f32,
}

/// Vertex layout shared by every tile mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Local-space position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
}

/// Indexed triangle mesh in a tile's local frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertices.
    pub vertices: Vec<MeshVertex>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Tight bounds of the vertex positions.
    #[must_use]
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().map(|v| Vec3::from(v.position)))
    }

    /// Whether the mesh has no drawable triangle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.len() < 3
    }
}

/// A successfully loaded body asset.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedAsset {
    /// Body mesh.
    pub mesh: MeshData,
    /// Local bounds used for picking.
    pub bounds: Aabb,
    /// Primitive or icon.
    pub kind: NodeKind,
}

/// Why a tile's asset failed to load.
#[derive(Debug)]
pub enum AssetLoadError {
    /// The model file could not be read.
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The model could not be decoded.
    Gltf(String),
    /// The model decoded but contains no triangles.
    EmptyMesh(String),
    /// The worker producing the asset went away.
    WorkerLost,
}

impl fmt::Display for AssetLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            Self::Gltf(msg) => write!(f, "glTF decode error: {msg}"),
            Self::EmptyMesh(name) => write!(f, "{name} contains no triangles"),
            Self::WorkerLost => write!(f, "asset worker exited without a result"),
        }
    }
}

impl std::error::Error for AssetLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Something that can produce a tile's body asset.
///
/// Providers are shared with worker threads, hence `Send + Sync`.
pub trait AssetProvider: Send + Sync {
    /// Produce the asset for `request`.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetLoadError`] when the asset cannot be produced.
    fn load(&self, request: &AssetRequest) -> Result<LoadedAsset, AssetLoadError>;
}

/// Default provider: the project's icon when it names one, otherwise a
/// box primitive.
#[derive(Debug, Clone)]
pub struct ProjectAssetProvider {
    primitive: PrimitiveProvider,
    icons: GltfProvider,
}

impl ProjectAssetProvider {
    /// Provider resolving icon paths against `icon_root`.
    #[must_use]
    pub fn new(icon_root: impl Into<PathBuf>) -> Self {
        Self {
            primitive: PrimitiveProvider,
            icons: GltfProvider::new(icon_root),
        }
    }
}

impl AssetProvider for ProjectAssetProvider {
    fn load(&self, request: &AssetRequest) -> Result<LoadedAsset, AssetLoadError> {
        if request.icon.is_some() {
            self.icons.load(request)
        } else {
            self.primitive.load(request)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn project_provider_falls_back_to_primitive() {
        let provider = ProjectAssetProvider::new("/nonexistent");
        let request = AssetRequest {
            tile: TileId(0),
            icon: None,
            size: 3.0,
        };
        let asset = provider.load(&request).unwrap();
        assert_eq!(asset.kind, NodeKind::Primitive);
    }

    #[test]
    fn missing_icon_is_an_io_error() {
        let provider = ProjectAssetProvider::new("/nonexistent");
        let request = AssetRequest {
            tile: TileId(1),
            icon: Some("missing.glb".into()),
            size: 3.0,
        };
        let err = provider.load(&request).unwrap_err();
        assert!(matches!(err, AssetLoadError::Io { .. }));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing.glb"));
    }

    #[test]
    fn mesh_bounds_and_emptiness() {
        assert!(MeshData::default().is_empty());
        assert!(MeshData::default().bounds().is_none());
        let mesh = primitive::box_mesh(2.0);
        assert!(!mesh.is_empty());
        assert_eq!(mesh.bounds(), Some(Aabb::cube(2.0)));
    }
}
