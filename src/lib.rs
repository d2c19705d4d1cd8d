//! Interactive 3D portfolio grid built on wgpu.
//!
//! Vitrine lays project tiles out in a responsive, camera-facing grid,
//! picks the tile under the pointer with CPU ray tests, animates hover
//! feedback, and opens a tile's link on click or tap.
//!
//! # Key entry points
//!
//! - [`engine::ShowcaseEngine`] - owns the scene and drives layout, picking,
//!   hover and per-frame animation
//! - [`renderer::SceneRenderer`] - draws tiles and the star field
//! - [`options::Options`] - runtime configuration (layout, hover, camera,
//!   stars, lighting)
//! - [`scene::ProjectManifest`] - the list of projects to show
//!
//! # Architecture
//!
//! The engine is GPU-free: hosts feed it [`input::InputEvent`]s and a
//! per-frame [`util::frame_timing::FrameTick`], and read back display
//! transforms and [`labels::LabelAnchor`]s. Asset loads complete
//! asynchronously through [`assets::AssetLoader`]; each tile joins the
//! layout only once its load settles. The native viewer (`viewer` feature)
//! and the browser front end (`web` feature) are thin hosts around the
//! engine and the renderer.

pub mod animation;
pub mod assets;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod interaction;
pub mod labels;
pub mod layout;
pub mod options;
pub mod picking;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use engine::ShowcaseEngine;
pub use error::VitrineError;
pub use input::{InputEvent, PointerSource};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
