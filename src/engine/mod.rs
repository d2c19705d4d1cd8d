//! The showcase engine: scene ownership, input dispatch and the frame update.

mod accessors;
mod input;
mod loading;
mod options;

use glam::Vec2;

pub use self::input::InputResponse;
use crate::animation::{AnimationDriver, StarField};
use crate::assets::{AssetLoader, LoadTracker};
use crate::camera::controller::CameraController;
use crate::input::Viewport;
use crate::interaction::HoverController;
use crate::options::Options;
use crate::scene::{ProjectManifest, SceneState};
use crate::util::frame_timing::FrameTick;

/// The portfolio showcase: tiles, picking, hover, and per-frame motion.
///
/// The engine is GPU-free and single-threaded. Hosts own one instance,
/// forward [`InputEvent`](crate::InputEvent)s to
/// [`handle_input`](Self::handle_input), call [`update`](Self::update) once
/// per frame, and read tile transforms back for drawing.
///
/// # Loading
///
/// Each project's body asset loads independently, either on worker threads
/// ([`start_loading`](Self::start_loading)) or inline
/// ([`load_inline`](Self::load_inline)). Tiles join the grid as their
/// loads complete; a failed load is logged and its tile never appears.
///
/// # Frame loop
///
/// ```ignore
/// let tick = clock.tick();
/// engine.update(tick);
/// renderer.render(&mut context, &engine)?;
/// ```
pub struct ShowcaseEngine {
    options: Options,
    manifest: ProjectManifest,
    scene: SceneState,
    loads: LoadTracker,
    loader: Option<AssetLoader>,
    camera: CameraController,
    viewport: Viewport,
    hover: HoverController,
    driver: AnimationDriver,
    stars: Option<StarField>,
    /// Last pointer position in NDC, for star parallax.
    pointer_ndc: Vec2,
    /// Engine clock, seconds.
    elapsed: f32,
}

impl ShowcaseEngine {
    /// Engine for `manifest` in a viewport of `width` x `height` pixels.
    ///
    /// No tile exists until loads are started.
    #[must_use]
    pub fn new(options: Options, manifest: ProjectManifest, width: u32, height: u32) -> Self {
        let camera = CameraController::new(&options.camera, width, height);
        let driver = AnimationDriver::new(options.animation.clone(), options.hover.clone());
        let stars = options.stars.enabled.then(|| StarField::new(&options.stars));
        log::info!(
            "showcase engine: {} projects, {width}x{height}, {:?} hover feedback",
            manifest.len(),
            options.hover.feedback
        );
        Self {
            options,
            manifest,
            scene: SceneState::new(),
            loads: LoadTracker::new(),
            loader: None,
            camera,
            viewport: Viewport::new(width, height),
            hover: HoverController::new(),
            driver,
            stars,
            pointer_ndc: Vec2::ZERO,
            elapsed: 0.0,
        }
    }

    /// Advance one frame: apply finished loads, animate tiles, turn the
    /// star field.
    pub fn update(&mut self, tick: FrameTick) {
        self.elapsed = tick.elapsed;
        self.poll_loads();
        self.driver.tick(self.scene.tiles_mut(), self.elapsed);
        if let Some(stars) = &mut self.stars {
            stars.update(tick.dt, self.pointer_ndc);
        }
    }

    /// Drop every tile and stop loading. The engine stays usable; loads
    /// can be started again.
    pub fn teardown(&mut self) {
        if let Some(mut loader) = self.loader.take() {
            loader.shutdown();
        }
        self.scene.teardown();
        self.hover.reset();
        self.loads = LoadTracker::new();
        log::info!("showcase engine torn down");
    }

    fn relayout(&mut self) {
        let _ = crate::layout::apply(
            self.viewport.width,
            self.scene.tiles_mut(),
            &self.options.layout,
        );
        self.driver.place(self.scene.tiles_mut(), self.elapsed);
    }
}
