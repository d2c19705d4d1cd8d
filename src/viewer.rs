//! Standalone showcase window backed by winit.
//!
//! ```no_run
//! # use vitrine::Viewer;
//! # use vitrine::scene::ProjectManifest;
//! Viewer::builder()
//!     .with_manifest(ProjectManifest::placeholder())
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    assets::ProjectAssetProvider,
    error::VitrineError,
    gpu::RenderContext,
    options::Options,
    renderer::SceneRenderer,
    scene::ProjectManifest,
    util::FrameClock,
    InputEvent, PointerSource, ShowcaseEngine,
};

/// Frames between FPS log lines.
const FPS_LOG_INTERVAL: u64 = 600;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    manifest: Option<ProjectManifest>,
    options: Option<Options>,
    title: String,
    icon_root: PathBuf,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            manifest: None,
            options: None,
            title: "Vitrine".into(),
            icon_root: PathBuf::from("assets"),
        }
    }

    /// Projects to show. Defaults to nine placeholders.
    #[must_use]
    pub fn with_manifest(mut self, manifest: ProjectManifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Directory icon paths in the manifest are relative to.
    #[must_use]
    pub fn with_icon_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.icon_root = root.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            manifest: self.manifest.unwrap_or_else(ProjectManifest::placeholder),
            options: self.options.unwrap_or_default(),
            title: self.title,
            icon_root: self.icon_root,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the project grid.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop. Activated links open in the system browser.
pub struct Viewer {
    manifest: ProjectManifest,
    options: Options,
    title: String,
    icon_root: PathBuf,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::Viewer`] if the event loop cannot be created
    /// or exits with an error.
    pub fn run(self) -> Result<(), VitrineError> {
        let event_loop =
            EventLoop::new().map_err(|e| VitrineError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            gpu: None,
            engine: None,
            clock: FrameClock::default(),
            cursor: None,
            viewer: self,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| VitrineError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct Gpu {
    context: RenderContext,
    renderer: SceneRenderer,
}

struct ViewerApp {
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    engine: Option<ShowcaseEngine>,
    clock: FrameClock,
    /// Last cursor position; mouse buttons carry none of their own.
    cursor: Option<(f32, f32)>,
    viewer: Viewer,
}

fn open_in_browser(link: &str) {
    if link.is_empty() || link == "#" {
        log::info!("tile has no link");
        return;
    }
    log::info!("opening {link}");
    if let Err(e) = webbrowser::open(link) {
        log::warn!("failed to open {link}: {e}");
    }
}

fn touch_events(touch: Touch) -> Vec<InputEvent> {
    let (x, y) = (touch.location.x as f32, touch.location.y as f32);
    let source = PointerSource::Touch;
    match touch.phase {
        TouchPhase::Started => vec![
            InputEvent::PointerMoved { x, y, source },
            InputEvent::PointerDown { x, y, source },
        ],
        TouchPhase::Moved => vec![InputEvent::PointerMoved { x, y, source }],
        TouchPhase::Ended | TouchPhase::Cancelled => Vec::new(),
    }
}

impl ViewerApp {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), VitrineError> {
        let attrs = Window::default_attributes()
            .with_title(self.viewer.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| VitrineError::Viewer(e.to_string()))?,
        );

        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));
        let context =
            pollster::block_on(RenderContext::new(window.clone(), (width, height)))?;
        let renderer = SceneRenderer::new(&context, &self.viewer.options.lighting);

        let mut engine = ShowcaseEngine::new(
            self.viewer.options.clone(),
            self.viewer.manifest.clone(),
            width,
            height,
        );
        let provider = Arc::new(ProjectAssetProvider::new(self.viewer.icon_root.clone()));
        let _ = engine.start_loading(provider)?;

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(Gpu { context, renderer });
        self.engine = Some(engine);
        Ok(())
    }

    fn dispatch(&mut self, event: InputEvent) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        let response = engine.handle_input(event, &mut open_in_browser);
        if response.hover.is_empty() {
            return;
        }
        // No text pass natively: the hovered tile's label goes in the title bar.
        let title = response
            .hover
            .entered
            .and_then(|id| engine.tile(id))
            .map_or_else(
                || self.viewer.title.clone(),
                |tile| format!("{} | {}", tile.title, self.viewer.title),
            );
        if let Some(window) = &self.window {
            window.set_title(&title);
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(gpu) = &mut self.gpu {
            gpu.context.resize(width, height);
            gpu.renderer.resize(&gpu.context);
        }
        self.dispatch(InputEvent::Resized { width, height });
    }

    fn redraw(&mut self) {
        let tick = self.clock.tick();
        let (Some(engine), Some(gpu)) = (&mut self.engine, &mut self.gpu) else {
            return;
        };
        engine.update(tick);

        match gpu.renderer.render(&gpu.context, engine) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                gpu.context.reconfigure();
            }
            Err(e) => log::error!("render error: {e:?}"),
        }

        if tick.frame > 0 && tick.frame % FPS_LOG_INTERVAL == 0 {
            log::debug!("{:.1} fps, {} tiles", self.clock.fps(), engine.tiles().len());
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("failed to start viewer: {e}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(engine) = &mut self.engine {
                engine.teardown();
            }
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::Resized(size) => self.resize(size.width, size.height),

            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                self.cursor = Some((x, y));
                self.dispatch(InputEvent::PointerMoved {
                    x,
                    y,
                    source: PointerSource::Mouse,
                });
            }

            WindowEvent::CursorLeft { .. } => self.cursor = None,

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some((x, y)) = self.cursor {
                    self.dispatch(InputEvent::PointerDown {
                        x,
                        y,
                        source: PointerSource::Mouse,
                    });
                }
            }

            WindowEvent::Touch(touch) => {
                for event in touch_events(touch) {
                    self.dispatch(event);
                }
            }

            _ => (),
        }
    }
}
