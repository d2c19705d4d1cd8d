//! Browser front end: canvas rendering, DOM label overlay, and the
//! navigation menu.
//!
//! The page calls [`start`] with the canvas id, the project manifest as
//! JSON, and the base URL icons are fetched from. Everything else runs on
//! the browser's animation-frame loop.

mod dom;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

use self::dom::LabelOverlay;
use crate::assets::{icon, primitive, AssetLoadError, AssetRequest, LoadCompletion};
use crate::gpu::RenderContext;
use crate::options::Options;
use crate::renderer::SceneRenderer;
use crate::scene::ProjectManifest;
use crate::util::FrameClock;
use crate::{InputEvent, PointerSource, ShowcaseEngine};

struct WebApp {
    engine: ShowcaseEngine,
    context: RenderContext,
    renderer: SceneRenderer,
    canvas: HtmlCanvasElement,
    labels: LabelOverlay,
    clock: FrameClock,
}

type Shared = Rc<RefCell<WebApp>>;

impl WebApp {
    fn dispatch(&mut self, event: InputEvent) {
        let mut opener = |link: &str| dom::open_link(link);
        let _ = self.engine.handle_input(event, &mut opener);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.context.resize(width, height);
        self.renderer.resize(&self.context);
        self.dispatch(InputEvent::Resized { width, height });
    }

    fn frame(&mut self) {
        let tick = self.clock.tick();
        self.engine.update(tick);
        match self.renderer.render(&self.context, &self.engine) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                self.context.reconfigure();
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
        if let Err(e) = self.labels.sync(&self.engine.labels()) {
            log::warn!("label overlay: {e:?}");
        }
    }
}

/// Start the showcase on the canvas with id `canvas_id`.
///
/// `manifest_json` is either `{"projects": [...]}` or a bare array; an
/// empty string shows placeholders. Icon paths are resolved against
/// `asset_base`.
///
/// # Errors
///
/// Returns an error if the manifest is malformed. GPU and DOM failures
/// after startup are logged to the console.
#[wasm_bindgen]
pub fn start(canvas_id: String, manifest_json: &str, asset_base: String) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let manifest = if manifest_json.trim().is_empty() {
        ProjectManifest::placeholder()
    } else {
        ProjectManifest::from_json(manifest_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    log::info!("vitrine starting with {} projects", manifest.len());

    spawn_local(async move {
        if let Err(e) = init(&canvas_id, manifest, asset_base).await {
            log::error!("init error: {e:?}");
        }
    });
    Ok(())
}

async fn init(
    canvas_id: &str,
    manifest: ProjectManifest,
    asset_base: String,
) -> Result<(), JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;
    let canvas = dom::canvas(&document, canvas_id)?;
    dom::bind_nav_menu(&document)?;

    let (width, height) = dom::viewport_size(&window);
    canvas.set_width(width);
    canvas.set_height(height);

    let context = RenderContext::new(wgpu::SurfaceTarget::Canvas(canvas.clone()), (width, height))
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let options = Options::default();
    let renderer = SceneRenderer::new(&context, &options.lighting);
    let mut engine = ShowcaseEngine::new(options, manifest, width, height);
    let requests = engine.begin_loads();

    let app: Shared = Rc::new(RefCell::new(WebApp {
        engine,
        context,
        renderer,
        canvas: canvas.clone(),
        labels: LabelOverlay::new(document),
        clock: FrameClock::default(),
    }));

    for request in requests {
        load_asset(app.clone(), request, asset_base.clone());
    }
    bind_input(&app, &canvas)?;
    bind_resize(&app, &window)?;
    bind_unload(&app, &window)?;
    start_frame_loop(app)
}

/// Produce a tile's body: a box right away, or a fetched icon once it
/// arrives.
fn load_asset(app: Shared, request: AssetRequest, asset_base: String) {
    let AssetRequest {
        tile,
        icon: icon_path,
        size,
    } = request;
    let Some(icon_path) = icon_path else {
        app.borrow_mut().engine.complete_load(LoadCompletion {
            tile,
            result: Ok(primitive::box_asset(size)),
        });
        return;
    };

    spawn_local(async move {
        let url = format!("{}/{icon_path}", asset_base.trim_end_matches('/'));
        let result = match dom::fetch_bytes(&url).await {
            Ok(bytes) => icon::decode_slice(&bytes, size, &icon_path),
            Err(e) => Err(AssetLoadError::Io {
                path: url.into(),
                source: std::io::Error::other(format!("{e:?}")),
            }),
        };
        app.borrow_mut()
            .engine
            .complete_load(LoadCompletion { tile, result });
    });
}

fn bind_input(app: &Shared, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let target: &web_sys::EventTarget = canvas;

    let (a, c) = (app.clone(), canvas.clone());
    dom::listen(target, "mousemove", move |event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            let (x, y) = dom::canvas_position(&c, event.client_x(), event.client_y());
            a.borrow_mut().dispatch(InputEvent::PointerMoved {
                x,
                y,
                source: PointerSource::Mouse,
            });
        }
    })?;

    let (a, c) = (app.clone(), canvas.clone());
    dom::listen(target, "mousedown", move |event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            let (x, y) = dom::canvas_position(&c, event.client_x(), event.client_y());
            a.borrow_mut().dispatch(InputEvent::PointerDown {
                x,
                y,
                source: PointerSource::Mouse,
            });
        }
    })?;

    for kind in ["touchstart", "touchmove"] {
        let (a, c) = (app.clone(), canvas.clone());
        let started = kind == "touchstart";
        dom::listen(target, kind, move |event| {
            let Some(touch) = event
                .dyn_ref::<TouchEvent>()
                .and_then(|t| t.touches().get(0))
            else {
                return;
            };
            let (x, y) = dom::canvas_position(&c, touch.client_x(), touch.client_y());
            let source = PointerSource::Touch;
            let mut app = a.borrow_mut();
            app.dispatch(InputEvent::PointerMoved { x, y, source });
            if started {
                app.dispatch(InputEvent::PointerDown { x, y, source });
            }
        })?;
    }
    Ok(())
}

fn bind_resize(app: &Shared, window: &web_sys::Window) -> Result<(), JsValue> {
    let a = app.clone();
    let w = window.clone();
    dom::listen(window, "resize", move |_| {
        let (width, height) = dom::viewport_size(&w);
        a.borrow_mut().resize(width, height);
    })
}

fn bind_unload(app: &Shared, window: &web_sys::Window) -> Result<(), JsValue> {
    let a = app.clone();
    dom::listen(window, "pagehide", move |_| {
        let mut app = a.borrow_mut();
        app.engine.teardown();
        app.labels.clear();
    })
}

fn start_frame_loop(app: Shared) -> Result<(), JsValue> {
    let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = callback.clone();

    *callback.borrow_mut() = Some(Closure::new(move || {
        app.borrow_mut().frame();
        if let Some(cb) = next.borrow().as_ref() {
            if let Err(e) = request_frame(cb) {
                log::error!("frame loop stopped: {e:?}");
            }
        }
    }));

    let first = callback.borrow();
    let cb = first
        .as_ref()
        .ok_or_else(|| JsValue::from_str("frame callback missing"))?;
    request_frame(cb)
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Result<(), JsValue> {
    let _ = dom::window()?.request_animation_frame(cb.as_ref().unchecked_ref())?;
    Ok(())
}
