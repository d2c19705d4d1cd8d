//! Thin wrappers over the browser DOM used by the web front end.

use rustc_hash::FxHashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, Window};

use crate::interaction::NavMenu;
use crate::labels::LabelAnchor;
use crate::scene::TileId;

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub(crate) fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub(crate) fn canvas(document: &Document, id: &str) -> Result<HtmlCanvasElement, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("#{id} is not a canvas")))
}

/// Viewport size in CSS pixels.
pub(crate) fn viewport_size(window: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| {
        v.ok().and_then(|v| v.as_f64()).map_or(1, |v| v.max(1.0) as u32)
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// Client coordinates relative to the canvas' top-left corner.
pub(crate) fn canvas_position(
    canvas: &HtmlCanvasElement,
    client_x: i32,
    client_y: i32,
) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (
        (f64::from(client_x) - rect.left()) as f32,
        (f64::from(client_y) - rect.top()) as f32,
    )
}

/// Register `handler` for `event` on `target` for the lifetime of the page.
pub(crate) fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// GET `url` and return the body bytes.
pub(crate) async fn fetch_bytes(url: &str) -> Result<Vec<u8>, JsValue> {
    let response = JsFuture::from(window()?.fetch_with_str(url)).await?;
    let response: web_sys::Response = response.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "HTTP {} for {url}",
            response.status()
        )));
    }
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Open `link` in a new tab.
pub(crate) fn open_link(link: &str) {
    match window().and_then(|w| w.open_with_url_and_target(link, "_blank")) {
        Ok(_) => log::info!("opened {link}"),
        Err(e) => log::warn!("failed to open {link}: {e:?}"),
    }
}

// ── Labels ───────────────────────────────────────────────────────────────

/// Absolutely positioned text elements tracking each tile's label anchor.
pub(crate) struct LabelOverlay {
    document: Document,
    items: FxHashMap<TileId, HtmlElement>,
}

impl LabelOverlay {
    pub(crate) fn new(document: Document) -> Self {
        Self {
            document,
            items: FxHashMap::default(),
        }
    }

    fn element(&mut self, anchor: &LabelAnchor) -> Result<&HtmlElement, JsValue> {
        if !self.items.contains_key(&anchor.tile) {
            let el: HtmlElement = self.document.create_element("div")?.dyn_into()?;
            el.set_class_name("tile-label");
            el.set_text_content(Some(&anchor.title));
            let style = el.style();
            style.set_property("position", "absolute")?;
            style.set_property("transform", "translate(-50%, -50%)")?;
            style.set_property("pointer-events", "none")?;
            style.set_property("color", "white")?;
            if let Some(body) = self.document.body() {
                let _ = body.append_child(&el)?;
            }
            let _ = self.items.insert(anchor.tile, el);
        }
        self.items
            .get(&anchor.tile)
            .ok_or_else(|| JsValue::from_str("label vanished"))
    }

    /// Move every label to its anchor; hide labels behind the camera.
    pub(crate) fn sync(&mut self, anchors: &[LabelAnchor]) -> Result<(), JsValue> {
        for anchor in anchors {
            let style = self.element(anchor)?.style();
            if anchor.visible {
                style.set_property("display", "block")?;
                style.set_property("left", &format!("{}px", anchor.x))?;
                style.set_property("top", &format!("{}px", anchor.y))?;
            } else {
                style.set_property("display", "none")?;
            }
        }
        Ok(())
    }

    /// Remove every label element.
    pub(crate) fn clear(&mut self) {
        for (_, el) in self.items.drain() {
            el.remove();
        }
    }
}

// ── Navigation menu ──────────────────────────────────────────────────────

/// Wire `#hamburger` to slide `#nav-menu` in and out. Pages without the
/// menu markup are left alone.
pub(crate) fn bind_nav_menu(document: &Document) -> Result<(), JsValue> {
    let (Some(button), Some(panel)) = (
        document.get_element_by_id("hamburger"),
        document.get_element_by_id("nav-menu"),
    ) else {
        log::debug!("no navigation menu on this page");
        return Ok(());
    };
    let panel: HtmlElement = panel.dyn_into()?;
    let mut menu = NavMenu::default();
    panel.style().set_property("right", menu.panel_offset())?;

    listen(&button, "click", move |_: web_sys::Event| {
        let offset = menu.toggle();
        if let Err(e) = panel.style().set_property("right", offset) {
            log::warn!("menu toggle failed: {e:?}");
        }
    })
}
