//! WebAssembly bindings for the drag surface
//!
//! Two ways to drive a diagram from the browser:
//!
//! * [`DragSurface`] keeps the model in wasm and hands every edit back as a
//!   JSON array of attribute changes for the page to apply.
//! * [`attach`] wires a live `<svg>` element directly: mouse listeners, the
//!   save trigger and DOM updates are all handled here.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Blob, BlobPropertyBag, Element, HtmlElement, MouseEvent, SvgGraphicsElement, Url, Window,
    XmlSerializer,
};

use crate::core::{DiagramError, Result as DiagramResult, ScreenTransform};
use crate::diagram::Diagram;
use crate::document::AttributeChange;
use crate::drag::{DragController, PointerSample};
use crate::export::{ExportArtifact, ExportOutcome, SaveSink};

const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

fn to_js(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn changes_json(changes: &[AttributeChange]) -> Result<String, JsValue> {
    serde_json::to_string(changes).map_err(to_js)
}

fn outcome_label(outcome: ExportOutcome) -> String {
    match outcome {
        ExportOutcome::NothingMoved => String::new(),
        ExportOutcome::Downloaded(file_name) => file_name,
    }
}

/// A diagram driven by pointer events from JavaScript
///
/// Pointer methods take the client position plus the six entries of the
/// surface's screen CTM, and return the attribute changes to apply.
#[wasm_bindgen]
pub struct DragSurface {
    controller: DragController,
}

#[wasm_bindgen]
impl DragSurface {
    /// Load SVG markup; `location` names exported files
    #[wasm_bindgen(constructor)]
    pub fn new(markup: &str, location: &str) -> Result<DragSurface, JsValue> {
        let diagram = Diagram::load(markup, location).map_err(to_js)?;
        Ok(Self {
            controller: DragController::new(diagram),
        })
    }

    /// Changes made so far and not yet returned, starting with initial routing
    pub fn pending_changes(&mut self) -> Result<String, JsValue> {
        changes_json(&self.controller.take_changes())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn pointer_down(
        &mut self,
        target_id: &str,
        client_x: f64,
        client_y: f64,
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
    ) -> Result<String, JsValue> {
        let pointer = PointerSample::new(client_x, client_y, ScreenTransform::new(a, b, c, d, e, f));
        self.controller.pointer_down(target_id, pointer);
        self.pending_changes()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
    ) -> Result<String, JsValue> {
        let pointer = PointerSample::new(client_x, client_y, ScreenTransform::new(a, b, c, d, e, f));
        self.controller.pointer_move(pointer);
        self.pending_changes()
    }

    pub fn pointer_up(&mut self) -> Result<String, JsValue> {
        self.controller.pointer_up();
        self.pending_changes()
    }

    pub fn pointer_leave(&mut self) -> Result<String, JsValue> {
        self.controller.pointer_leave();
        self.pending_changes()
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// The move-log as a JSON array of `{id, x, y}`
    pub fn positions_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.controller.move_log()).map_err(to_js)
    }

    /// Export through the browser; returns the file name, or "" when nothing moved
    pub fn save_positions(&self) -> Result<String, JsValue> {
        let mut sink = BrowserSink::new()?;
        let outcome = self.controller.generate_save_file(&mut sink).map_err(to_js)?;
        Ok(outcome_label(outcome))
    }
}

/// Notices through `window.alert`, downloads through a temporary link
pub struct BrowserSink {
    window: Window,
}

impl BrowserSink {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| to_js("no window"))?;
        Ok(Self { window })
    }

    fn try_download(&self, artifact: &ExportArtifact) -> Result<(), JsValue> {
        let options = BlobPropertyBag::new();
        options.set_type(artifact.mime);
        let parts = js_sys::Array::of1(&JsValue::from_str(&artifact.contents));
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
        let url = Url::create_object_url_with_blob(&blob)?;

        let document = self.window.document().ok_or_else(|| to_js("no document"))?;
        let root = document
            .document_element()
            .ok_or_else(|| to_js("no document element"))?;
        let link = document.create_element_ns(Some(XHTML_NS), "a")?;
        link.set_attribute("href", &url)?;
        link.set_attribute("download", &artifact.file_name)?;
        root.append_child(&link)?;
        if let Some(html) = link.dyn_ref::<HtmlElement>() {
            html.click();
        }
        link.remove();

        // The download reads the blob after this task ends
        let revoke = Closure::once_into_js(move || {
            if let Err(e) = Url::revoke_object_url(&url) {
                warn!(error = ?e, "Failed to revoke download URL");
            }
        });
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), 0)?;
        Ok(())
    }
}

impl SaveSink for BrowserSink {
    fn notify(&mut self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            warn!(error = ?e, "alert failed");
        }
    }

    fn download(&mut self, artifact: &ExportArtifact) -> DiagramResult<()> {
        self.try_download(artifact)
            .map_err(|e| DiagramError::host_error(format!("{:?}", e)))
    }
}

type Shared = Rc<RefCell<DragController>>;

/// Make a live `<svg>` element draggable
///
/// The element is serialized as XML and loaded as the model. Connectors are
/// routed immediately, and the save trigger (default id `saveButtonGroup`)
/// exports the move-log.
#[wasm_bindgen]
pub fn attach(svg: Element, location: &str) -> Result<(), JsValue> {
    let markup = XmlSerializer::new()?.serialize_to_string(&svg)?;
    let diagram = Diagram::load(&markup, location).map_err(to_js)?;
    let save_trigger = format!("#{}", diagram.config().save_trigger_id);
    let controller: Shared = Rc::new(RefCell::new(DragController::new(diagram)));
    flush(&svg, &controller)?;

    let (ctl, root) = (controller.clone(), svg.clone());
    listen(&svg, "mousedown", move |ev| {
        ev.prevent_default();
        let Some(target) = ev.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let pointer = sample(&root, &ev);
        ctl.borrow_mut().pointer_down(&target.id(), pointer);
        log_failure(flush(&root, &ctl));
    })?;

    let (ctl, root) = (controller.clone(), svg.clone());
    listen(&svg, "mousemove", move |ev| {
        if !ctl.borrow().is_dragging() {
            return;
        }
        ev.prevent_default();
        let pointer = sample(&root, &ev);
        ctl.borrow_mut().pointer_move(pointer);
        log_failure(flush(&root, &ctl));
    })?;

    let ctl = controller.clone();
    listen(&svg, "mouseup", move |_| {
        ctl.borrow_mut().pointer_up();
    })?;

    let ctl = controller.clone();
    listen(&svg, "mouseleave", move |_| {
        ctl.borrow_mut().pointer_leave();
    })?;

    let ctl = controller;
    listen(&svg, "click", move |ev| {
        let on_trigger = ev
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&save_trigger).ok().flatten())
            .is_some();
        if !on_trigger {
            return;
        }
        let result = BrowserSink::new().and_then(|mut sink| {
            ctl.borrow().generate_save_file(&mut sink).map_err(to_js)
        });
        log_failure(result.map(|_| ()));
    })?;

    Ok(())
}

fn listen(
    target: &Element,
    event: &str,
    handler: impl FnMut(MouseEvent) + 'static,
) -> Result<(), JsValue> {
    let callback = Closure::<dyn FnMut(MouseEvent)>::new(handler);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    // Listeners live as long as the page
    callback.forget();
    Ok(())
}

fn sample(svg: &Element, ev: &MouseEvent) -> PointerSample {
    let transform = svg
        .dyn_ref::<SvgGraphicsElement>()
        .and_then(|g| g.get_screen_ctm())
        .map(|m| {
            ScreenTransform::new(
                m.a() as f64,
                m.b() as f64,
                m.c() as f64,
                m.d() as f64,
                m.e() as f64,
                m.f() as f64,
            )
        })
        .unwrap_or_else(|| {
            warn!("No screen CTM, assuming identity");
            ScreenTransform::IDENTITY
        });
    PointerSample::new(ev.client_x() as f64, ev.client_y() as f64, transform)
}

/// Apply pending model edits to the live element tree
fn flush(svg: &Element, controller: &Shared) -> Result<(), JsValue> {
    let changes = controller.borrow_mut().take_changes();
    for change in &changes {
        let Some(element) = resolve(svg, &change.path) else {
            warn!(path = ?change.path, id = ?change.id, "Changed element not found in DOM");
            continue;
        };
        element.set_attribute(&change.name, &change.value)?;
    }
    Ok(())
}

fn resolve(svg: &Element, path: &[usize]) -> Option<Element> {
    path.iter().try_fold(svg.clone(), |el, &index| {
        el.children().item(u32::try_from(index).ok()?)
    })
}

fn log_failure(result: Result<(), JsValue>) {
    if let Err(e) = result {
        warn!(error = ?e, "Browser call failed");
    }
}
