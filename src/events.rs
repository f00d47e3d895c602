use crate::dom;
use ambient_core::{CancelToken, InputState, Teardown};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// A registered DOM listener that can be removed again.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn add(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("add {event} listener: {:?}", e))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    pub fn remove(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
        log::debug!("[events] removed {} listener", self.event);
    }
}

#[derive(Clone)]
pub struct InputWiring {
    pub window: web::Window,
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub input: Rc<RefCell<InputState>>,
    pub token: CancelToken,
}

/// Subscribe to pointer, resize, scroll, visibility and document-size changes.
///
/// Handlers only write `InputState` (and resize the canvas). Each one is
/// guarded by the cancel token and its removal is registered on `teardown`.
/// A subscription that fails is logged and skipped.
pub fn wire_input_handlers(w: &InputWiring, teardown: &mut Teardown) {
    register(teardown, wire_pointermove(w));
    register(teardown, wire_pointerleave(w));
    register(teardown, wire_resize(w));
    register(teardown, wire_scroll(w));
    register(teardown, wire_visibility(w));
    if let Err(e) = wire_document_observer(w, teardown) {
        log::warn!("[events] document size observer unavailable: {e:?}");
    }
}

fn register(teardown: &mut Teardown, listener: anyhow::Result<Listener>) {
    match listener {
        Ok(l) => teardown.defer(move || l.remove()),
        Err(e) => log::warn!("[events] {e:?}"),
    }
}

fn wire_pointermove(w: &InputWiring) -> anyhow::Result<Listener> {
    let input = w.input.clone();
    Listener::add(
        &w.window,
        "pointermove",
        w.token.guard(move |ev: web::Event| {
            if let Some(m) = ev.dyn_ref::<web::MouseEvent>() {
                input
                    .borrow_mut()
                    .pointer_moved(m.client_x() as f32, m.client_y() as f32);
            }
        }),
    )
}

fn wire_pointerleave(w: &InputWiring) -> anyhow::Result<Listener> {
    let root = w
        .document
        .document_element()
        .ok_or_else(|| anyhow::anyhow!("no document element"))?;
    let input = w.input.clone();
    Listener::add(
        &root,
        "pointerleave",
        w.token.guard(move |_ev: web::Event| input.borrow_mut().pointer_left()),
    )
}

fn wire_resize(w: &InputWiring) -> anyhow::Result<Listener> {
    let wiring = w.clone();
    Listener::add(
        &w.window,
        "resize",
        w.token.guard(move |_ev: web::Event| resync_surface(&wiring)),
    )
}

fn wire_scroll(w: &InputWiring) -> anyhow::Result<Listener> {
    let window = w.window.clone();
    let input = w.input.clone();
    Listener::add(
        &w.window,
        "scroll",
        w.token.guard(move |_ev: web::Event| {
            let y = window.scroll_y().unwrap_or(0.0) as f32;
            input.borrow_mut().scrolled(y);
        }),
    )
}

fn wire_visibility(w: &InputWiring) -> anyhow::Result<Listener> {
    let document = w.document.clone();
    let input = w.input.clone();
    Listener::add(
        &w.document,
        "visibilitychange",
        w.token.guard(move |_ev: web::Event| {
            input.borrow_mut().hidden = document.hidden();
        }),
    )
}

fn wire_document_observer(w: &InputWiring, teardown: &mut Teardown) -> anyhow::Result<()> {
    let body = w
        .document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no document body"))?;
    let wiring = w.clone();
    let closure = Closure::wrap(Box::new(
        w.token.guard(move |_entries: JsValue| resync_surface(&wiring)),
    ) as Box<dyn FnMut(JsValue)>);
    let observer = web::ResizeObserver::new(closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("ResizeObserver: {:?}", e))?;
    observer.observe(&body);
    teardown.defer(move || {
        observer.disconnect();
        drop(closure);
        log::debug!("[events] disconnected document size observer");
    });
    Ok(())
}

/// Re-measure viewport width, document height, scroll and pixel ratio, and
/// resize the canvas backing store to match.
pub fn resync_surface(w: &InputWiring) {
    let measured = dom::measure_surface(&w.window, &w.document);
    let surface = {
        let mut input = w.input.borrow_mut();
        input.resized(measured.width, measured.height);
        input.surface.pixel_ratio = measured.pixel_ratio;
        input.scrolled(measured.scroll_y);
        input.surface
    };
    dom::sync_canvas_backing_size(&w.canvas, &surface);
    log::debug!(
        "[events] surface {:.0}x{:.0} @{:.1}x",
        surface.width,
        surface.height,
        surface.pixel_ratio
    );
}
