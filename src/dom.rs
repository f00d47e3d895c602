use crate::constants::{
    CANVAS_Z_INDEX, FADE_IN_MS, MAX_CANVAS_AREA_PX, MAX_CANVAS_SIDE_PX, MAX_PIXEL_RATIO,
};
use ambient_core::SurfaceState;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

#[inline]
pub fn pixel_ratio(window: &web::Window) -> f64 {
    window.device_pixel_ratio().clamp(1.0, MAX_PIXEL_RATIO)
}

/// Full scrollable document height in CSS pixels.
pub fn document_height(document: &web::Document) -> f64 {
    let root = document
        .document_element()
        .map(|el| el.scroll_height())
        .unwrap_or(0);
    let body = document.body().map(|b| b.scroll_height()).unwrap_or(0);
    root.max(body) as f64
}

pub fn viewport_width(window: &web::Window, document: &web::Document) -> f64 {
    match document.document_element() {
        Some(el) if el.client_width() > 0 => el.client_width() as f64,
        _ => window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0),
    }
}

/// Viewport width × document height, current scroll and the pixel ratio the
/// backing store can afford at that size.
pub fn measure_surface(window: &web::Window, document: &web::Document) -> SurfaceState {
    SurfaceState {
        width: viewport_width(window, document) as f32,
        height: document_height(document) as f32,
        scroll_y: window.scroll_y().unwrap_or(0.0) as f32,
        pixel_ratio: pixel_ratio(window) as f32,
    }
    .fit_backing_store(MAX_CANVAS_SIDE_PX, MAX_CANVAS_AREA_PX)
}

/// Match the canvas backing store to the surface, in device pixels.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, surface: &SurfaceState) {
    let (w_px, h_px) = surface.backing_size();
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", surface.width));
    let _ = style.set_property("height", &format!("{}px", surface.height));
}

/// Fixed behind all content, transparent to pointer input, hidden until fade-in.
pub fn apply_canvas_style(canvas: &web::HtmlCanvasElement) {
    let style = canvas.style();
    let _ = style.set_property("position", "fixed");
    let _ = style.set_property("top", "0");
    let _ = style.set_property("left", "0");
    let _ = style.set_property("pointer-events", "none");
    let _ = style.set_property("z-index", &CANVAS_Z_INDEX.to_string());
    let _ = style.set_property("opacity", "0");
    let _ = style.set_property("transition", &format!("opacity {FADE_IN_MS}ms ease-in"));
}

#[inline]
pub fn set_canvas_opacity(canvas: &web::HtmlCanvasElement, opacity: f32) {
    let _ = canvas.style().set_property("opacity", &format!("{opacity:.2}"));
}

#[inline]
pub fn data_attr(canvas: &web::HtmlCanvasElement, name: &str) -> Option<String> {
    canvas.get_attribute(name).filter(|s| !s.trim().is_empty())
}
