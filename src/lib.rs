#![cfg(target_arch = "wasm32")]
use ambient_core::{AmbientField, BackgroundOptions, CancelToken, InputState, Intensity, Teardown};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod canvas;
mod constants;
mod dom;
mod events;
mod frame;

use constants::{ATTR_CONNECTION_DISTANCE, ATTR_INTENSITY, ATTR_PARTICLE_COUNT};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ambient-web loaded");
    Ok(())
}

/// Owns one mounted background. `destroy()` (or dropping the handle) stops
/// the loop and removes every subscription.
#[wasm_bindgen]
pub struct BackgroundHandle {
    teardown: Option<Teardown>,
}

#[wasm_bindgen]
impl BackgroundHandle {
    pub fn destroy(&mut self) {
        if let Some(mut teardown) = self.teardown.take() {
            teardown.run();
            log::info!("[mount] background destroyed");
        }
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.teardown.as_ref().is_some_and(|t| !t.token().is_cancelled())
    }
}

/// Mount the background on `<canvas id=canvas_id>`.
///
/// Never throws: when the canvas or its 2D context is unavailable the page
/// keeps working and the returned handle is inert.
#[wasm_bindgen(js_name = mountBackground)]
pub fn mount_background(
    canvas_id: &str,
    intensity: Option<String>,
    particle_count: Option<u32>,
    connection_distance: Option<f32>,
) -> BackgroundHandle {
    match mount(canvas_id, intensity, particle_count, connection_distance) {
        Ok(teardown) => BackgroundHandle {
            teardown: Some(teardown),
        },
        Err(e) => {
            log::warn!("[mount] background disabled: {e:?}");
            BackgroundHandle { teardown: None }
        }
    }
}

/// Mount arguments win; `data-*` attributes on the canvas fill the gaps.
fn resolve_options(
    canvas: &web::HtmlCanvasElement,
    intensity: Option<String>,
    particle_count: Option<u32>,
    connection_distance: Option<f32>,
) -> BackgroundOptions {
    let attrs = BackgroundOptions::from_attributes(
        dom::data_attr(canvas, ATTR_INTENSITY).as_deref(),
        dom::data_attr(canvas, ATTR_PARTICLE_COUNT).as_deref(),
        dom::data_attr(canvas, ATTR_CONNECTION_DISTANCE).as_deref(),
    );
    BackgroundOptions {
        intensity: intensity
            .as_deref()
            .map(Intensity::parse_or_default)
            .unwrap_or(attrs.intensity),
        particle_count: particle_count.map(|n| n as usize).or(attrs.particle_count),
        connection_distance: connection_distance.or(attrs.connection_distance),
    }
}

fn mount(
    canvas_id: &str,
    intensity: Option<String>,
    particle_count: Option<u32>,
    connection_distance: Option<f32>,
) -> anyhow::Result<Teardown> {
    // The token exists before any listener or frame is scheduled. Returning
    // early drops the teardown, which undoes whatever was registered.
    let mut teardown = Teardown::new(CancelToken::new());

    let (window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{canvas_id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let options = resolve_options(&canvas, intensity, particle_count, connection_distance);
    let config = options.resolve();

    let surface_state = dom::measure_surface(&window, &document);
    dom::apply_canvas_style(&canvas);
    dom::sync_canvas_backing_size(&canvas, &surface_state);
    let surface = canvas::CanvasSurface::new(&canvas, surface_state.pixel_ratio)?;

    let input = Rc::new(RefCell::new(InputState {
        surface: surface_state,
        hidden: document.hidden(),
        ..Default::default()
    }));

    events::wire_input_handlers(
        &events::InputWiring {
            window: window.clone(),
            document: document.clone(),
            canvas: canvas.clone(),
            input: input.clone(),
            token: teardown.token().clone(),
        },
        &mut teardown,
    );

    let field = AmbientField::new(config, &surface_state, StdRng::from_entropy());
    let frame_ctx = frame::FrameContext {
        field,
        surface,
        input,
        last_instant: Instant::now(),
    };

    let canvas_fade = canvas.clone();
    frame::start_loop(frame_ctx, &window, &mut teardown, move || {
        dom::set_canvas_opacity(&canvas_fade, config.opacity)
    })?;
    teardown.defer(move || dom::set_canvas_opacity(&canvas, 0.0));

    log::info!(
        "[mount] #{canvas_id} intensity={} {:.0}x{:.0}",
        options.intensity,
        surface_state.width,
        surface_state.height
    );
    Ok(teardown)
}
