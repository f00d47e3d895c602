use crate::canvas::CanvasSurface;
use crate::constants::STARTUP_DELAY_MS;
use ambient_core::{AmbientField, InputState, Teardown};
use instant::Instant;
use rand::rngs::StdRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub field: AmbientField<StdRng>,
    pub surface: CanvasSurface,
    pub input: Rc<RefCell<InputState>>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        // One snapshot per frame; handlers may write again before the next.
        let input = *self.input.borrow();
        self.surface.set_pixel_ratio(input.surface.pixel_ratio);
        self.field.frame(input, dt, &mut self.surface);
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(window: &web::Window, tick: &Tick, pending: &Cell<Option<i32>>) {
    if let Some(cb) = tick.borrow().as_ref() {
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => pending.set(Some(id)),
            Err(e) => log::warn!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }
}

/// After the startup delay run `on_start` and drive `frame_ctx` from
/// `requestAnimationFrame` until the teardown's token is cancelled.
///
/// Teardown cancels the pending frame and the startup timer and drops the
/// tick closure, which also breaks its self-reference.
pub fn start_loop(
    frame_ctx: FrameContext,
    window: &web::Window,
    teardown: &mut Teardown,
    on_start: impl FnOnce() + 'static,
) -> anyhow::Result<()> {
    let token = teardown.token().clone();
    let frame_ctx = Rc::new(RefCell::new(frame_ctx));
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: Tick = Rc::new(RefCell::new(None));

    {
        let tick_clone = tick.clone();
        let pending_tick = pending.clone();
        let window_tick = window.clone();
        let token_tick = token.clone();
        let frame_ctx_tick = frame_ctx.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            if token_tick.is_cancelled() {
                return;
            }
            frame_ctx_tick.borrow_mut().frame();
            request_frame(&window_tick, &tick_clone, &pending_tick);
        }) as Box<dyn FnMut()>));
    }

    let start: Closure<dyn FnMut()> = {
        let tick = tick.clone();
        let pending = pending.clone();
        let window = window.clone();
        Closure::once(move || {
            if token.is_cancelled() {
                return;
            }
            on_start();
            frame_ctx.borrow_mut().last_instant = Instant::now();
            request_frame(&window, &tick, &pending);
            log::info!("[frame] loop started");
        })
    };
    let timer = match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        start.as_ref().unchecked_ref(),
        STARTUP_DELAY_MS,
    ) {
        Ok(id) => id,
        Err(e) => {
            tick.borrow_mut().take();
            return Err(anyhow::anyhow!("setTimeout failed: {:?}", e));
        }
    };

    let window = window.clone();
    teardown.defer(move || {
        window.clear_timeout_with_handle(timer);
        if let Some(id) = pending.take() {
            let _ = window.cancel_animation_frame(id);
        }
        drop(start);
        tick.borrow_mut().take();
        log::debug!("[frame] loop stopped");
    });
    Ok(())
}
