//! Plain-data state written by input handlers and snapshotted once per frame.

use glam::Vec2;

/// Pointer position in document space. Last write wins.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub active: bool,
}

impl PointerState {
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Position if the pointer is over the tracked region.
    #[inline]
    pub fn active_position(&self) -> Option<Vec2> {
        self.active.then(|| self.position())
    }
}

/// Drawing surface extent in CSS pixels plus the current scroll offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceState {
    pub width: f32,
    pub height: f32,
    pub scroll_y: f32,
    pub pixel_ratio: f32,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            scroll_y: 0.0,
            pixel_ratio: 1.0,
        }
    }
}

impl SurfaceState {
    /// Lower `pixel_ratio` until the backing store fits within `max_side`
    /// device pixels per edge and `max_area` device pixels in total.
    ///
    /// The ratio may drop below 1 on very tall documents; the canvas is then
    /// upscaled by the browser instead of failing to allocate.
    pub fn fit_backing_store(mut self, max_side: u32, max_area: u64) -> Self {
        let requested = if self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0 {
            self.pixel_ratio as f64
        } else {
            1.0
        };
        let (w, h) = (self.width.max(0.0) as f64, self.height.max(0.0) as f64);
        let mut ratio = requested;
        if w > 0.0 {
            ratio = ratio.min(max_side as f64 / w);
        }
        if h > 0.0 {
            ratio = ratio.min(max_side as f64 / h);
        }
        if w > 0.0 && h > 0.0 {
            ratio = ratio.min((max_area as f64 / (w * h)).sqrt());
        }
        if ratio < requested {
            log::debug!(
                "[surface] pixel ratio {:.2} -> {:.3} for {:.0}x{:.0}",
                requested,
                ratio,
                w,
                h
            );
        }
        // Round toward zero so the limits still hold in f32.
        let mut fitted = ratio as f32;
        if fitted as f64 > ratio {
            fitted = f32::from_bits(fitted.to_bits() - 1);
        }
        self.pixel_ratio = fitted;
        self
    }

    /// Backing store size in device pixels, at least 1x1.
    pub fn backing_size(&self) -> (u32, u32) {
        let dpr = self.pixel_ratio.max(0.0) as f64;
        let w_px = (self.width.max(0.0) as f64 * dpr).floor() as u32;
        let h_px = (self.height.max(0.0) as f64 * dpr).floor() as u32;
        (w_px.max(1), h_px.max(1))
    }
}

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct InputState {
    pub pointer: PointerState,
    pub surface: SurfaceState,
    /// Set while the host document is hidden; frames are skipped.
    pub hidden: bool,
}

impl InputState {
    /// Record a pointer move given viewport (client) coordinates.
    pub fn pointer_moved(&mut self, client_x: f32, client_y: f32) {
        self.pointer = PointerState {
            x: client_x,
            y: client_y + self.surface.scroll_y,
            active: true,
        };
    }

    pub fn pointer_left(&mut self) {
        self.pointer.active = false;
    }

    /// Record a new scroll offset. An active pointer keeps its viewport
    /// position, so its document position moves with the page.
    pub fn scrolled(&mut self, scroll_y: f32) {
        let delta = scroll_y - self.surface.scroll_y;
        self.surface.scroll_y = scroll_y;
        if self.pointer.active {
            self.pointer.y += delta;
        }
    }

    pub fn resized(&mut self, width: f32, height: f32) {
        self.surface.width = width.max(0.0);
        self.surface.height = height.max(0.0);
    }
}
