use ambient_core::{Rgba, Surface2d};
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// [`Surface2d`] backed by a browser `CanvasRenderingContext2d`.
///
/// Drawing coordinates are CSS pixels; the base transform scales them to the
/// device-pixel backing store.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    pixel_ratio: f64,
}

impl CanvasSurface {
    pub fn new(canvas: &web::HtmlCanvasElement, pixel_ratio: f32) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("get_context failed: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|_| anyhow::anyhow!("not a 2d context"))?;
        Ok(Self {
            ctx,
            pixel_ratio: pixel_ratio as f64,
        })
    }

    pub fn set_pixel_ratio(&mut self, pixel_ratio: f32) {
        self.pixel_ratio = pixel_ratio as f64;
    }

    #[inline]
    fn circle_path(&self, center: Vec2, radius: f32) -> bool {
        if radius.is_nan() || radius <= 0.0 {
            return false;
        }
        self.ctx.begin_path();
        self.ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
    }
}

impl Surface2d for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        let dpr = self.pixel_ratio;
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        let _ = self.ctx.translate(dx as f64, dy as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if self.circle_path(center, radius) {
            self.ctx.set_fill_style_str(&color.to_string());
            self.ctx.fill();
        }
    }

    fn fill_radial(&mut self, center: Vec2, radius: f32, stops: &[(f32, Rgba)]) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let (x, y) = (center.x as f64, center.y as f64);
        let Ok(gradient) = self
            .ctx
            .create_radial_gradient(x, y, 0.0, x, y, radius as f64)
        else {
            return;
        };
        for (offset, color) in stops {
            let _ = gradient.add_color_stop(offset.clamp(0.0, 1.0), &color.to_string());
        }
        if self.circle_path(center, radius) {
            self.ctx.set_fill_style_canvas_gradient(&gradient);
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba) {
        if self.circle_path(center, radius) {
            self.ctx.set_line_width(width as f64);
            self.ctx.set_stroke_style_str(&color.to_string());
            self.ctx.stroke();
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_line_width(width as f64);
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.stroke();
    }
}
