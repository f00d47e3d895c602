// Shared helpers for host-side tests.

#![allow(dead_code)]
use ambient_core::*;
use glam::Vec2;

/// Every call made on a [`Surface2d`], in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Clear(f32, f32),
    Save,
    Restore,
    Translate(f32, f32),
    FillCircle(Vec2, f32, Rgba),
    FillRadial(Vec2, f32, Vec<(f32, Rgba)>),
    StrokeCircle(Vec2, f32, f32, Rgba),
    StrokeLine(Vec2, Vec2, f32, Rgba),
}

#[derive(Default)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn position(&self, pred: impl Fn(&Op) -> bool) -> Option<usize> {
        self.ops.iter().position(pred)
    }

    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface2d for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ops.push(Op::Clear(width, height));
    }
    fn save(&mut self) {
        self.ops.push(Op::Save);
    }
    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }
    fn translate(&mut self, dx: f32, dy: f32) {
        self.ops.push(Op::Translate(dx, dy));
    }
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ops.push(Op::FillCircle(center, radius, color));
    }
    fn fill_radial(&mut self, center: Vec2, radius: f32, stops: &[(f32, Rgba)]) {
        self.ops.push(Op::FillRadial(center, radius, stops.to_vec()));
    }
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba) {
        self.ops.push(Op::StrokeCircle(center, radius, width, color));
    }
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.ops.push(Op::StrokeLine(from, to, width, color));
    }
}

pub const CYAN: Rgb = Rgb::from_array(constants::PALETTE[0]);

pub fn particle_at(x: f32, y: f32) -> DriftParticle {
    DriftParticle {
        position: Vec2::new(x, y),
        velocity: Vec2::ZERO,
        size: 2.0,
        color: CYAN,
        opacity: 0.3,
        depth: 1.0,
        phase: 0.0,
        trail: Trail::new(),
    }
}

pub fn node_at(x: f32, y: f32) -> EnergyNode {
    EnergyNode {
        position: Vec2::new(x, y),
        velocity: Vec2::ZERO,
        base_radius: 10.0,
        color: CYAN,
        phase: 0.0,
        pulse_speed: 0.02,
        glow: 0.6,
    }
}

pub fn surface(width: f32, height: f32) -> SurfaceState {
    SurfaceState {
        width,
        height,
        ..Default::default()
    }
}
