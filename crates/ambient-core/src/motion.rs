//! Per-frame motion rules: drift, pulsation, pointer repulsion and the
//! reflective boundary.

use crate::constants::*;
use crate::entities::{DriftParticle, EnergyNode};
use glam::Vec2;

/// Fold `pos` back into `[0, extent]` by mirroring at the walls and point the
/// velocity inward if the position had left the range.
///
/// A collapsed extent pins the coordinate to 0.
pub fn reflect_axis(pos: f32, vel: f32, extent: f32) -> (f32, f32) {
    if extent <= 0.0 || !extent.is_finite() {
        return (0.0, vel);
    }
    if !pos.is_finite() {
        return (extent * 0.5, vel);
    }
    if pos < 0.0 {
        (mirror(pos, extent), vel.abs())
    } else if pos > extent {
        (mirror(pos, extent), -vel.abs())
    } else {
        (pos, vel)
    }
}

#[inline]
fn mirror(pos: f32, extent: f32) -> f32 {
    let period = 2.0 * extent;
    let folded = pos.rem_euclid(period);
    if folded > extent {
        period - folded
    } else {
        folded
    }
}

#[inline]
fn reflect(position: &mut Vec2, velocity: &mut Vec2, bounds: Vec2) {
    let (x, vx) = reflect_axis(position.x, velocity.x, bounds.x);
    let (y, vy) = reflect_axis(position.y, velocity.y, bounds.y);
    *position = Vec2::new(x, y);
    *velocity = Vec2::new(vx, vy);
}

/// Displacement pushing `at` away from `pointer`, linear falloff to zero at `radius`.
#[inline]
pub fn repulsion(at: Vec2, pointer: Vec2, radius: f32, strength: f32) -> Vec2 {
    let away = at - pointer;
    let dist = away.length();
    if dist >= radius || dist <= f32::EPSILON {
        return Vec2::ZERO;
    }
    let force = (radius - dist) / radius;
    away / dist * force * strength
}

pub fn step_particle(p: &mut DriftParticle, pointer: Option<Vec2>, bounds: Vec2) {
    p.phase += PARTICLE_PHASE_STEP;
    p.position += p.velocity * p.depth;
    if let Some(ptr) = pointer {
        p.position += repulsion(
            p.position,
            ptr,
            PARTICLE_REPEL_RADIUS,
            PARTICLE_REPEL_STRENGTH * p.depth,
        );
    }
    reflect(&mut p.position, &mut p.velocity, bounds);
    let pos = p.position;
    p.push_trail(pos);
}

pub fn step_node(n: &mut EnergyNode, pointer: Option<Vec2>, bounds: Vec2) {
    n.phase += n.pulse_speed;
    n.position += n.velocity;
    if let Some(ptr) = pointer {
        n.position += repulsion(n.position, ptr, NODE_REPEL_RADIUS, NODE_REPEL_STRENGTH);
    }
    reflect(&mut n.position, &mut n.velocity, bounds);
}

pub fn step_particles(particles: &mut [DriftParticle], pointer: Option<Vec2>, bounds: Vec2) {
    for p in particles {
        step_particle(p, pointer, bounds);
    }
}

pub fn step_nodes(nodes: &mut [EnergyNode], pointer: Option<Vec2>, bounds: Vec2) {
    for n in nodes {
        step_node(n, pointer, bounds);
    }
}
