//! Layered drawing of the current entity state.
//!
//! The pipeline only talks to [`Surface2d`], so the same code paints a browser
//! 2D canvas or a recording surface in tests. Layers, back to front:
//! waves, nodes and node links, particles with trails and particle links.

use crate::constants::*;
use crate::entities::{DriftParticle, EnergyNode, EnergyWave, Rgb};
use crate::proximity::FrameGraph;
use crate::store::EntityStore;
use glam::Vec2;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f32,
}

impl Rgba {
    #[inline]
    pub fn new(rgb: Rgb, a: f32) -> Self {
        Self {
            rgb,
            a: a.clamp(0.0, 1.0),
        }
    }
}

/// CSS `rgba(...)` form, as accepted by canvas fill and stroke styles.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {:.3})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.a
        )
    }
}

/// Minimal 2D drawing target.
pub trait Surface2d {
    fn clear(&mut self, width: f32, height: f32);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Filled disc shaded by a radial gradient; `stops` are `(offset, color)`
    /// with offsets in `[0, 1]` from center to edge.
    fn fill_radial(&mut self, center: Vec2, radius: f32, stops: &[(f32, Rgba)]);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}

/// Per-frame values the pipeline needs besides entity state.
#[derive(Clone, Copy, Debug)]
pub struct FrameView {
    pub width: f32,
    pub height: f32,
    pub scroll_y: f32,
    /// Elapsed simulation time in seconds.
    pub time: f32,
}

pub fn render_frame<S: Surface2d + ?Sized>(
    surface: &mut S,
    store: &EntityStore,
    graph: &FrameGraph,
    view: &FrameView,
) {
    surface.clear(view.width, view.height);
    surface.save();
    surface.translate(0.0, -view.scroll_y);

    for w in &store.waves {
        draw_wave(surface, w);
    }

    for n in &store.nodes {
        draw_node(surface, n, view.time);
    }
    draw_node_links(surface, store, graph);

    for p in &store.particles {
        draw_particle(surface, p);
    }
    draw_particle_links(surface, store, graph);

    surface.restore();
}

fn draw_wave<S: Surface2d + ?Sized>(surface: &mut S, w: &EnergyWave) {
    if w.opacity <= 0.0 {
        return;
    }
    // Thinner as the ring passes its nominal reach.
    let width = 2.0 * (1.0 - w.radius / w.max_radius).max(0.25);
    surface.stroke_circle(w.origin, w.radius, width, Rgba::new(w.color, w.opacity));
    surface.stroke_circle(
        w.origin,
        w.radius * WAVE_INNER_SCALE,
        width * 0.5,
        Rgba::new(w.color, w.opacity * 0.5),
    );
}

fn draw_node<S: Surface2d + ?Sized>(surface: &mut S, n: &EnergyNode, t: f32) {
    let r = n.radius();
    let c = n.color;

    // Aura layers, widest and faintest first.
    for (scale, alpha) in [(NODE_AURA_SCALE, 0.15), (NODE_AURA_SCALE * 0.6, 0.3)] {
        surface.fill_radial(
            n.position,
            r * scale,
            &[
                (0.0, Rgba::new(c, n.glow * alpha)),
                (0.5, Rgba::new(c, n.glow * alpha * 0.4)),
                (1.0, Rgba::new(c, 0.0)),
            ],
        );
    }

    surface.fill_radial(
        n.position,
        r,
        &[
            (0.0, Rgba::new(Rgb::WHITE, 0.9)),
            (0.4, Rgba::new(c, n.glow)),
            (1.0, Rgba::new(c, 0.0)),
        ],
    );

    let ring = r * NODE_RING_SCALE;
    let spin = t * NODE_RING_SPIN;
    for k in 0..NODE_RING_MARKERS {
        let angle = spin + k as f32 * std::f32::consts::TAU / NODE_RING_MARKERS as f32;
        let at = n.position + Vec2::from_angle(angle) * ring;
        surface.fill_circle(at, 1.5, Rgba::new(c, n.glow * 0.8));
    }
}

fn draw_node_links<S: Surface2d + ?Sized>(surface: &mut S, store: &EntityStore, graph: &FrameGraph) {
    for link in &graph.node_links {
        let (a, b) = (&store.nodes[link.a], &store.nodes[link.b]);
        surface.stroke_line(a.position, b.position, 1.0, Rgba::new(a.color, link.opacity));
        surface.fill_radial(
            link.marker,
            6.0,
            &[
                (0.0, Rgba::new(Rgb::WHITE, 0.8)),
                (0.5, Rgba::new(a.color, 0.5)),
                (1.0, Rgba::new(a.color, 0.0)),
            ],
        );
    }
}

fn draw_particle<S: Surface2d + ?Sized>(surface: &mut S, p: &DriftParticle) {
    // Oldest first so newer entries compose over older ones.
    for (i, at) in p.trail.iter().enumerate().rev() {
        let fade = 1.0 - i as f32 / TRAIL_LEN as f32;
        let size = p.size * fade * p.depth;
        surface.fill_circle(*at, size, Rgba::new(p.color, p.opacity * fade * 0.3));
    }

    let size = p.size * p.pulse_factor() * p.depth;
    surface.fill_radial(
        p.position,
        size * 4.0,
        &[
            (0.0, Rgba::new(p.color, p.opacity * p.depth)),
            (1.0, Rgba::new(p.color, 0.0)),
        ],
    );
    surface.fill_circle(p.position, size, Rgba::new(Rgb::WHITE, p.opacity + 0.3));
}

fn draw_particle_links<S: Surface2d + ?Sized>(
    surface: &mut S,
    store: &EntityStore,
    graph: &FrameGraph,
) {
    for link in &graph.particle_links {
        let (a, b) = (&store.particles[link.a], &store.particles[link.b]);
        surface.stroke_line(a.position, b.position, 0.5, Rgba::new(a.color, link.opacity));
        if let Some(mid) = link.midpoint {
            surface.fill_circle(mid, 1.0, Rgba::new(Rgb::WHITE, link.opacity * 2.0));
        }
    }
}
