//! Pairwise proximity for one frame: node links (with travelling markers and
//! wave spawning) and particle links.
//!
//! Both passes are quadratic in entity count. Counts are capped by
//! configuration, never by page content.

use crate::constants::*;
use crate::entities::{DriftParticle, EnergyNode, EnergyWave};
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeLink {
    pub a: usize,
    pub b: usize,
    pub opacity: f32,
    /// Position of the marker travelling from `a` to `b`.
    pub marker: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleLink {
    pub a: usize,
    pub b: usize,
    pub opacity: f32,
    /// Midpoint marker, present for pairs within half the connection distance.
    pub midpoint: Option<Vec2>,
}

/// Relationships derived for the current frame.
#[derive(Clone, Debug, Default)]
pub struct FrameGraph {
    pub node_links: Vec<NodeLink>,
    pub particle_links: Vec<ParticleLink>,
}

impl FrameGraph {
    pub fn clear(&mut self) {
        self.node_links.clear();
        self.particle_links.clear();
    }
}

/// Breathing opacity of the link between nodes `i` and `j` at time `t`.
#[inline]
pub fn node_link_opacity(t: f32, i: usize, j: usize) -> f32 {
    NODE_LINK_OPACITY * (0.5 + 0.5 * (NODE_LINK_BREATH_RATE * t + i as f32 + j as f32).sin())
}

/// Fraction of the edge the travelling marker has covered at time `t`.
#[inline]
pub fn marker_progress(t: f32) -> f32 {
    (t * LINK_MARKER_RATE).rem_euclid(1.0)
}

pub fn link_nodes(nodes: &[EnergyNode], connection_distance: f32, t: f32, out: &mut Vec<NodeLink>) {
    let range = NODE_LINK_RANGE * connection_distance;
    let range_sq = range * range;
    let progress = marker_progress(t);
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let (pa, pb) = (nodes[i].position, nodes[j].position);
            if pa.distance_squared(pb) >= range_sq {
                continue;
            }
            out.push(NodeLink {
                a: i,
                b: j,
                opacity: node_link_opacity(t, i, j),
                marker: pa.lerp(pb, progress),
            });
        }
    }
}

/// Spawn waves at link markers with [`WAVE_SPAWN_PROBABILITY`] per link.
/// Returns the number spawned.
pub fn spawn_waves<R: Rng + ?Sized>(
    links: &[NodeLink],
    nodes: &[EnergyNode],
    rng: &mut R,
    waves: &mut Vec<EnergyWave>,
) -> usize {
    let mut spawned = 0;
    for link in links {
        if rng.gen_bool(WAVE_SPAWN_PROBABILITY) {
            waves.push(EnergyWave::spawn(rng, link.marker, nodes[link.a].color));
            spawned += 1;
        }
    }
    spawned
}

pub fn link_particles(
    particles: &[DriftParticle],
    connection_distance: f32,
    out: &mut Vec<ParticleLink>,
) {
    if connection_distance <= 0.0 {
        return;
    }
    let cd_sq = connection_distance * connection_distance;
    let mid_range = PARTICLE_MIDPOINT_RANGE * connection_distance;
    for i in 0..particles.len() {
        let a = &particles[i];
        for (j, b) in particles.iter().enumerate().skip(i + 1) {
            let d_sq = a.position.distance_squared(b.position);
            if d_sq >= cd_sq {
                continue;
            }
            let dist = d_sq.sqrt();
            out.push(ParticleLink {
                a: i,
                b: j,
                opacity: PARTICLE_LINK_OPACITY
                    * (1.0 - dist / connection_distance)
                    * a.depth.min(b.depth),
                midpoint: (dist < mid_range).then(|| a.position.lerp(b.position, 0.5)),
            });
        }
    }
}

/// Build the whole graph for this frame into `graph`, reusing its buffers.
pub fn build_graph(
    nodes: &[EnergyNode],
    particles: &[DriftParticle],
    connection_distance: f32,
    t: f32,
    graph: &mut FrameGraph,
) {
    graph.clear();
    link_nodes(nodes, connection_distance, t, &mut graph.node_links);
    link_particles(particles, connection_distance, &mut graph.particle_links);
}
