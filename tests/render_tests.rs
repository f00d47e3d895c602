// Host-side tests for the layered render pipeline, using a recording surface.

mod common;

use ambient_core::constants::*;
use ambient_core::proximity::build_graph;
use ambient_core::render::render_frame;
use ambient_core::*;
use common::{node_at, particle_at, Op, RecordingSurface, CYAN};
use glam::Vec2;

fn scene() -> (EntityStore, FrameGraph) {
    let mut store = EntityStore::default();
    store.nodes = vec![node_at(100.0, 100.0), node_at(150.0, 100.0)];
    store.particles = vec![particle_at(300.0, 300.0), particle_at(320.0, 300.0)];
    store.particles[0].push_trail(Vec2::new(299.0, 300.0));
    store.particles[0].push_trail(Vec2::new(300.0, 300.0));
    store.waves = vec![EnergyWave {
        origin: Vec2::new(50.0, 60.0),
        radius: 40.0,
        max_radius: 100.0,
        opacity: 0.3,
        color: CYAN,
    }];
    let mut graph = FrameGraph::default();
    build_graph(&store.nodes, &store.particles, 100.0, 0.25, &mut graph);
    (store, graph)
}

fn view(scroll_y: f32) -> FrameView {
    FrameView {
        width: 1024.0,
        height: 3000.0,
        scroll_y,
        time: 0.25,
    }
}

#[test]
fn frame_is_cleared_and_offset_by_scroll() {
    let (store, graph) = scene();
    let mut s = RecordingSurface::default();
    render_frame(&mut s, &store, &graph, &view(420.0));
    assert_eq!(s.ops[0], Op::Clear(1024.0, 3000.0));
    assert_eq!(s.ops[1], Op::Save);
    assert_eq!(s.ops[2], Op::Translate(0.0, -420.0));
    assert_eq!(s.ops.last(), Some(&Op::Restore));
    assert_eq!(s.count(|op| matches!(op, Op::Save)), 1);
    assert_eq!(s.count(|op| matches!(op, Op::Restore)), 1);
}

#[test]
fn wave_draws_outer_and_half_opaque_inner_ring() {
    let (store, graph) = scene();
    let mut s = RecordingSurface::default();
    render_frame(&mut s, &store, &graph, &view(0.0));
    let rings: Vec<_> = s
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::StrokeCircle(c, r, _, color) => Some((*c, *r, color.a)),
            _ => None,
        })
        .collect();
    assert_eq!(rings.len(), 2);
    assert_eq!(rings[0], (Vec2::new(50.0, 60.0), 40.0, 0.3));
    assert_eq!(rings[1].1, 40.0 * WAVE_INNER_SCALE);
    assert!((rings[1].2 - 0.15).abs() < 1e-6);
}

#[test]
fn layers_compose_waves_nodes_links_particles() {
    let (store, graph) = scene();
    assert_eq!(graph.node_links.len(), 1);
    assert_eq!(graph.particle_links.len(), 1);

    let mut s = RecordingSurface::default();
    render_frame(&mut s, &store, &graph, &view(0.0));

    let first_wave = s.position(|op| matches!(op, Op::StrokeCircle(..))).unwrap();
    let last_wave = s.ops.iter().rposition(|op| matches!(op, Op::StrokeCircle(..))).unwrap();
    let first_node = s.position(|op| matches!(op, Op::FillRadial(c, ..) if *c == Vec2::new(100.0, 100.0))).unwrap();
    let node_link = s.position(|op| matches!(op, Op::StrokeLine(_, _, w, _) if *w == 1.0)).unwrap();
    let first_trail = s.position(|op| matches!(op, Op::FillCircle(c, ..) if *c == Vec2::new(299.0, 300.0))).unwrap();
    let particle_link = s.position(|op| matches!(op, Op::StrokeLine(_, _, w, _) if *w == 0.5)).unwrap();

    assert!(first_wave < last_wave);
    assert!(last_wave < first_node);
    assert!(first_node < node_link);
    assert!(node_link < first_trail);
    assert!(first_trail < particle_link);
}

#[test]
fn node_has_six_ring_markers() {
    let mut store = EntityStore::default();
    store.nodes = vec![node_at(0.0, 0.0)];
    let graph = FrameGraph::default();
    let mut s = RecordingSurface::default();
    render_frame(&mut s, &store, &graph, &view(0.0));
    let ring = store.nodes[0].radius() * NODE_RING_SCALE;
    let markers = s.count(|op| {
        matches!(op, Op::FillCircle(c, ..) if (c.length() - ring).abs() < 1e-3)
    });
    assert_eq!(markers, NODE_RING_MARKERS);
}

#[test]
fn trail_is_drawn_oldest_first_with_fading_size() {
    let mut store = EntityStore::default();
    let mut p = particle_at(10.0, 10.0);
    for x in 0..TRAIL_LEN {
        p.push_trail(Vec2::new(x as f32, 0.0));
    }
    store.particles = vec![p];
    let mut s = RecordingSurface::default();
    render_frame(&mut s, &store, &FrameGraph::default(), &view(0.0));

    let trail: Vec<(f32, f32)> = s
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::FillCircle(c, r, _) if c.y == 0.0 => Some((c.x, *r)),
            _ => None,
        })
        .collect();
    assert_eq!(trail.len(), TRAIL_LEN);
    // Oldest (x = 0) first, newest last and largest.
    assert_eq!(trail[0].0, 0.0);
    assert_eq!(trail[TRAIL_LEN - 1].0, (TRAIL_LEN - 1) as f32);
    for pair in trail.windows(2) {
        assert!(pair[0].1 < pair[1].1);
    }
}

#[test]
fn one_line_per_particle_link_and_midpoint_markers() {
    let mut store = EntityStore::default();
    store.particles = vec![
        particle_at(0.0, 0.0),
        particle_at(30.0, 0.0),
        particle_at(0.0, 80.0),
        particle_at(900.0, 900.0),
    ];
    let mut graph = FrameGraph::default();
    build_graph(&store.nodes, &store.particles, 100.0, 0.0, &mut graph);
    let mut s = RecordingSurface::default();
    render_frame(&mut s, &store, &graph, &view(0.0));

    let lines = s.count(|op| matches!(op, Op::StrokeLine(..)));
    assert_eq!(lines, graph.particle_links.len());
    // 0-1 (30), 0-2 (80), 1-2 (~85); only 0-1 is within half the distance.
    assert_eq!(lines, 3);
    let mids = s.count(|op| matches!(op, Op::FillCircle(c, ..) if *c == Vec2::new(15.0, 0.0)));
    assert_eq!(mids, 1);
}

#[test]
fn rgba_formats_as_css() {
    let c = Rgba::new(CYAN, 0.4);
    assert_eq!(c.to_string(), "rgba(0, 212, 255, 0.400)");
    assert_eq!(Rgba::new(CYAN, 1.7).a, 1.0);
    assert_eq!(Rgba::new(CYAN, -0.2).a, 0.0);
}
