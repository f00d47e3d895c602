use crate::config::SimulationConfig;
use crate::input::{InputState, SurfaceState};
use crate::lifecycle::FrameClock;
use crate::motion;
use crate::proximity::{self, FrameGraph};
use crate::render::{self, FrameView, Surface2d};
use crate::store::EntityStore;
use glam::Vec2;
use rand::Rng;
use std::time::Duration;

/// One mounted background: configuration, entities, the frame's proximity
/// graph, the clock and the random source.
///
/// Everything here is touched only from the frame callback. Input handlers
/// write an [`InputState`] that is handed in by value each frame.
pub struct AmbientField<R: Rng> {
    config: SimulationConfig,
    store: EntityStore,
    graph: FrameGraph,
    clock: FrameClock,
    rng: R,
}

impl<R: Rng> AmbientField<R> {
    pub fn new(config: SimulationConfig, surface: &SurfaceState, mut rng: R) -> Self {
        let store = EntityStore::initialize(&config, surface.width, surface.height, &mut rng);
        log::info!(
            "[field] particles={} nodes={} distance={:.0} opacity={:.2}",
            config.particle_count,
            config.node_count,
            config.connection_distance,
            config.opacity
        );
        Self {
            config,
            store,
            graph: FrameGraph::default(),
            clock: FrameClock::default(),
            rng,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    pub fn graph(&self) -> &FrameGraph {
        &self.graph
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Advance the simulation by one frame using a snapshot of the inputs.
    ///
    /// Order: wave decay and prune, motion, proximity graph (which may
    /// spawn waves). Returns `None` without touching state while the host
    /// document is hidden.
    pub fn step(&mut self, input: InputState, dt: Duration) -> Option<FrameView> {
        if input.hidden {
            return None;
        }
        let time = self.clock.advance(dt);
        let surface = input.surface;
        let bounds = Vec2::new(surface.width, surface.height);
        let pointer = input.pointer.active_position();

        self.store.decay_waves();
        self.store.prune_waves();

        motion::step_particles(&mut self.store.particles, pointer, bounds);
        motion::step_nodes(&mut self.store.nodes, pointer, bounds);

        proximity::build_graph(
            &self.store.nodes,
            &self.store.particles,
            self.config.connection_distance,
            time,
            &mut self.graph,
        );
        proximity::spawn_waves(
            &self.graph.node_links,
            &self.store.nodes,
            &mut self.rng,
            &mut self.store.waves,
        );

        Some(FrameView {
            width: surface.width,
            height: surface.height,
            scroll_y: surface.scroll_y,
            time,
        })
    }

    pub fn render<S: Surface2d + ?Sized>(&self, surface: &mut S, view: &FrameView) {
        render::render_frame(surface, &self.store, &self.graph, view);
    }

    /// Step then draw. Returns whether anything was drawn.
    pub fn frame<S: Surface2d + ?Sized>(
        &mut self,
        input: InputState,
        dt: Duration,
        surface: &mut S,
    ) -> bool {
        match self.step(input, dt) {
            Some(view) => {
                self.render(surface, &view);
                true
            }
            None => false,
        }
    }
}
