use crate::config::SimulationConfig;
use crate::entities::{DriftParticle, EnergyNode, EnergyWave};
use rand::Rng;

/// Owns the three entity collections for one mounted instance.
///
/// Particles and nodes live for the whole session; waves come and go.
#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    pub particles: Vec<DriftParticle>,
    pub nodes: Vec<EnergyNode>,
    pub waves: Vec<EnergyWave>,
}

impl EntityStore {
    /// Populate particles and nodes with independent random draws.
    pub fn initialize<R: Rng + ?Sized>(
        config: &SimulationConfig,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Self {
        let particles = (0..config.particle_count)
            .map(|_| DriftParticle::random(rng, width, height))
            .collect::<Vec<_>>();
        let nodes = (0..config.node_count)
            .map(|_| EnergyNode::random(rng, width, height))
            .collect::<Vec<_>>();
        log::debug!(
            "[store] {} particles, {} nodes on {:.0}x{:.0}",
            particles.len(),
            nodes.len(),
            width,
            height
        );
        Self {
            particles,
            nodes,
            waves: Vec::new(),
        }
    }

    pub fn append_wave(&mut self, wave: EnergyWave) {
        self.waves.push(wave);
    }

    /// Advance every wave by one frame.
    pub fn decay_waves(&mut self) {
        for w in &mut self.waves {
            w.advance();
        }
    }

    /// Drop waves whose opacity has reached zero.
    pub fn prune_waves(&mut self) {
        self.waves.retain(|w| !w.is_spent());
    }
}
