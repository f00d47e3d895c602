// Tuning constants for the ambient background simulation and its drawing.

// Drift particles
pub const TRAIL_LEN: usize = 8; // recent positions kept per particle
pub const PARTICLE_PHASE_STEP: f32 = 0.05; // radians per frame
pub const PARTICLE_SIZE_MIN: f32 = 1.0;
pub const PARTICLE_SIZE_SPAN: f32 = 2.0;
pub const PARTICLE_SPEED_SPAN: f32 = 0.5; // velocity drawn from (-span/2, span/2)
pub const PARTICLE_OPACITY_MIN: f32 = 0.2;
pub const PARTICLE_OPACITY_MAX: f32 = 0.5;
pub const DEPTH_MIN: f32 = 0.4;
pub const DEPTH_MAX: f32 = 1.0;

// Pulsation shared by particles and nodes
pub const PULSE_AMPLITUDE: f32 = 0.3; // factor = 1 + amplitude * sin(phase)

// Pointer repulsion
pub const PARTICLE_REPEL_RADIUS: f32 = 150.0;
pub const PARTICLE_REPEL_STRENGTH: f32 = 2.0;
pub const NODE_REPEL_RADIUS: f32 = 200.0;
pub const NODE_REPEL_STRENGTH: f32 = 3.0;

// Energy nodes
pub const NODE_RADIUS_MIN: f32 = 6.0;
pub const NODE_RADIUS_SPAN: f32 = 6.0;
pub const NODE_SPEED_SPAN: f32 = 0.3;
pub const NODE_PULSE_SPEED_MIN: f32 = 0.01;
pub const NODE_PULSE_SPEED_SPAN: f32 = 0.02;
pub const NODE_GLOW_MIN: f32 = 0.5;
pub const NODE_GLOW_MAX: f32 = 0.8;
pub const NODE_AURA_SCALE: f32 = 4.0; // outer aura radius relative to current radius
pub const NODE_RING_MARKERS: usize = 6;
pub const NODE_RING_SCALE: f32 = 1.8; // marker ring radius relative to current radius
pub const NODE_RING_SPIN: f32 = 0.5; // radians per second

// Node links
pub const NODE_LINK_RANGE: f32 = 1.5; // multiple of the connection distance
pub const NODE_LINK_OPACITY: f32 = 0.3;
pub const NODE_LINK_BREATH_RATE: f32 = 2.0; // rad/s of the breathing term
pub const LINK_MARKER_RATE: f32 = 0.5; // cycles per second along an edge
pub const WAVE_SPAWN_PROBABILITY: f64 = 0.005; // per linked edge per frame

// Particle links
pub const PARTICLE_LINK_OPACITY: f32 = 0.15;
pub const PARTICLE_MIDPOINT_RANGE: f32 = 0.5; // multiple of the connection distance

// Energy waves
pub const WAVE_START_OPACITY: f32 = 0.4;
pub const WAVE_RADIUS_STEP: f32 = 2.0; // px per frame
pub const WAVE_OPACITY_STEP: f32 = 0.005; // per frame
pub const WAVE_MAX_RADIUS_MIN: f32 = 80.0;
pub const WAVE_MAX_RADIUS_SPAN: f32 = 80.0;
pub const WAVE_INNER_SCALE: f32 = 0.7;

// Configuration limits
pub const MAX_PARTICLES: usize = 600; // hard cap for overrides; pair pass is quadratic

/// Palette shared by particles, nodes and waves, as RGB triplets.
pub const PALETTE: [[u8; 3]; 5] = [
    [0, 212, 255],  // cyan
    [139, 92, 246], // violet
    [236, 72, 153], // pink
    [59, 130, 246], // blue
    [16, 185, 129], // emerald
];
