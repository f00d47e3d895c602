//! The three entity kinds of the background: drift particles, energy nodes
//! and transient energy waves.

use crate::constants::*;
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::from_array([255, 255, 255]);

    pub const fn from_array(c: [u8; 3]) -> Self {
        Self {
            r: c[0],
            g: c[1],
            b: c[2],
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_array(PALETTE[rng.gen_range(0..PALETTE.len())])
    }
}

/// `1 + amplitude * sin(phase)`, the breathing multiplier for sizes and radii.
#[inline]
pub fn pulse_factor(phase: f32) -> f32 {
    1.0 + PULSE_AMPLITUDE * phase.sin()
}

/// Recent positions, newest first.
pub type Trail = SmallVec<[Vec2; TRAIL_LEN]>;

/// A small glowing mote with a trailing afterimage.
#[derive(Clone, Debug)]
pub struct DriftParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub color: Rgb,
    pub opacity: f32,
    /// Parallax weight in `[DEPTH_MIN, DEPTH_MAX]`.
    pub depth: f32,
    pub phase: f32,
    pub trail: Trail,
}

impl DriftParticle {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Self {
        Self {
            position: random_point(rng, width, height),
            velocity: Vec2::new(
                (rng.gen::<f32>() - 0.5) * PARTICLE_SPEED_SPAN,
                (rng.gen::<f32>() - 0.5) * PARTICLE_SPEED_SPAN,
            ),
            size: PARTICLE_SIZE_MIN + rng.gen::<f32>() * PARTICLE_SIZE_SPAN,
            color: Rgb::random(rng),
            opacity: rng.gen_range(PARTICLE_OPACITY_MIN..=PARTICLE_OPACITY_MAX),
            depth: rng.gen_range(DEPTH_MIN..=DEPTH_MAX),
            phase: rng.gen::<f32>() * std::f32::consts::TAU,
            trail: Trail::new(),
        }
    }

    #[inline]
    pub fn pulse_factor(&self) -> f32 {
        pulse_factor(self.phase)
    }

    /// Record `p` as the newest trail entry, evicting the oldest beyond [`TRAIL_LEN`].
    pub fn push_trail(&mut self, p: Vec2) {
        if self.trail.len() == TRAIL_LEN {
            self.trail.pop();
        }
        self.trail.insert(0, p);
    }
}

/// A larger pulsing anchor point ("orb") that links to other nodes.
#[derive(Clone, Debug)]
pub struct EnergyNode {
    pub position: Vec2,
    pub velocity: Vec2,
    pub base_radius: f32,
    pub color: Rgb,
    pub phase: f32,
    pub pulse_speed: f32,
    pub glow: f32,
}

impl EnergyNode {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Self {
        Self {
            position: random_point(rng, width, height),
            velocity: Vec2::new(
                (rng.gen::<f32>() - 0.5) * NODE_SPEED_SPAN,
                (rng.gen::<f32>() - 0.5) * NODE_SPEED_SPAN,
            ),
            base_radius: NODE_RADIUS_MIN + rng.gen::<f32>() * NODE_RADIUS_SPAN,
            color: Rgb::random(rng),
            phase: rng.gen::<f32>() * std::f32::consts::TAU,
            pulse_speed: NODE_PULSE_SPEED_MIN + rng.gen::<f32>() * NODE_PULSE_SPEED_SPAN,
            glow: rng.gen_range(NODE_GLOW_MIN..=NODE_GLOW_MAX),
        }
    }

    /// Current radius, within `[0.7, 1.3] * base_radius`.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.base_radius * pulse_factor(self.phase)
    }
}

/// A transient expanding ring spawned where energy passes along a node link.
#[derive(Clone, Debug, PartialEq)]
pub struct EnergyWave {
    pub origin: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub opacity: f32,
    pub color: Rgb,
}

impl EnergyWave {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, origin: Vec2, color: Rgb) -> Self {
        Self {
            origin,
            radius: 0.0,
            max_radius: WAVE_MAX_RADIUS_MIN + rng.gen::<f32>() * WAVE_MAX_RADIUS_SPAN,
            opacity: WAVE_START_OPACITY,
            color,
        }
    }

    /// One frame of expansion and fading.
    #[inline]
    pub fn advance(&mut self) {
        self.radius += WAVE_RADIUS_STEP;
        self.opacity -= WAVE_OPACITY_STEP;
    }

    #[inline]
    pub fn is_spent(&self) -> bool {
        self.opacity <= 0.0
    }
}

fn random_point<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        rng.gen::<f32>() * width.max(0.0),
        rng.gen::<f32>() * height.max(0.0),
    )
}
