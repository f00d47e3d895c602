//! Intensity presets and the resolved per-instance simulation configuration.

use crate::constants::MAX_PARTICLES;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Named preset controlling entity counts and visual density.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown intensity {0:?} (expected \"low\", \"medium\" or \"high\")")]
pub struct ParseIntensityError(pub String);

impl FromStr for Intensity {
    type Err = ParseIntensityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Intensity::Low),
            "medium" => Ok(Intensity::Medium),
            "high" => Ok(Intensity::High),
            _ => Err(ParseIntensityError(s.to_string())),
        }
    }
}

impl Intensity {
    /// Lenient parse used at the mount boundary: anything unrecognized is medium.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|e: ParseIntensityError| {
            log::warn!("{e}; falling back to medium");
            Intensity::default()
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }

    /// Fixed preset table.
    pub fn preset(self) -> SimulationConfig {
        match self {
            Intensity::Low => SimulationConfig {
                particle_count: 100,
                connection_distance: 200.0,
                opacity: 0.35,
                node_count: 3,
            },
            Intensity::Medium => SimulationConfig {
                particle_count: 150,
                connection_distance: 250.0,
                opacity: 0.45,
                node_count: 5,
            },
            Intensity::High => SimulationConfig {
                particle_count: 220,
                connection_distance: 300.0,
                opacity: 0.55,
                node_count: 8,
            },
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved parameters for one mounted instance. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    pub particle_count: usize,
    pub connection_distance: f32,
    /// Global opacity multiplier applied to the whole drawing surface.
    pub opacity: f32,
    pub node_count: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Intensity::default().preset()
    }
}

/// Caller-facing construction options.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BackgroundOptions {
    pub intensity: Intensity,
    pub particle_count: Option<usize>,
    pub connection_distance: Option<f32>,
}

impl BackgroundOptions {
    /// Build options from string attributes such as `data-intensity`.
    /// Unparseable numbers are logged and left unset.
    pub fn from_attributes(
        intensity: Option<&str>,
        particle_count: Option<&str>,
        connection_distance: Option<&str>,
    ) -> Self {
        Self {
            intensity: intensity.map(Intensity::parse_or_default).unwrap_or_default(),
            particle_count: particle_count.and_then(|s| parse_attr::<usize>("particle count", s)),
            connection_distance: connection_distance
                .and_then(|s| parse_attr::<f32>("connection distance", s)),
        }
    }

    pub fn resolve(&self) -> SimulationConfig {
        resolve(self.intensity, self.particle_count, self.connection_distance)
    }
}

/// Map an intensity plus optional overrides to a [`SimulationConfig`].
///
/// Each override replaces only its own field. Overrides that are not strictly
/// positive are ignored, and particle counts above [`MAX_PARTICLES`] are capped.
pub fn resolve(
    intensity: Intensity,
    particle_count: Option<usize>,
    connection_distance: Option<f32>,
) -> SimulationConfig {
    let mut config = intensity.preset();

    match particle_count {
        Some(0) => log::warn!("ignoring particle count override of 0"),
        Some(n) if n > MAX_PARTICLES => {
            log::warn!("particle count {n} capped at {MAX_PARTICLES}");
            config.particle_count = MAX_PARTICLES;
        }
        Some(n) => config.particle_count = n,
        None => {}
    }

    match connection_distance {
        Some(d) if d.is_finite() && d > 0.0 => config.connection_distance = d,
        Some(d) => log::warn!("ignoring connection distance override of {d}"),
        None => {}
    }

    config
}

fn parse_attr<T: FromStr>(what: &str, s: &str) -> Option<T> {
    match s.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring unparseable {what} {s:?}");
            None
        }
    }
}
