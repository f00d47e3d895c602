pub mod config;
pub mod constants;
pub mod entities;
pub mod field;
pub mod input;
pub mod lifecycle;
pub mod motion;
pub mod proximity;
pub mod render;
pub mod store;

pub use config::*;
pub use entities::*;
pub use field::AmbientField;
pub use input::*;
pub use lifecycle::{CancelToken, FrameClock, Teardown};
pub use proximity::{FrameGraph, NodeLink, ParticleLink};
pub use render::{FrameView, Rgba, Surface2d};
pub use store::EntityStore;
