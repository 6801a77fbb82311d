//! Bowling lane scene generator
//!
//! Loads lane, pin and ball measurements from configuration and assembles
//! them into a serializable scene for a rendering collaborator.

pub mod config;
pub mod scene;

pub use config::{AppConfig, ConfigError};
pub use scene::LaneSceneBuilder;
