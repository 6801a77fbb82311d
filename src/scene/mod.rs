//! Scene construction utilities
//!
//! This module provides a declarative API for assembling the lane scene.

mod scene_builder;

pub use scene_builder::LaneSceneBuilder;
