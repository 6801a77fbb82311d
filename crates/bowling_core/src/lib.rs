//! Core scene types for the bowling lane
//!
//! This crate provides the engine-neutral scene graph the lane is assembled into:
//!
//! - [`Transform3D`] - Position, rotation, and scale in 3D space
//! - [`Material`] - Visual properties of an entity
//! - [`Entity`] - An object in the world with transform, shape, and material
//! - [`ShapeTemplate`] - Serializable shape description
//! - [`World`] - Container for all entities
//! - [`EntityKey`] - Generational key to an entity in the world
//! - [`Scene`] - Loadable/saveable scene with camera, lights and key actions
//! - [`SceneValidator`] - Static checks run before handing a scene to a renderer

mod transform;
mod entity;
mod world;
mod shapes;
mod scene;
mod scene_validator;
pub mod action;

pub use transform::Transform3D;
pub use entity::{Entity, EntityFlags, Material, MirrorReflection};
pub use world::{EntityKey, World};
pub use shapes::ShapeTemplate;
pub use scene::{Camera, DirectionalLight, Scene, SceneLoadError, SceneSaveError};
pub use scene_validator::{SceneValidator, ValidationError};
pub use action::{ActionError, Effect, KeyAction, KeyTrigger};
