//! Bowling lane geometry
//!
//! This crate computes the parametric geometry of a bowling lane from a set
//! of measurements. Every function is pure: identical inputs produce
//! bitwise-identical outputs.
//!
//! ## Measurements
//!
//! - [`LaneSpec`] - Lane width, height and segment lengths
//! - [`PinSpec`] - Pin size and spacing
//! - [`BallSpec`] - Ball radius and the three finger holes
//!
//! ## Calculators
//!
//! - [`compute_pin_layout`] - Ten pin positions in standard numbering
//! - [`compute_lane_dimensions`] - Lane size and decal offsets
//! - [`build_ball_shape`] - Sphere minus three world-resolved cylinders

mod error;
mod spec;
pub mod bounds;
pub mod pins;
pub mod lane;
pub mod ball;

pub use error::GeometryError;
pub use spec::{LaneSpec, PinSpec, LENGTH_TOLERANCE};
pub use bounds::Aabb;
pub use pins::{compute_pin_layout, PinLayout, PinPosition, PIN_COUNT};
pub use lane::{compute_lane_dimensions, DecalOffsets, LaneDimensions};
pub use ball::{
    build_ball_shape, BallSpec, CompositeSolidDescriptor, CsgOperation, CylinderDescriptor,
    HoleSpec, PivotRotation, ResolvedHole, SphereDescriptor, HOLE_COUNT,
};

// Re-export the vector types used throughout the public API
pub use glam::{Mat4, Quat, Vec3};
