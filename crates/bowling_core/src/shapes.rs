//! Serializable shape templates
//!
//! ShapeTemplate is an engine-neutral description of an entity's geometry.
//! Each variant stores the parameters a geometry backend needs to build the
//! mesh; nothing here tessellates.
//!
//! All shapes are described in **local space** (centred at origin). The entity
//! transform places them in world space.

use bowling_geometry::{Aabb, CompositeSolidDescriptor, Vec3};
use serde::{Deserialize, Serialize};

use crate::EntityKey;

/// Serializable shape template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeTemplate {
    /// Flat ground plane in the XZ plane
    Ground {
        width: f32,
        depth: f32,
        subdivisions: u32,
    },
    /// Axis-aligned box with the given edge length, usually scaled by the transform
    Box {
        size: f32,
    },
    /// Cylinder (or truncated cone) along the local Y axis
    Cylinder {
        height: f32,
        diameter_top: f32,
        diameter_bottom: f32,
        tessellation: u32,
    },
    /// Sphere centred at the origin
    Sphere {
        diameter: f32,
        segments: u32,
    },
    /// Solid produced by boolean subtraction of resolved holes from a sphere
    Composite(CompositeSolidDescriptor),
    /// Shares the geometry of another entity
    Instance {
        source: EntityKey,
    },
    /// Texture-only overlay projected onto a host entity's surface
    Decal {
        host: EntityKey,
        normal: Vec3,
        size: Vec3,
    },
}

impl ShapeTemplate {
    /// Create a box template
    pub fn cube(size: f32) -> Self {
        ShapeTemplate::Box { size }
    }

    /// Create a cylinder template
    pub fn cylinder(height: f32, diameter_top: f32, diameter_bottom: f32, tessellation: u32) -> Self {
        ShapeTemplate::Cylinder {
            height,
            diameter_top,
            diameter_bottom,
            tessellation,
        }
    }

    /// Create an upward-facing decal template on the given host
    pub fn decal(host: EntityKey, size: Vec3) -> Self {
        ShapeTemplate::Decal {
            host,
            normal: Vec3::Y,
            size,
        }
    }

    /// The entity this shape depends on, if any
    pub fn referenced_key(&self) -> Option<EntityKey> {
        match self {
            ShapeTemplate::Instance { source } => Some(*source),
            ShapeTemplate::Decal { host, .. } => Some(*host),
            _ => None,
        }
    }

    /// Local-space bounds
    ///
    /// Returns `None` for instances, whose bounds come from their source.
    pub fn local_bounds(&self) -> Option<Aabb> {
        let half = match self {
            ShapeTemplate::Ground { width, depth, .. } => Vec3::new(width / 2.0, 0.0, depth / 2.0),
            ShapeTemplate::Box { size } => Vec3::splat(size / 2.0),
            ShapeTemplate::Cylinder {
                height,
                diameter_top,
                diameter_bottom,
                ..
            } => {
                let r = diameter_top.max(*diameter_bottom) / 2.0;
                Vec3::new(r, height / 2.0, r)
            }
            ShapeTemplate::Sphere { diameter, .. } => Vec3::splat(diameter / 2.0),
            ShapeTemplate::Composite(solid) => return Some(solid.bounds()),
            ShapeTemplate::Decal { size, .. } => *size / 2.0,
            ShapeTemplate::Instance { .. } => return None,
        };
        Some(Aabb::from_half_extents(half))
    }

    /// Short name of the variant, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeTemplate::Ground { .. } => "ground",
            ShapeTemplate::Box { .. } => "box",
            ShapeTemplate::Cylinder { .. } => "cylinder",
            ShapeTemplate::Sphere { .. } => "sphere",
            ShapeTemplate::Composite(_) => "composite",
            ShapeTemplate::Instance { .. } => "instance",
            ShapeTemplate::Decal { .. } => "decal",
        }
    }
}
