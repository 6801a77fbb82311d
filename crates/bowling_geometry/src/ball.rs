//! Composite ball solid: a sphere with three finger holes subtracted
//!
//! Each hole is a cylinder placed in a pivot frame. The boolean difference is
//! evaluated on world-space geometry, so building the ball is a two-phase
//! protocol:
//!
//! 1. **Resolve**: every [`HoleSpec`] is turned into a [`ResolvedHole`] whose
//!    world matrix already includes the pivot rotation.
//! 2. **Combine**: the sphere and the resolved holes form a
//!    [`CompositeSolidDescriptor`], read as an ordered list of
//!    [`CsgOperation::Subtract`] steps.
//!
//! A geometry backend only ever sees world-resolved holes.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::bounds::Aabb;
use crate::error::{require_positive, GeometryError};

/// Number of finger holes in a ball
pub const HOLE_COUNT: usize = 3;

/// Rotation of a hole's pivot frame
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PivotRotation {
    /// Rotation axis (normalised on use)
    pub axis: Vec3,
    /// Angle in radians
    pub angle: f32,
}

impl PivotRotation {
    pub fn new(axis: Vec3, angle: f32) -> Self {
        Self { axis, angle }
    }

    /// Rotation about the X axis
    pub fn about_x(angle: f32) -> Self {
        Self::new(Vec3::X, angle)
    }

    /// Rotation about the Z axis
    pub fn about_z(angle: f32) -> Self {
        Self::new(Vec3::Z, angle)
    }

    fn validate(&self) -> Result<(), GeometryError> {
        if !self.axis.is_finite() || self.axis.length_squared() <= f32::EPSILON {
            return Err(GeometryError::invalid(
                "pivot.axis",
                format!("must be a finite non-zero vector, got {:?}", self.axis),
            ));
        }
        if !self.angle.is_finite() {
            return Err(GeometryError::invalid("pivot.angle", "must be finite"));
        }
        Ok(())
    }

    /// The rotation as a unit quaternion
    pub fn to_quat(&self) -> Quat {
        Quat::from_axis_angle(self.axis.normalize(), self.angle)
    }
}

/// Parameters of one finger hole
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoleSpec {
    /// Cylinder length
    pub length: f32,
    /// Cylinder radius
    pub radius: f32,
    /// Number of sides for tessellation
    pub tessellation: u32,
    /// Rotation of the pivot frame
    pub pivot: PivotRotation,
    /// Distance of the cylinder centre along the pivot's local up axis
    pub offset: f32,
}

impl HoleSpec {
    /// A finger hole with the reference cylinder and the given pivot
    pub fn with_pivot(pivot: PivotRotation) -> Self {
        Self {
            length: 0.15,
            radius: 0.01,
            tessellation: 8,
            pivot,
            offset: 0.15,
        }
    }

    fn validate(&self) -> Result<(), GeometryError> {
        require_positive("hole.length", self.length)?;
        require_positive("hole.radius", self.radius)?;
        require_positive("hole.offset", self.offset)?;
        if self.tessellation < 3 {
            return Err(GeometryError::invalid(
                "hole.tessellation",
                format!("must be at least 3, got {}", self.tessellation),
            ));
        }
        self.pivot.validate()
    }

    /// Resolve phase: compute the hole's world transform
    ///
    /// The cylinder is first offset along the local up axis, then the pivot
    /// rotation is applied on top.
    pub fn resolve(&self) -> ResolvedHole {
        let local = Mat4::from_translation(Vec3::Y * self.offset);
        let pivot = Mat4::from_quat(self.pivot.to_quat());
        ResolvedHole {
            cylinder: CylinderDescriptor {
                length: self.length,
                radius: self.radius,
                tessellation: self.tessellation,
            },
            world: pivot * local,
        }
    }
}

/// Ball measurements
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallSpec {
    /// Sphere radius
    pub radius: f32,
    /// Sphere segment count for tessellation
    pub segments: u32,
    /// The three finger holes
    pub holes: [HoleSpec; HOLE_COUNT],
}

impl Default for BallSpec {
    fn default() -> Self {
        Self {
            radius: 0.11,
            segments: 12,
            holes: [
                HoleSpec::with_pivot(PivotRotation::new(Vec3::new(0.5, 0.0, 0.5), -0.2)),
                HoleSpec::with_pivot(PivotRotation::about_x(0.3)),
                HoleSpec::with_pivot(PivotRotation::about_z(0.3)),
            ],
        }
    }
}

impl BallSpec {
    /// Check every measurement
    pub fn validate(&self) -> Result<(), GeometryError> {
        require_positive("ball.radius", self.radius)?;
        if self.segments < 3 {
            return Err(GeometryError::invalid(
                "ball.segments",
                format!("must be at least 3, got {}", self.segments),
            ));
        }
        for hole in &self.holes {
            hole.validate()?;
            if hole.radius >= self.radius {
                return Err(GeometryError::invalid(
                    "hole.radius",
                    format!(
                        "must be smaller than the ball radius ({} >= {})",
                        hole.radius, self.radius
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Sphere centred at the origin
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDescriptor {
    pub radius: f32,
    pub segments: u32,
}

impl SphereDescriptor {
    pub fn contains(&self, point: Vec3) -> bool {
        point.length_squared() <= self.radius * self.radius
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_half_extents(Vec3::splat(self.radius))
    }
}

/// Cylinder centred at the origin, extending along the local Y axis
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CylinderDescriptor {
    pub length: f32,
    pub radius: f32,
    pub tessellation: u32,
}

impl CylinderDescriptor {
    /// Point membership in the cylinder's local frame
    pub fn contains_local(&self, p: Vec3) -> bool {
        p.y.abs() <= self.length / 2.0 && p.x * p.x + p.z * p.z <= self.radius * self.radius
    }

    pub fn local_bounds(&self) -> Aabb {
        Aabb::from_half_extents(Vec3::new(self.radius, self.length / 2.0, self.radius))
    }
}

/// A hole cylinder with its world transform already resolved
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedHole {
    pub cylinder: CylinderDescriptor,
    /// Cylinder local space to ball space
    pub world: Mat4,
}

impl ResolvedHole {
    /// Centre of the cylinder in ball space
    pub fn center(&self) -> Vec3 {
        self.world.transform_point3(Vec3::ZERO)
    }

    /// Unit direction of the cylinder axis in ball space
    pub fn axis(&self) -> Vec3 {
        self.world.transform_vector3(Vec3::Y).normalize()
    }

    /// Point membership in ball space
    pub fn contains(&self, point: Vec3) -> bool {
        let local = self.world.inverse().transform_point3(point);
        self.cylinder.contains_local(local)
    }

    pub fn bounds(&self) -> Aabb {
        self.cylinder.local_bounds().transformed(self.world)
    }
}

/// One step of the boolean combination
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CsgOperation<'a> {
    /// Remove the hole's volume from the accumulated solid
    Subtract(&'a ResolvedHole),
}

/// A sphere with three resolved holes subtracted from it
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompositeSolidDescriptor {
    pub sphere: SphereDescriptor,
    pub holes: [ResolvedHole; HOLE_COUNT],
}

impl CompositeSolidDescriptor {
    /// Combine phase: the subtraction steps in application order
    pub fn operations(&self) -> impl Iterator<Item = CsgOperation<'_>> + '_ {
        self.holes.iter().map(CsgOperation::Subtract)
    }

    /// Evaluate the difference at a point in ball space
    pub fn contains(&self, point: Vec3) -> bool {
        self.sphere.contains(point) && !self.holes.iter().any(|h| h.contains(point))
    }

    /// Bounds of the solid (subtraction never grows the sphere)
    pub fn bounds(&self) -> Aabb {
        self.sphere.bounds()
    }
}

/// Build the composite ball descriptor
pub fn build_ball_shape(ball: &BallSpec) -> Result<CompositeSolidDescriptor, GeometryError> {
    ball.validate()?;

    let holes = ball.holes.map(|hole| hole.resolve());

    Ok(CompositeSolidDescriptor {
        sphere: SphereDescriptor {
            radius: ball.radius,
            segments: ball.segments,
        },
        holes,
    })
}
