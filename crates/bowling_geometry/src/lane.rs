//! Lane volume dimensions and decal placement

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::spec::LaneSpec;

/// Z distances of the lane markings, measured from the near end of the lane volume
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecalOffsets {
    /// Second (nearest) row of approach dots
    pub second_approach_dots: f32,
    /// First row of approach dots
    pub first_approach_dots: f32,
    /// The foul line
    pub foul_line: f32,
    /// Targeting arrows
    pub arrows: f32,
    /// Inner dots, a fixed inset past the foul line
    pub inner_dots: f32,
}

impl DecalOffsets {
    /// The four cumulative offsets in lane order
    ///
    /// Inner dots are excluded: they are an inset from the foul line rather
    /// than a step in the cumulative sequence.
    pub fn ordered(&self) -> [f32; 4] {
        [
            self.second_approach_dots,
            self.first_approach_dots,
            self.foul_line,
            self.arrows,
        ]
    }
}

/// Overall lane size plus where each decal goes
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaneDimensions {
    /// Sum of all lane segments
    pub total_length: f32,
    /// Lane width
    pub width: f32,
    /// Lane height (thickness)
    pub height: f32,
    /// Decal positions along the lane
    pub decals: DecalOffsets,
}

impl LaneDimensions {
    /// Size of the lane volume (x = width, y = height, z = length)
    #[inline]
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.total_length)
    }

    /// Centre of the lane volume
    ///
    /// The volume starts at z = 0 and rests on y = 0.
    #[inline]
    pub fn center(&self) -> Vec3 {
        Vec3::new(0.0, self.height / 2.0, self.total_length / 2.0)
    }

    /// Point on the lane's top surface at the given z offset
    #[inline]
    pub fn surface_point(&self, z: f32) -> Vec3 {
        Vec3::new(0.0, self.height, z)
    }
}

/// Compute the lane volume and the decal offsets
pub fn compute_lane_dimensions(lane: &LaneSpec) -> Result<LaneDimensions, GeometryError> {
    lane.validate()?;

    let second_approach_dots = lane.approach_board_to_second_approach_dots;
    let first_approach_dots = second_approach_dots + lane.second_approach_to_first_approach;
    let foul_line = first_approach_dots + lane.first_approach_dots_to_foul_line;
    let arrows = foul_line + lane.foul_line_to_arrows;
    let inner_dots = foul_line + lane.foul_line_to_inner_dots;

    Ok(LaneDimensions {
        total_length: lane.total_length(),
        width: lane.width,
        height: lane.height,
        decals: DecalOffsets {
            second_approach_dots,
            first_approach_dots,
            foul_line,
            arrows,
            inner_dots,
        },
    })
}
