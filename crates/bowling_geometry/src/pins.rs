//! Ten-pin triangular layout

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::spec::{LaneSpec, PinSpec};

/// Number of pins in a rack
pub const PIN_COUNT: usize = 10;

/// Number of rows in a rack
pub const ROW_COUNT: u8 = 4;

/// A single pin placement
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PinPosition {
    /// Standard pin number, 1 (head pin) to 10
    pub number: u8,
    /// Row, 1 (head pin) to 4 (back row)
    pub row: u8,
    /// Centre of the pin in lane space
    pub position: Vec3,
}

/// The ten pin positions, ordered by standard pin numbering
///
/// Index 0 is the head pin, then row 2 left to right, row 3 left to right and
/// row 4 left to right.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PinLayout {
    pins: [PinPosition; PIN_COUNT],
}

impl PinLayout {
    /// All pins in numbering order
    #[inline]
    pub fn pins(&self) -> &[PinPosition; PIN_COUNT] {
        &self.pins
    }

    /// Pin by zero-based index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&PinPosition> {
        self.pins.get(index)
    }

    /// The head pin (pin 1)
    #[inline]
    pub fn head_pin(&self) -> &PinPosition {
        &self.pins[0]
    }

    /// Pins belonging to the given row (1-based)
    pub fn row(&self, row: u8) -> impl Iterator<Item = &PinPosition> + '_ {
        self.pins.iter().filter(move |p| p.row == row)
    }

    /// Iterate over the pin centres
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.pins.iter().map(|p| p.position)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

/// Compute the ten pin positions on the lane
///
/// Row `r` (1-based) holds `r` pins. Its z is the head pin distance plus
/// `(r - 1) * distance_between_rows`, and its x offsets are spaced by
/// `distance_between_pins` and centred on 0. Every pin stands on the lane
/// surface, so y is `pin_height / 2 + lane_height`.
pub fn compute_pin_layout(pins: &PinSpec, lane: &LaneSpec) -> Result<PinLayout, GeometryError> {
    pins.validate()?;
    lane.validate()?;

    let y = pins.height / 2.0 + lane.height;
    let z0 = lane.head_pin_distance();

    let mut layout = [PinPosition {
        number: 0,
        row: 0,
        position: Vec3::ZERO,
    }; PIN_COUNT];

    let mut index = 0;
    for row in 1..=ROW_COUNT {
        let z = z0 + (row - 1) as f32 * pins.distance_between_rows;
        let half_span = (row - 1) as f32 / 2.0;
        for slot in 0..row {
            let x = (slot as f32 - half_span) * pins.distance_between_pins;
            layout[index] = PinPosition {
                number: index as u8 + 1,
                row,
                position: Vec3::new(x, y, z),
            };
            index += 1;
        }
    }

    Ok(PinLayout { pins: layout })
}
