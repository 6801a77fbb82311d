//! Measurement records for the lane and the pins
//!
//! All values are in meters. Defaults reproduce the reference lane; they are
//! tuned for visual plausibility rather than regulation accuracy, so every
//! field is meant to be overridden from configuration.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, GeometryError};

/// Tolerance used when comparing a declared total length to the sum of its segments
pub const LENGTH_TOLERANCE: f32 = 1e-4;

/// Lane measurements
///
/// The total lane length is never stored independently: it is always the sum
/// of the five segments (see [`LaneSpec::total_length`]). A config may still
/// declare the total it expects, in which case validation checks the two agree.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneSpec {
    /// Width of the lane surface
    pub width: f32,
    /// Height (thickness) of the lane volume
    pub height: f32,
    /// Near end of the lane to the second row of approach dots
    pub approach_board_to_second_approach_dots: f32,
    /// Second row of approach dots to the first row
    pub second_approach_to_first_approach: f32,
    /// First row of approach dots to the foul line
    pub first_approach_dots_to_foul_line: f32,
    /// Foul line to the head pin
    pub foul_line_to_head_pin: f32,
    /// Foul line to the targeting arrows
    pub foul_line_to_arrows: f32,
    /// Foul line to the inner dots
    pub foul_line_to_inner_dots: f32,
    /// Length of the pin deck
    pub pin_deck_length: f32,
    /// Extra space past the pin deck
    pub pin_area_buffer: f32,
    /// Optional expected total length, checked against the segment sum
    pub declared_total_length: Option<f32>,
}

impl Default for LaneSpec {
    fn default() -> Self {
        Self {
            width: 1.07,
            height: 0.2,
            approach_board_to_second_approach_dots: 4.0,
            second_approach_to_first_approach: 0.91,
            first_approach_dots_to_foul_line: 3.66,
            foul_line_to_head_pin: 18.28,
            foul_line_to_arrows: 4.57,
            foul_line_to_inner_dots: 1.83,
            pin_deck_length: 1.02,
            pin_area_buffer: 0.5,
            declared_total_length: None,
        }
    }
}

impl LaneSpec {
    /// Length of the pin area, including the buffer past the deck
    #[inline]
    pub fn pin_area_length(&self) -> f32 {
        self.pin_deck_length + self.pin_area_buffer
    }

    /// Sum of the five lane segments
    pub fn total_length(&self) -> f32 {
        self.approach_board_to_second_approach_dots
            + self.first_approach_dots_to_foul_line
            + self.second_approach_to_first_approach
            + self.foul_line_to_head_pin
            + self.pin_area_length()
    }

    /// Distance used to place the head pin
    ///
    /// Measured from the first approach dots, so it does not include the
    /// approach board segment.
    pub fn head_pin_distance(&self) -> f32 {
        self.first_approach_dots_to_foul_line
            + self.second_approach_to_first_approach
            + self.foul_line_to_head_pin
    }

    /// Check every measurement
    pub fn validate(&self) -> Result<(), GeometryError> {
        require_positive("width", self.width)?;
        require_positive("height", self.height)?;
        require_positive(
            "approach_board_to_second_approach_dots",
            self.approach_board_to_second_approach_dots,
        )?;
        require_positive(
            "second_approach_to_first_approach",
            self.second_approach_to_first_approach,
        )?;
        require_positive(
            "first_approach_dots_to_foul_line",
            self.first_approach_dots_to_foul_line,
        )?;
        require_positive("foul_line_to_head_pin", self.foul_line_to_head_pin)?;
        require_positive("foul_line_to_arrows", self.foul_line_to_arrows)?;
        require_positive("foul_line_to_inner_dots", self.foul_line_to_inner_dots)?;
        require_positive("pin_deck_length", self.pin_deck_length)?;
        require_positive("pin_area_buffer", self.pin_area_buffer)?;

        if self.foul_line_to_arrows >= self.foul_line_to_head_pin {
            return Err(GeometryError::invalid(
                "foul_line_to_arrows",
                format!(
                    "must be shorter than foul_line_to_head_pin ({} >= {})",
                    self.foul_line_to_arrows, self.foul_line_to_head_pin
                ),
            ));
        }

        if let Some(declared) = self.declared_total_length {
            let total = self.total_length();
            if (declared - total).abs() > LENGTH_TOLERANCE {
                return Err(GeometryError::invalid(
                    "declared_total_length",
                    format!("is {} but the segments sum to {}", declared, total),
                ));
            }
        }

        Ok(())
    }
}

/// Pin measurements
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinSpec {
    /// Pin height
    pub height: f32,
    /// Diameter at the widest point
    pub diameter: f32,
    /// Forward distance between consecutive rows
    pub distance_between_rows: f32,
    /// Sideways distance between neighbouring pins in a row
    pub distance_between_pins: f32,
}

impl Default for PinSpec {
    fn default() -> Self {
        Self {
            height: 0.48,
            diameter: 0.18,
            distance_between_rows: 0.26,
            distance_between_pins: 0.3,
        }
    }
}

impl PinSpec {
    /// Check every measurement
    pub fn validate(&self) -> Result<(), GeometryError> {
        require_positive("pin_height", self.height)?;
        require_positive("pin_diameter", self.diameter)?;
        require_positive("distance_between_rows", self.distance_between_rows)?;
        require_positive("distance_between_pins", self.distance_between_pins)?;

        // Neighbours in a row would intersect.
        if self.distance_between_pins < self.diameter {
            return Err(GeometryError::invalid(
                "distance_between_pins",
                format!(
                    "is smaller than the pin diameter ({} < {})",
                    self.distance_between_pins, self.diameter
                ),
            ));
        }
        Ok(())
    }
}
