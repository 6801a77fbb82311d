//! Geometry error types

use thiserror::Error;

/// Error raised when a measurement record cannot produce geometry
///
/// There is a single kind: the input is non-positive, non-finite, or
/// internally inconsistent. It is always detected before any geometry is
/// computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A measurement is out of range or disagrees with the others
    #[error("invalid specification: `{field}` {reason}")]
    InvalidSpecification {
        /// Name of the offending field
        field: &'static str,
        /// Human-readable description of the problem
        reason: String,
    },
}

impl GeometryError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        GeometryError::InvalidSpecification {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the field that failed validation
    pub fn field(&self) -> &'static str {
        match self {
            GeometryError::InvalidSpecification { field, .. } => field,
        }
    }
}

/// Check that a measurement is finite and strictly positive
pub(crate) fn require_positive(field: &'static str, value: f32) -> Result<(), GeometryError> {
    if !value.is_finite() {
        return Err(GeometryError::invalid(field, format!("must be finite, got {}", value)));
    }
    if value <= 0.0 {
        return Err(GeometryError::invalid(field, format!("must be > 0, got {}", value)));
    }
    Ok(())
}
