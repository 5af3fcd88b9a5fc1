//! Error types for contour extraction.

use thiserror::Error;

use crate::point::Point2;

/// Errors that can occur while planning or running a contouring pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContourError {
    /// The region has a non-finite corner or extent, or its minimum exceeds its maximum.
    #[error("invalid region: min {min:?} must not exceed max {max:?} and both must be finite")]
    InvalidRegion { min: Point2, max: Point2 },

    /// The target step is zero, negative or not finite.
    #[error("invalid step {0}: must be positive and finite")]
    InvalidStep(f64),

    /// The step is so small relative to the region that an axis needs too many steps.
    #[error("grid too large: {steps} steps on one axis exceeds the limit of {limit}")]
    GridTooLarge { steps: f64, limit: usize },

    /// The iso-value is not finite.
    #[error("invalid threshold {0}: must be finite")]
    InvalidThreshold(f64),

    /// The interpolation snapping tolerance is negative or not finite.
    #[error("invalid epsilon {0}: must be non-negative and finite")]
    InvalidEpsilon(f64),

    /// The field returned NaN or an infinity while the grid was sampled.
    #[error("field returned non-finite value {value} at ({x}, {y})")]
    NonFiniteSample { x: f64, y: f64, value: f64 },
}

pub type Result<T> = std::result::Result<T, ContourError>;
