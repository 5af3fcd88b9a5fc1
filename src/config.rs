//! Contouring pass configuration.

use crate::cell::DEFAULT_EPSILON;
use crate::error::{ContourError, Result};

/// Configuration for a contouring pass
#[derive(Debug, Clone, PartialEq)]
pub struct ContourConfig {
    /// Iso-value to extract (0 for the boundary of a signed distance field)
    pub threshold: f64,
    /// Snapping tolerance used when interpolating edge crossings
    pub epsilon: f64,
    /// Classify the cells of each column pair on the rayon pool
    pub parallel_rows: bool,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            epsilon: DEFAULT_EPSILON,
            parallel_rows: false,
        }
    }
}

impl ContourConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_parallel_rows(mut self, parallel_rows: bool) -> Self {
        self.parallel_rows = parallel_rows;
        self
    }

    /// Reject a non-finite threshold or a negative / non-finite epsilon
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() {
            return Err(ContourError::InvalidThreshold(self.threshold));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ContourError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }
}
