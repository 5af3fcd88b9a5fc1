//! Axis-aligned sampling regions.

use crate::error::{ContourError, Result};
use crate::point::Point2;

/// Axis-aligned bounding box that defines the sampling domain
///
/// A region with zero extent on an axis is legal and simply yields no cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region2 {
    pub min: Point2,
    pub max: Point2,
}

impl Region2 {
    /// Create a region from its corners without validating them
    pub const fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// Create a region from its corners, rejecting inverted or non-finite bounds
    pub fn try_new(min: Point2, max: Point2) -> Result<Self> {
        let region = Self { min, max };
        region.validate()?;
        Ok(region)
    }

    /// Check the region invariant: finite corners and extent, `min <= max` on both axes
    pub fn validate(&self) -> Result<()> {
        let ordered = self.min.x <= self.max.x && self.min.y <= self.max.y;
        if !self.min.is_finite() || !self.max.is_finite() || !self.size().is_finite() || !ordered {
            return Err(ContourError::InvalidRegion {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Extent along each axis
    pub fn size(&self) -> Point2 {
        Point2::new(self.max.x - self.min.x, self.max.y - self.min.y)
    }

    pub fn center(&self) -> Point2 {
        self.min.lerp(self.max, 0.5)
    }

    /// Grow the region by `margin` on every side
    pub fn enlarge(&self, margin: f64) -> Self {
        Self::new(
            Point2::new(self.min.x - margin, self.min.y - margin),
            Point2::new(self.max.x + margin, self.max.y + margin),
        )
    }

    /// Check whether a point lies inside the region, boundary included
    pub fn contains(&self, point: Point2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}
