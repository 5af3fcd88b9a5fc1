use std::hash::{Hash, Hasher};

/// A point in the plane
///
/// Equality and hashing compare the raw bit patterns of the coordinates, so two
/// crossings computed from the same edge data are equal only when they are
/// bit-identical. This is what downstream stitching relies on.
#[derive(Debug, Clone, Copy, Default)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    /// Create a point from its coordinates
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other` by parameter `t`
    #[inline]
    pub fn lerp(self, other: Point2, t: f64) -> Point2 {
        Point2 {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
        }
    }

    /// Euclidean distance to `other`
    pub fn distance(self, other: Point2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// True when both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl PartialEq for Point2 {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits() && self.y.to_bits() == other.y.to_bits()
    }
}

impl Eq for Point2 {}

impl Hash for Point2 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// One piece of an extracted contour
///
/// Segments carry no connectivity; stitching them into polylines is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment2 {
    pub start: Point2,
    pub end: Point2,
}

impl Segment2 {
    pub const fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Number of grid steps along each axis
///
/// A grid of `nx` by `ny` steps has `(nx + 1) * (ny + 1)` vertices and `nx * ny` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridSize2 {
    pub nx: usize,
    pub ny: usize,
}

impl GridSize2 {
    pub const fn new(nx: usize, ny: usize) -> Self {
        Self { nx, ny }
    }

    /// Number of cells in the grid
    pub fn cells(&self) -> usize {
        self.nx * self.ny
    }

    /// Number of grid vertices, `(nx + 1) * (ny + 1)`
    ///
    /// A grid with no cells still has vertices; the driver skips sampling them.
    pub fn vertices(&self) -> usize {
        (self.nx + 1) * (self.ny + 1)
    }

    /// True when either axis has no steps
    pub fn is_empty(&self) -> bool {
        self.nx == 0 || self.ny == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_point_lerp() {
        let p1 = Point2::new(0.0, 0.0);
        let p2 = Point2::new(2.0, 4.0);

        assert_eq!(p1.lerp(p2, 0.0), p1);
        assert_eq!(p1.lerp(p2, 1.0), p2);
        assert_eq!(p1.lerp(p2, 0.25), Point2::new(0.5, 1.0));
    }

    #[test]
    fn test_point_equality_is_bitwise() {
        assert_eq!(Point2::new(1.0, 2.0), Point2::new(1.0, 2.0));
        assert_ne!(Point2::new(1.0, 2.0), Point2::new(1.0, 2.0 + 1e-12));
        // 0.0 and -0.0 differ bitwise
        assert_ne!(Point2::new(0.0, 0.0), Point2::new(-0.0, 0.0));
    }

    #[test]
    fn test_point_in_hashmap() {
        let mut map = HashMap::new();
        map.insert(Point2::new(5.0, 10.0), "value1");
        map.insert(Point2::new(5.0, 10.0), "value2");

        // Should overwrite since the points are identical
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Point2::new(5.0, 10.0)), Some(&"value2"));
    }

    #[test]
    fn test_segment_length() {
        let segment = Segment2::new(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        assert_eq!(segment.length(), 5.0);
    }

    #[test]
    fn test_grid_size_counts() {
        let grid = GridSize2::new(4, 3);
        assert_eq!(grid.cells(), 12);
        assert_eq!(grid.vertices(), 20);
        assert!(!grid.is_empty());

        let degenerate = GridSize2::new(4, 0);
        assert_eq!(degenerate.cells(), 0);
        assert_eq!(degenerate.vertices(), 5);
        assert!(degenerate.is_empty());
    }
}
