//! Scalar field capabilities consumed by the contouring pass.

use crate::point::Point2;
use crate::region::Region2;

/// A scalar field over the plane
///
/// Implementations must be pure: the same point always yields the same value.
/// For the output to be meaningful the field should be continuous near the
/// threshold being extracted.
pub trait ScalarField2 {
    fn evaluate(&self, p: Point2) -> f64;
}

/// A signed distance field that knows its own bounds
///
/// Values are negative inside the shape, positive outside and zero on the boundary.
pub trait Sdf2: ScalarField2 {
    fn bounding_box(&self) -> Region2;
}

impl<F> ScalarField2 for F
where
    F: Fn(Point2) -> f64,
{
    fn evaluate(&self, p: Point2) -> f64 {
        self(p)
    }
}

/// Pairs a closure with the region it is defined over, turning it into an [`Sdf2`]
///
/// # Example
///
/// ```
/// use sdf_contour::{FnField, Point2, Region2, Sdf2};
///
/// let circle = FnField::new(
///     |p: Point2| p.x.hypot(p.y) - 1.0,
///     Region2::new(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0)),
/// );
/// assert_eq!(circle.bounding_box().size(), Point2::new(2.0, 2.0));
/// ```
#[derive(Debug, Clone)]
pub struct FnField<F> {
    f: F,
    bounds: Region2,
}

impl<F> FnField<F>
where
    F: Fn(Point2) -> f64,
{
    pub fn new(f: F, bounds: Region2) -> Self {
        Self { f, bounds }
    }
}

impl<F> ScalarField2 for FnField<F>
where
    F: Fn(Point2) -> f64,
{
    fn evaluate(&self, p: Point2) -> f64 {
        (self.f)(p)
    }
}

impl<F> Sdf2 for FnField<F>
where
    F: Fn(Point2) -> f64,
{
    fn bounding_box(&self) -> Region2 {
        self.bounds
    }
}
