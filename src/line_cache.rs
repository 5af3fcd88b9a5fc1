//! Double-buffered column cache for grid sampling.
//!
//! The driver sweeps the grid one column at a time. Each column of samples is
//! used by the cells on both of its sides, so the cache keeps the previous and
//! the newest column and swaps the two buffers as the sweep advances. Every grid
//! vertex is evaluated exactly once per pass.

use tracing::trace;

use crate::error::{ContourError, Result};
use crate::field::ScalarField2;
use crate::point::{GridSize2, Point2};
use crate::region::Region2;

/// Samples for two adjacent grid columns
#[derive(Debug)]
pub struct LineCache {
    /// Region minimum, position of grid vertex (0, 0)
    base: Point2,
    /// Distance between grid lines along each axis
    inc: Point2,
    /// Position of grid vertex (nx, ny)
    far: Point2,
    steps: GridSize2,

    /// Column `last_column - 1`
    val0: Vec<f64>,
    /// Column `last_column`
    val1: Vec<f64>,

    last_column: Option<usize>,
    evaluations: usize,
}

impl LineCache {
    pub fn new(base: Point2, inc: Point2, steps: GridSize2) -> Self {
        let far = Point2::new(
            base.x + steps.nx as f64 * inc.x,
            base.y + steps.ny as f64 * inc.y,
        );
        Self::with_far_corner(base, inc, steps, far)
    }

    /// Cache for a grid spanning `region`, pinning the last grid lines to its maximum
    pub fn for_region(region: &Region2, inc: Point2, steps: GridSize2) -> Self {
        Self::with_far_corner(region.min, inc, steps, region.max)
    }

    fn with_far_corner(base: Point2, inc: Point2, steps: GridSize2, far: Point2) -> Self {
        Self {
            base,
            inc,
            far,
            steps,
            val0: Vec::with_capacity(steps.ny + 1),
            val1: Vec::with_capacity(steps.ny + 1),
            last_column: None,
            evaluations: 0,
        }
    }

    /// Position of grid vertex `(x, y)`
    ///
    /// Computed from the indices rather than accumulated, so neighbouring cells
    /// see bit-identical coordinates for the vertices they share.
    #[inline]
    pub fn vertex(&self, x: usize, y: usize) -> Point2 {
        vertex_position(self.base, self.inc, self.far, self.steps, x, y)
    }

    /// Swap the buffers and sample the field along column `x`
    ///
    /// Columns must be requested once each, in strictly increasing order.
    /// Aborts on the first non-finite sample.
    pub fn evaluate<F>(&mut self, field: &F, x: usize) -> Result<()>
    where
        F: ScalarField2 + ?Sized,
    {
        if let Some(last) = self.last_column {
            assert!(x > last, "column {} requested after column {}", x, last);
        }

        std::mem::swap(&mut self.val0, &mut self.val1);
        self.val1.clear();

        for y in 0..=self.steps.ny {
            let p = self.vertex(x, y);
            let value = field.evaluate(p);
            if !value.is_finite() {
                return Err(ContourError::NonFiniteSample { x: p.x, y: p.y, value });
            }
            self.val1.push(value);
        }

        self.evaluations += self.steps.ny + 1;
        self.last_column = Some(x);
        trace!(column = x, samples = self.steps.ny + 1, "sampled grid column");
        Ok(())
    }

    /// Cached sample for the left (`x == 0`) or right (`x == 1`) column of the
    /// current column pair at row `y`
    ///
    /// # Panics
    ///
    /// Panics if `x > 1`, `y > ny`, or the requested column was never sampled.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        assert!(x <= 1, "relative column {} out of range", x);
        assert!(y <= self.steps.ny, "row {} out of range 0..={}", y, self.steps.ny);
        let column = if x == 0 { &self.val0 } else { &self.val1 };
        assert!(!column.is_empty(), "column {} read before it was sampled", x);
        column[y]
    }

    /// The four corner samples of cell row `y` in the current column pair,
    /// wound counter-clockwise from the bottom-left
    #[inline]
    pub fn cell_values(&self, y: usize) -> [f64; 4] {
        [self.get(0, y), self.get(1, y), self.get(1, y + 1), self.get(0, y + 1)]
    }

    /// Total field evaluations made by this cache
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn steps(&self) -> GridSize2 {
        self.steps
    }
}

/// Grid vertex position; the last index on each axis maps exactly onto `far`
#[inline]
pub(crate) fn vertex_position(base: Point2, inc: Point2, far: Point2, steps: GridSize2, x: usize, y: usize) -> Point2 {
    let px = if x == steps.nx { far.x } else { base.x + x as f64 * inc.x };
    let py = if y == steps.ny { far.y } else { base.y + y as f64 * inc.y };
    Point2::new(px, py)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cache() -> LineCache {
        LineCache::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.5), GridSize2::new(3, 2))
    }

    #[test]
    fn test_swap_and_lookup() {
        let field = |p: Point2| p.x * 10.0 + p.y;
        let mut lc = cache();

        lc.evaluate(&field, 0).unwrap();
        lc.evaluate(&field, 1).unwrap();
        assert_eq!(lc.get(0, 0), 0.0);
        assert_eq!(lc.get(0, 2), 1.0);
        assert_eq!(lc.get(1, 1), 10.5);

        lc.evaluate(&field, 2).unwrap();
        assert_eq!(lc.get(0, 1), 10.5);
        assert_eq!(lc.get(1, 2), 21.0);
        assert_eq!(lc.cell_values(0), [10.0, 20.0, 20.5, 10.5]);
    }

    #[test]
    fn test_each_vertex_evaluated_once() {
        let count = AtomicUsize::new(0);
        let field = |p: Point2| {
            count.fetch_add(1, Ordering::Relaxed);
            p.x
        };
        let mut lc = cache();
        for x in 0..=3 {
            lc.evaluate(&field, x).unwrap();
        }

        assert_eq!(count.load(Ordering::Relaxed), 4 * 3);
        assert_eq!(lc.evaluations(), 12);
    }

    #[test]
    fn test_non_finite_sample_aborts() {
        let field = |p: Point2| if p.y > 0.6 { f64::NAN } else { 1.0 };
        let mut lc = cache();

        let err = lc.evaluate(&field, 0).unwrap_err();
        assert!(matches!(
            err,
            ContourError::NonFiniteSample { x, y, .. } if x == 0.0 && y == 1.0
        ));
    }

    #[test]
    fn test_vertex_positions_are_indexed() {
        let lc = LineCache::new(Point2::new(-1.0, 2.0), Point2::new(0.1, 0.1), GridSize2::new(10, 10));
        assert_eq!(lc.vertex(3, 7), Point2::new(-1.0 + 3.0 * 0.1, 2.0 + 7.0 * 0.1));
    }

    #[test]
    fn test_last_grid_line_lands_on_region_max() {
        let region = Region2::new(Point2::new(-2.0, -2.0), Point2::new(2.0, 2.0));
        let steps = GridSize2::new(58, 58);
        let inc = Point2::new(4.0 / 58.0, 4.0 / 58.0);
        let lc = LineCache::for_region(&region, inc, steps);

        assert_eq!(lc.vertex(58, 58), Point2::new(2.0, 2.0));
        assert_eq!(lc.vertex(0, 0), Point2::new(-2.0, -2.0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_row_out_of_range_panics() {
        let field = |_: Point2| 1.0;
        let mut lc = cache();
        lc.evaluate(&field, 0).unwrap();
        lc.get(0, 3);
    }

    #[test]
    #[should_panic(expected = "before it was sampled")]
    fn test_unadvanced_column_panics() {
        let field = |_: Point2| 1.0;
        let mut lc = cache();
        lc.evaluate(&field, 0).unwrap();
        // Only the right column has been sampled so far
        lc.get(0, 0);
    }

    #[test]
    #[should_panic(expected = "requested after")]
    fn test_columns_must_increase() {
        let field = |_: Point2| 1.0;
        let mut lc = cache();
        lc.evaluate(&field, 1).unwrap();
        lc.evaluate(&field, 1).unwrap();
    }
}
