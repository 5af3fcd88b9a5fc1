use arrayvec::ArrayVec;

use crate::edge::{self, Edge, EDGE_TABLE, LINE_TABLE, SADDLE_CENTER_INSIDE};
use crate::point::{Point2, Segment2};

/// Default snapping tolerance for edge interpolation
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Segments produced by a single cell (at most two)
pub type CellSegments = ArrayVec<Segment2, 2>;

/// A grid cell for isoline extraction
///
/// Corners wind counter-clockwise from the bottom-left: bottom-left, bottom-right,
/// top-right, top-left. Each corner is classified as inside (below the threshold)
/// or outside, giving 16 possible configurations.
#[derive(Debug, Clone)]
pub struct Cell {
    corners: [Point2; 4],
    values: [f64; 4],
    threshold: f64,

    /// Case code (0-15), bit i set when corner i is inside
    code: u8,
}

impl Cell {
    /// Create a new cell and classify its corners against `threshold`
    ///
    /// A corner exactly on the threshold counts as outside.
    pub fn new(corners: [Point2; 4], values: [f64; 4], threshold: f64) -> Self {
        let mut code = 0u8;
        for (i, &v) in values.iter().enumerate() {
            if v < threshold {
                code |= 1 << i;
            }
        }

        Self {
            corners,
            values,
            threshold,
            code,
        }
    }

    /// Case code (0-15)
    pub fn code(&self) -> u8 {
        self.code
    }

    /// Bitmask of edges crossed by the contour
    pub fn crossed_edges(&self) -> u8 {
        EDGE_TABLE[self.code as usize]
    }

    pub fn is_saddle(&self) -> bool {
        edge::is_saddle(self.code)
    }

    pub fn corners(&self) -> &[Point2; 4] {
        &self.corners
    }

    pub fn values(&self) -> &[f64; 4] {
        &self.values
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Bilinear estimate of the field at the cell centre
    pub fn center_value(&self) -> f64 {
        center_value(&self.values)
    }

    /// Crossing point of the contour on `edge`
    pub fn crossing(&self, edge: Edge, epsilon: f64) -> Point2 {
        let [a, b] = edge.corners();
        interpolate(
            self.corners[a],
            self.corners[b],
            self.values[a],
            self.values[b],
            self.threshold,
            epsilon,
        )
    }

    /// Line segments approximating the contour inside this cell
    pub fn segments(&self, epsilon: f64) -> CellSegments {
        let mut segments = CellSegments::new();

        let crossed = self.crossed_edges();
        if crossed == 0 {
            return segments;
        }

        let mut points = [Point2::default(); 4];
        for edge in Edge::ALL {
            if crossed & (1 << edge.index()) != 0 {
                points[edge.index()] = self.crossing(edge, epsilon);
            }
        }

        for [from, to] in edge_pairs(self.code, &self.values, self.threshold) {
            segments.push(Segment2::new(points[from.index()], points[to.index()]));
        }

        segments
    }
}

/// Generate the line segments for one cell
///
/// Pure function of the corners, their samples and the threshold.
pub fn cell_segments(corners: [Point2; 4], values: [f64; 4], threshold: f64, epsilon: f64) -> CellSegments {
    Cell::new(corners, values, threshold).segments(epsilon)
}

/// Edge pairing for a case code, resolving saddles through the centre value
fn edge_pairs(code: u8, values: &[f64; 4], threshold: f64) -> &'static [[Edge; 2]] {
    if edge::is_saddle(code) && saddle_center_inside(values, threshold) {
        return SADDLE_CENTER_INSIDE[(code == 10) as usize];
    }
    LINE_TABLE[code as usize]
}

/// Saddle tie-break shared by every ambiguous cell of a pass
///
/// The centre is inside when its bilinear estimate is below the threshold, in
/// which case the two inside corners are joined through the cell.
pub fn saddle_center_inside(values: &[f64; 4], threshold: f64) -> bool {
    center_value(values) < threshold
}

/// Mean of the four corners, the value of the bilinear interpolant at the centre
#[inline]
pub fn center_value(values: &[f64; 4]) -> f64 {
    (values[0] + values[1] + values[2] + values[3]) * 0.25
}

/// Locate the threshold crossing between two samples by linear interpolation
///
/// Snaps to `p1` when `v1` is within `epsilon` of the threshold, to `p2` when `v2`
/// is, and to `p1` when the two samples are too close to divide by. The guards run
/// before the division so no NaN or infinity is produced from finite input.
#[inline]
pub fn interpolate(p1: Point2, p2: Point2, v1: f64, v2: f64, threshold: f64, epsilon: f64) -> Point2 {
    if (threshold - v1).abs() < epsilon {
        return p1;
    }
    if (threshold - v2).abs() < epsilon {
        return p2;
    }
    if (v1 - v2).abs() < epsilon {
        return p1;
    }
    let t = (threshold - v1) / (v2 - v1);
    p1.lerp(p2, t)
}
