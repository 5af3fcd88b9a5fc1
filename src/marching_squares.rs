//! Main marching squares driver
//!
//! This module plans the sampling grid for a region, sweeps it column by column
//! through the [`LineCache`], classifies every cell and collects the resulting
//! segments. It also runs several thresholds concurrently and converts the
//! output into GeoJSON features.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Position, Value as GeoValue};
use rayon::prelude::*;
use tracing::debug;

use crate::cell::{Cell, CellSegments};
use crate::config::ContourConfig;
use crate::error::{ContourError, Result};
use crate::field::{ScalarField2, Sdf2};
use crate::line_cache::{vertex_position, LineCache};
use crate::point::{GridSize2, Point2, Segment2};
use crate::region::Region2;

/// Default coordinate precision for GeoJSON output
pub const DEFAULT_PRECISION: u32 = 9;

/// Round a coordinate value to the given number of decimal places
fn round_coord_with_precision(value: f64, precision: u32) -> f64 {
    let factor = 10_f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Upper bound on the number of grid steps along a single axis
pub const MAX_AXIS_STEPS: usize = 1 << 24;

/// Concrete sampling grid derived from a region and a target step
///
/// The number of steps per axis is `ceil(extent / step)`, and the actual increment
/// is `extent / steps`, so the last grid line lands on the far boundary. That line
/// is pinned to the region maximum rather than computed, so it is exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlan {
    pub region: Region2,
    pub size: GridSize2,
    pub inc: Point2,
}

impl GridPlan {
    /// Plan the grid, rejecting invalid regions and steps before any sampling
    ///
    /// Fails with [`ContourError::GridTooLarge`] when an axis would need more than
    /// [`MAX_AXIS_STEPS`] steps.
    pub fn new(region: Region2, step: f64) -> Result<Self> {
        region.validate()?;
        if !step.is_finite() || step <= 0.0 {
            return Err(ContourError::InvalidStep(step));
        }

        let extent = region.size();
        let nx = axis_steps(extent.x, step)?;
        let ny = axis_steps(extent.y, step)?;
        let inc = Point2::new(axis_increment(extent.x, nx), axis_increment(extent.y, ny));

        Ok(Self {
            region,
            size: GridSize2::new(nx, ny),
            inc,
        })
    }

    /// Position of grid vertex `(x, y)`
    pub fn vertex(&self, x: usize, y: usize) -> Point2 {
        vertex_position(self.region.min, self.inc, self.region.max, self.size, x, y)
    }
}

fn axis_steps(extent: f64, step: f64) -> Result<usize> {
    let steps = (extent / step).ceil();
    if steps.is_nan() || steps > MAX_AXIS_STEPS as f64 {
        return Err(ContourError::GridTooLarge {
            steps,
            limit: MAX_AXIS_STEPS,
        });
    }
    Ok(steps.max(0.0) as usize)
}

fn axis_increment(extent: f64, steps: usize) -> f64 {
    if steps == 0 {
        0.0
    } else {
        extent / steps as f64
    }
}

/// Result of a contouring pass with its sampling statistics
#[derive(Debug, Clone, Default)]
pub struct ContourOutput {
    /// Extracted segments, in column-major scan order
    pub segments: Vec<Segment2>,
    pub grid: GridSize2,
    /// Number of field evaluations made during the pass
    pub evaluations: usize,
    /// Number of cells resolved through the saddle tie-break
    pub saddle_cells: usize,
}

/// Segments extracted for one threshold
#[derive(Debug, Clone)]
pub struct ContourLevel {
    pub threshold: f64,
    pub segments: Vec<Segment2>,
}

/// Accumulates per-cell output into the final segment list
#[derive(Debug, Default)]
struct SegmentCollector {
    segments: Vec<Segment2>,
    saddle_cells: usize,
}

impl SegmentCollector {
    fn extend<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = (bool, CellSegments)>,
    {
        for (saddle, segments) in cells {
            if saddle {
                self.saddle_cells += 1;
            }
            self.segments.extend(segments);
        }
    }
}

/// Extract the zero level set of `field` over `region` as line segments
///
/// # Arguments
///
/// * `field` - Scalar field, typically a signed distance function
/// * `region` - Sampling domain
/// * `step` - Target grid spacing; the actual spacing is adjusted so the grid
///   covers the region exactly
///
/// # Example
///
/// ```
/// use sdf_contour::{marching_squares, Point2, Region2};
///
/// let circle = |p: Point2| p.x.hypot(p.y) - 1.0;
/// let region = Region2::new(Point2::new(-1.5, -1.5), Point2::new(1.5, 1.5));
///
/// let segments = marching_squares(&circle, region, 0.1).unwrap();
/// assert!(!segments.is_empty());
/// ```
pub fn marching_squares<F>(field: &F, region: Region2, step: f64) -> Result<Vec<Segment2>>
where
    F: ScalarField2 + ?Sized,
{
    marching_squares_with_config(field, region, step, &ContourConfig::default())
}

/// Extract a level set with an explicit configuration
pub fn marching_squares_with_config<F>(
    field: &F,
    region: Region2,
    step: f64,
    config: &ContourConfig,
) -> Result<Vec<Segment2>>
where
    F: ScalarField2 + ?Sized,
{
    marching_squares_detailed(field, region, step, config).map(|output| output.segments)
}

/// Extract the boundary of an SDF over its own bounding box
///
/// The box is enlarged by one `step` on every side, so a shape that touches its
/// bounds still gets a closed contour.
pub fn contour_sdf<S>(sdf: &S, step: f64) -> Result<Vec<Segment2>>
where
    S: Sdf2 + ?Sized,
{
    if !step.is_finite() || step <= 0.0 {
        return Err(ContourError::InvalidStep(step));
    }
    marching_squares(sdf, sdf.bounding_box().enlarge(step), step)
}

/// Extract a level set and report the sampling statistics of the pass
///
/// All parameters are validated before the field is evaluated. A non-finite
/// sample aborts the pass and no partial output is returned.
pub fn marching_squares_detailed<F>(
    field: &F,
    region: Region2,
    step: f64,
    config: &ContourConfig,
) -> Result<ContourOutput>
where
    F: ScalarField2 + ?Sized,
{
    config.validate()?;
    let plan = GridPlan::new(region, step)?;
    let GridSize2 { nx, ny } = plan.size;

    debug!(
        nx,
        ny,
        dx = plan.inc.x,
        dy = plan.inc.y,
        threshold = config.threshold,
        "starting marching squares pass"
    );

    if plan.size.is_empty() {
        debug!("degenerate grid, no cells to contour");
        return Ok(ContourOutput {
            grid: plan.size,
            ..ContourOutput::default()
        });
    }

    let start = std::time::Instant::now();
    let threshold = config.threshold;
    let epsilon = config.epsilon;

    let mut cache = LineCache::for_region(&region, plan.inc, plan.size);
    let mut collector = SegmentCollector::default();

    // evaluate the field for x = 0
    cache.evaluate(field, 0)?;

    for x in 0..nx {
        // read the x + 1 column
        cache.evaluate(field, x + 1)?;

        let cache = &cache;
        let classify = move |y: usize| {
            let corners = [
                cache.vertex(x, y),
                cache.vertex(x + 1, y),
                cache.vertex(x + 1, y + 1),
                cache.vertex(x, y + 1),
            ];
            let cell = Cell::new(corners, cache.cell_values(y), threshold);
            (cell.is_saddle(), cell.segments(epsilon))
        };

        if config.parallel_rows {
            let column: Vec<(bool, CellSegments)> = (0..ny).into_par_iter().map(classify).collect();
            collector.extend(column);
        } else {
            collector.extend((0..ny).map(classify));
        }
    }

    let output = ContourOutput {
        segments: collector.segments,
        grid: plan.size,
        evaluations: cache.evaluations(),
        saddle_cells: collector.saddle_cells,
    };

    debug!(
        segments = output.segments.len(),
        evaluations = output.evaluations,
        saddle_cells = output.saddle_cells,
        elapsed = ?start.elapsed(),
        "finished marching squares pass"
    );

    Ok(output)
}

/// Extract several level sets concurrently using parallel processing
///
/// Each threshold runs as an independent pass on rayon's work-stealing pool.
/// Levels are returned in the order of `thresholds`; the first failing pass
/// aborts the whole call.
///
/// # Example
///
/// ```
/// use sdf_contour::{do_concurrent_lines, Point2, Region2};
///
/// let cone = |p: Point2| p.x.hypot(p.y);
/// let region = Region2::new(Point2::new(-2.0, -2.0), Point2::new(2.0, 2.0));
///
/// let levels = do_concurrent_lines(&cone, region, 0.25, &[0.5, 1.0, 1.5]).unwrap();
/// assert_eq!(levels.len(), 3);
/// ```
pub fn do_concurrent_lines<F>(
    field: &F,
    region: Region2,
    step: f64,
    thresholds: &[f64],
) -> Result<Vec<ContourLevel>>
where
    F: ScalarField2 + Sync + ?Sized,
{
    do_concurrent_lines_with_config(field, region, step, thresholds, &ContourConfig::default())
}

/// Concurrent extraction with a base configuration whose threshold is replaced
/// by each entry of `thresholds`
pub fn do_concurrent_lines_with_config<F>(
    field: &F,
    region: Region2,
    step: f64,
    thresholds: &[f64],
    config: &ContourConfig,
) -> Result<Vec<ContourLevel>>
where
    F: ScalarField2 + Sync + ?Sized,
{
    thresholds
        .par_iter()
        .map(|&threshold| {
            let level_config = config.clone().with_threshold(threshold);
            let segments = marching_squares_with_config(field, region, step, &level_config)?;
            Ok(ContourLevel { threshold, segments })
        })
        .collect()
}

/// Convert segments into a GeoJSON Feature with MultiLineString geometry
///
/// Each segment becomes a two-point line string. The threshold is stored in the
/// `"isovalue"` property.
pub fn segments_to_feature(segments: &[Segment2], threshold: f64) -> Feature {
    segments_to_feature_with_precision(segments, threshold, DEFAULT_PRECISION)
}

/// Convert segments into a GeoJSON Feature, rounding coordinates to `precision`
/// decimal places
pub fn segments_to_feature_with_precision(segments: &[Segment2], threshold: f64, precision: u32) -> Feature {
    let position = |p: Point2| -> Position {
        vec![
            round_coord_with_precision(p.x, precision),
            round_coord_with_precision(p.y, precision),
        ]
    };

    let lines: Vec<Vec<Position>> = segments
        .iter()
        .map(|segment| vec![position(segment.start), position(segment.end)])
        .collect();

    let mut feature = Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoValue::MultiLineString(lines))),
        id: None,
        properties: Some(JsonObject::new()),
        foreign_members: None,
    };

    if let Some(props) = feature.properties.as_mut() {
        props.insert("isovalue".to_string(), serde_json::json!(threshold));
    }

    feature
}

/// Convert concurrently extracted levels into a GeoJSON FeatureCollection
///
/// Only levels with at least one segment are included.
pub fn levels_to_feature_collection(levels: &[ContourLevel]) -> FeatureCollection {
    let features = levels
        .iter()
        .filter(|level| !level.segments.is_empty())
        .map(|level| segments_to_feature(&level.segments, level.threshold))
        .collect();

    FeatureCollection {
        bbox: None,
        foreign_members: None,
        features,
    }
}
