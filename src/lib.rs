//! # sdf-contour
//!
//! A Rust implementation of the marching squares algorithm for extracting the
//! boundary of a 2D signed distance field as line segments.
//!
//! The field is an opaque callable that maps a point to a scalar. The region of
//! interest is covered by a regular grid, every grid vertex is sampled exactly
//! once, and each cell whose corners straddle the threshold contributes one or
//! two segments. The output is a segment soup: stitching it into polylines or
//! polygons is left to the caller.
//!
//! ## Examples
//!
//! ### Contouring a closure
//!
//! ```rust
//! use sdf_contour::{marching_squares, Point2, Region2};
//!
//! // Unit circle as a signed distance function
//! let circle = |p: Point2| p.x.hypot(p.y) - 1.0;
//! let region = Region2::new(Point2::new(-1.25, -1.25), Point2::new(1.25, 1.25));
//!
//! let segments = marching_squares(&circle, region, 0.05).unwrap();
//! for segment in &segments {
//!     assert!((segment.start.x.hypot(segment.start.y) - 1.0).abs() < 0.05);
//! }
//! ```
//!
//! ### Contouring an SDF over its own bounds
//!
//! ```rust
//! use sdf_contour::{contour_sdf, FnField, Point2, Region2};
//!
//! let bounds = Region2::new(Point2::new(-2.0, -1.0), Point2::new(2.0, 1.0));
//! let slab = FnField::new(|p: Point2| p.y.abs() - 0.5, bounds);
//!
//! let segments = contour_sdf(&slab, 0.1).unwrap();
//! assert!(!segments.is_empty());
//! ```
//!
//! ### Other thresholds and concurrent levels
//!
//! ```rust
//! use sdf_contour::{
//!     do_concurrent_lines, levels_to_feature_collection, marching_squares_with_config,
//!     ContourConfig, Point2, Region2,
//! };
//!
//! let field = |p: Point2| p.x * p.x + p.y * p.y;
//! let region = Region2::new(Point2::new(-3.0, -3.0), Point2::new(3.0, 3.0));
//!
//! // Single level at value 4 (circle of radius 2), cells classified in parallel
//! let config = ContourConfig::default().with_threshold(4.0).with_parallel_rows(true);
//! let segments = marching_squares_with_config(&field, region, 0.1, &config).unwrap();
//! assert!(!segments.is_empty());
//!
//! // Several levels at once, exported as GeoJSON
//! let levels = do_concurrent_lines(&field, region, 0.1, &[1.0, 4.0, 100.0]).unwrap();
//! let collection = levels_to_feature_collection(&levels);
//! assert_eq!(collection.features.len(), 2);
//! ```
//!
//! ## Saddle cells
//!
//! Cells whose diagonally opposite corners share a side are ambiguous. They are
//! resolved with a single policy: the bilinear centre value (the mean of the
//! four corners) decides whether the inside corners connect through the cell.
//!
//! ## Logging
//!
//! Passes emit `tracing` events at `debug` level (grid size, segment and
//! evaluation counts, timing) and one `trace` event per sampled column. The
//! library never installs a subscriber.

mod cell;
mod config;
mod edge;
mod error;
mod field;
mod line_cache;
mod marching_squares;
mod point;
mod region;

pub use cell::{
    cell_segments, center_value, interpolate, saddle_center_inside, Cell, CellSegments, DEFAULT_EPSILON,
};
pub use config::ContourConfig;
pub use edge::{is_saddle, Edge, EDGE_CORNERS, EDGE_TABLE, LINE_TABLE, SADDLE_CENTER_INSIDE};
pub use error::{ContourError, Result};
pub use field::{FnField, ScalarField2, Sdf2};
pub use line_cache::LineCache;
pub use marching_squares::{
    contour_sdf,
    do_concurrent_lines,
    do_concurrent_lines_with_config,
    levels_to_feature_collection,
    marching_squares,
    marching_squares_detailed,
    marching_squares_with_config,
    segments_to_feature,
    segments_to_feature_with_precision,
    ContourLevel,
    ContourOutput,
    GridPlan,
    DEFAULT_PRECISION,
    MAX_AXIS_STEPS,
};
pub use point::{GridSize2, Point2, Segment2};
pub use region::Region2;
