use geojson::Value;
use sdf_contour::{
    contour_sdf, do_concurrent_lines, do_concurrent_lines_with_config, levels_to_feature_collection,
    marching_squares_with_config, segments_to_feature_with_precision, ContourConfig, ContourError, FnField,
    Point2, Region2, Segment2,
};
use std::collections::HashMap;

/// Distance from the origin, so level `r` is a circle of radius `r`
fn cone(p: Point2) -> f64 {
    p.x.hypot(p.y)
}

fn test_region() -> Region2 {
    Region2::new(Point2::new(-2.0, -2.0), Point2::new(2.0, 2.0))
}

#[test]
fn test_levels_match_individual_passes() {
    let thresholds = vec![0.5, 1.0, 1.5];
    let levels = do_concurrent_lines(&cone, test_region(), 0.1, &thresholds).unwrap();

    assert_eq!(levels.len(), 3);
    for (level, &threshold) in levels.iter().zip(&thresholds) {
        assert_eq!(level.threshold, threshold);

        let config = ContourConfig::default().with_threshold(threshold);
        let expected = marching_squares_with_config(&cone, test_region(), 0.1, &config).unwrap();
        assert_eq!(level.segments, expected);
    }
}

#[test]
fn test_larger_levels_have_more_segments() {
    let levels = do_concurrent_lines(&cone, test_region(), 0.05, &[0.5, 1.5]).unwrap();
    assert!(levels[1].segments.len() > levels[0].segments.len());
}

#[test]
fn test_level_outside_range_is_empty() {
    let levels = do_concurrent_lines(&cone, test_region(), 0.1, &[1.0, 10.0]).unwrap();
    assert!(!levels[0].segments.is_empty());
    assert!(levels[1].segments.is_empty());

    let collection = levels_to_feature_collection(&levels);
    assert_eq!(collection.features.len(), 1);

    let props = collection.features[0].properties.as_ref().unwrap();
    assert_eq!(props.get("isovalue"), Some(&serde_json::json!(1.0)));
}

#[test]
fn test_invalid_threshold_aborts() {
    let result = do_concurrent_lines(&cone, test_region(), 0.1, &[1.0, f64::NAN]);
    assert!(matches!(result, Err(ContourError::InvalidThreshold(_))));
}

#[test]
fn test_base_config_is_kept() {
    let config = ContourConfig::default().with_parallel_rows(true).with_threshold(99.0);
    let levels = do_concurrent_lines_with_config(&cone, test_region(), 0.1, &[0.75], &config).unwrap();

    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].threshold, 0.75);
    assert!(!levels[0].segments.is_empty());
}

#[test]
fn test_empty_threshold_list() {
    let levels = do_concurrent_lines(&cone, test_region(), 0.1, &[]).unwrap();
    assert!(levels.is_empty());
    assert!(levels_to_feature_collection(&levels).features.is_empty());
}

#[test]
fn test_feature_precision() {
    let segments = vec![Segment2::new(Point2::new(0.123456, 1.0), Point2::new(2.0, -0.987654))];
    let feature = segments_to_feature_with_precision(&segments, 0.0, 3);

    match feature.geometry.map(|g| g.value) {
        Some(Value::MultiLineString(lines)) => {
            assert_eq!(lines, vec![vec![vec![0.123, 1.0], vec![2.0, -0.988]]]);
        }
        other => panic!("expected MultiLineString, got {:?}", other),
    }
}

#[test]
fn test_contour_sdf_uses_bounding_box() {
    let bounds = Region2::new(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0));
    let circle = FnField::new(|p: Point2| p.x.hypot(p.y) - 0.6, bounds);

    let segments = contour_sdf(&circle, 0.05).unwrap();
    assert!(!segments.is_empty());
    for s in &segments {
        assert!(bounds.contains(s.start) && bounds.contains(s.end));
        assert!((s.start.x.hypot(s.start.y) - 0.6).abs() < 0.05);
    }
}

#[test]
fn test_contour_sdf_closes_shape_touching_its_bounds() {
    // The bounding box is tight around the circle
    let bounds = Region2::new(Point2::new(-0.98, -0.98), Point2::new(0.98, 0.98));
    let circle = FnField::new(|p: Point2| p.x.hypot(p.y) - 0.98, bounds);

    let segments = contour_sdf(&circle, 0.05).unwrap();
    assert!(!segments.is_empty());

    let mut counts: HashMap<Point2, usize> = HashMap::new();
    for p in segments.iter().flat_map(|s| [s.start, s.end]) {
        *counts.entry(p).or_insert(0) += 1;
    }
    assert!(counts.values().all(|&count| count == 2));
}

#[test]
fn test_contour_sdf_rejects_bad_step() {
    let bounds = Region2::new(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0));
    let circle = FnField::new(|p: Point2| p.x.hypot(p.y) - 0.5, bounds);

    assert_eq!(contour_sdf(&circle, -0.1), Err(ContourError::InvalidStep(-0.1)));
    assert!(matches!(contour_sdf(&circle, f64::NAN), Err(ContourError::InvalidStep(_))));
}
