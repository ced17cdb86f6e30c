use kml_route_meta::{RouteMetadata, parse_route};

fn load_fixture(path: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{path}")).unwrap()
}

fn parse(path: &str) -> RouteMetadata {
    parse_route(&load_fixture(path)).unwrap()
}

fn approx(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

// ---- basic/ ----

#[test]
fn test_01_single_track() {
    let meta = parse("basic/01_single_track.kml");
    assert_eq!(meta.name, "Лесная петля");
    assert_eq!(
        meta.description,
        "Круговой маршрут по лесным дорогам. Покрытие: грунт, асфальт"
    );
    assert_eq!(meta.segment_count(), 1);
    assert_eq!(meta.poi_count(), 1);
    assert_eq!(meta.points_of_interest[0].name, "Родник");

    approx(meta.stats.track_km, 11.12, 0.05);
    approx(meta.stats.span_km.unwrap(), 11.13, 0.05);
    assert_eq!(meta.stats.elevation_min_m, Some(100.0));
    assert_eq!(meta.stats.elevation_max_m, Some(150.0));
    approx(meta.stats.climb_m.unwrap(), 30.0, 1e-9);
    assert_eq!(meta.stats.descent_m, Some(0.0));

    let bbox = meta.bbox.unwrap();
    assert_eq!((bbox.min_lat, bbox.max_lat), (55.0, 55.1));
    assert_eq!((bbox.min_lon, bbox.max_lon), (37.0, 37.01));
}

#[test]
fn test_02_points_only() {
    let meta = parse("basic/02_points_only.kml");
    assert_eq!(meta.segment_count(), 0);
    assert_eq!(meta.stats.track_km, 0.0);
    assert!(!meta.stats.has_elevation());

    let names: Vec<&str> = meta
        .points_of_interest
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Bridge", ""]);

    // Points alone still define the extent of the route.
    assert!(meta.bbox.is_some());
    assert!(meta.stats.span_km.is_some());
}

// ---- nested/ ----

#[test]
fn test_03_nesting_depth_does_not_matter() {
    let flat = parse("basic/01_single_track.kml");
    let nested = parse("nested/03_nested_folders.kml");
    assert_eq!(flat, nested);
}

// ---- legacy/ ----

#[test]
fn test_04_legacy_stats_without_geometry() {
    let meta = parse("legacy/04_legacy_only.kml");
    assert_eq!(meta.segment_count(), 0);
    assert!(meta.bbox.is_none());
    assert_eq!(meta.stats.track_km, 35.7);
    assert_eq!(meta.stats.span_km, None);
    assert_eq!(meta.stats.elevation_min_m, Some(130.0));
    assert_eq!(meta.stats.elevation_max_m, Some(245.0));
    assert_eq!(meta.stats.climb_m, Some(410.0));
    assert_eq!(meta.stats.descent_m, Some(405.0));
}

#[test]
fn test_05_computed_distance_overrides_legacy() {
    let meta = parse("legacy/05_legacy_with_multigeometry.kml");
    assert_eq!(meta.segment_count(), 3);
    approx(meta.stats.track_km, 22.24, 0.1);
    // Geometry has no elevation, so the first description block still supplies it.
    assert_eq!(meta.stats.climb_m, Some(410.0));
    assert_eq!(meta.stats.descent_m, None);

    let bbox = meta.bbox.unwrap();
    assert_eq!((bbox.min_lat, bbox.max_lat), (55.0, 56.0));
    assert_eq!((bbox.min_lon, bbox.max_lon), (37.0, 38.0));
}

// ---- edge_cases/ ----

#[test]
fn test_06_empty_document() {
    let meta = parse("edge_cases/06_empty.kml");
    assert_eq!(meta.name, "Empty");
    assert_eq!(meta.description, "");
    assert!(meta.bbox.is_none());
    assert_eq!(meta.segment_count(), 0);
    assert_eq!(meta.stats.track_km, 0.0);
    assert!(meta.points_of_interest.is_empty());
}

#[test]
fn test_07_malformed_markup() {
    let err = parse_route(&load_fixture("edge_cases/07_malformed.kml")).unwrap_err();
    assert!(err.is_document_error(), "unexpected error: {err}");
}

#[test]
fn test_08_clamped_to_ground_has_no_elevation() {
    let meta = parse("edge_cases/08_clamped_to_ground.kml");
    assert_eq!(meta.segment_count(), 1);
    assert!(!meta.stats.has_elevation());
    assert_eq!(meta.segments[0].points[0].ele, Some(0.0));
}

#[test]
fn test_09_no_document_node_and_bad_tuples() {
    let meta = parse("edge_cases/09_no_document.kml");
    assert_eq!(meta.name, "Bare root");
    assert_eq!(meta.segment_count(), 1);
    assert_eq!(meta.segments[0].points.len(), 2);
    approx(meta.stats.track_km, 22.24, 0.1);
    assert_eq!(meta.stats.elevation_min_m, Some(10.0));
    assert_eq!(meta.stats.elevation_max_m, Some(30.0));
    assert_eq!(meta.stats.climb_m, Some(0.0));
}

#[test]
fn test_10_deeply_nested_folders() {
    let depth = 100_000;
    let kml = format!(
        "<kml><Document><name>Deep</name>{}<Placemark><LineString><coordinates>\
         37.0,55.0 37.0,55.1</coordinates></LineString></Placemark>{}</Document></kml>",
        "<Folder>".repeat(depth),
        "</Folder>".repeat(depth)
    );
    let meta = parse_route(&kml).unwrap();
    assert_eq!(meta.name, "Deep");
    assert_eq!(meta.segment_count(), 1);
    approx(meta.stats.track_km, 11.12, 0.05);
}
