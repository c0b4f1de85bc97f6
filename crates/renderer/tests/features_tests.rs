//! Tests for loading reference feature layers from GeoJSON files.

use icon_common::BoundingBox;
use renderer::{FeatureLayer, FeatureStyle, RenderError, Shape};
use test_utils::{write_feature_fixtures, NORTH_GERMANY_EXTENT};

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_default_layers() {
    let dir = tempfile::tempdir().unwrap();
    write_feature_fixtures(dir.path()).unwrap();

    for style in FeatureStyle::defaults() {
        let layer = FeatureLayer::load(&style.name, &dir.path().join(&style.file)).unwrap();
        assert_eq!(layer.name, style.name);
        assert!(!layer.shapes.is_empty(), "{} has no shapes", style.name);
    }
}

#[test]
fn test_multi_geometries_are_split() {
    let dir = tempfile::tempdir().unwrap();
    write_feature_fixtures(dir.path()).unwrap();

    let coast = FeatureLayer::load("coastline", &dir.path().join("coastline.geojson")).unwrap();
    // One LineString plus a MultiLineString of two parts
    assert_eq!(coast.shapes.len(), 3);
    assert!(coast.shapes.iter().all(|s| matches!(s, Shape::Line(_))));

    let lakes = FeatureLayer::load("lakes", &dir.path().join("lakes.geojson")).unwrap();
    assert_eq!(lakes.shapes.len(), 3);
    match &lakes.shapes[0] {
        Shape::Polygon(rings) => assert_eq!(rings.len(), 2),
        other => panic!("expected polygon, got {:?}", other),
    }
}

#[test]
fn test_shapes_in_extent() {
    let layer = FeatureLayer::parse(
        "x",
        r#"{"type": "MultiLineString", "coordinates": [
            [[8.0, 54.0], [9.0, 55.0]],
            [[-70.0, 40.0], [-71.0, 41.0]]
        ]}"#,
    )
    .unwrap();

    let window = BoundingBox::from_extent(NORTH_GERMANY_EXTENT);
    assert_eq!(layer.shapes_in(&window).count(), 1);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_file_is_feature_error() {
    let result = FeatureLayer::load("coastline", "/nonexistent/coastline.geojson".as_ref());
    match result {
        Err(RenderError::Feature { path, .. }) => {
            assert!(path.ends_with("coastline.geojson"));
        }
        other => panic!("expected feature error, got {:?}", other),
    }
}

#[test]
fn test_malformed_file_is_feature_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.geojson");
    std::fs::write(&path, r#"{"type": "FeatureCollection", "features": [{"type": "Feature", "geometry": {"type": "LineString"}}]}"#).unwrap();

    assert!(matches!(
        FeatureLayer::load("broken", &path),
        Err(RenderError::Feature { .. })
    ));
}
