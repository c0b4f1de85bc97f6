//! Tests for triangulation construction and dateline masking.

use mesh::{CellField, MeshError, Triangulation, DATELINE_THRESHOLD_DEG};
use test_utils::{create_regional_icon_grid, create_temperature_cells, single_cell_radians};

// ============================================================================
// Structural invariants
// ============================================================================

#[test]
fn test_counts_match_cell_count() {
    let grid = create_regional_icon_grid(12, 9, [5.0, 15.0, 50.0, 60.0]);
    let ncell = grid.num_cells();

    let tri = Triangulation::from_radians(&grid.lon_vertices, &grid.lat_vertices).unwrap();

    assert_eq!(tri.num_triangles(), ncell);
    assert_eq!(tri.num_vertices(), 3 * ncell);
    assert_eq!(tri.lon().len(), 3 * ncell);
    assert_eq!(tri.lat().len(), 3 * ncell);
    assert_eq!(tri.mask().len(), tri.num_triangles());
}

#[test]
fn test_triangles_are_contiguous_triplets() {
    let grid = create_regional_icon_grid(4, 3, [0.0, 4.0, 0.0, 3.0]);
    let tri = Triangulation::from_radians(&grid.lon_vertices, &grid.lat_vertices).unwrap();

    for (i, t) in tri.triangles().iter().enumerate() {
        assert_eq!(*t, [3 * i, 3 * i + 1, 3 * i + 2]);
    }
}

#[test]
fn test_vertices_not_shared_between_cells() {
    let grid = create_regional_icon_grid(3, 3, [0.0, 3.0, 0.0, 3.0]);
    let tri = Triangulation::from_radians(&grid.lon_vertices, &grid.lat_vertices).unwrap();

    let mut seen = vec![false; tri.num_vertices()];
    for t in tri.triangles() {
        for &v in t {
            assert!(!seen[v], "vertex {} referenced twice", v);
            seen[v] = true;
        }
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn test_radians_converted_to_degrees() {
    let (lon, lat) = single_cell_radians([10.0, 11.0, 12.0], [53.0, 54.0, 53.0]);
    let tri = Triangulation::from_radians(&lon, &lat).unwrap();

    let [(lon0, lat0), (lon1, _), (lon2, lat2)] = tri.triangle_vertices(0).unwrap();
    assert!((lon0 - 10.0).abs() < 1e-9);
    assert!((lon1 - 11.0).abs() < 1e-9);
    assert!((lon2 - 12.0).abs() < 1e-9);
    assert!((lat0 - 53.0).abs() < 1e-9);
    assert!((lat2 - 53.0).abs() < 1e-9);
}

#[test]
fn test_empty_grid() {
    let tri = Triangulation::from_radians(&[], &[]).unwrap();
    assert_eq!(tri.num_triangles(), 0);
    assert_eq!(tri.mask().len(), 0);
}

#[test]
fn test_length_mismatch_rejected() {
    let result = Triangulation::from_radians(&[0.0, 0.1, 0.2], &[0.0, 0.1]);
    assert!(matches!(
        result,
        Err(MeshError::LengthMismatch { lon: 3, lat: 2 })
    ));
}

#[test]
fn test_partial_triangle_rejected() {
    let result = Triangulation::from_radians(&[0.0; 4], &[0.0; 4]);
    assert!(matches!(result, Err(MeshError::NotTriangles(4))));
}

// ============================================================================
// Dateline mask
// ============================================================================

#[test]
fn test_dateline_cell_is_masked() {
    let (lon, lat) = single_cell_radians([179.0, -179.0, 0.0], [0.0, 1.0, 2.0]);
    let tri = Triangulation::from_radians(&lon, &lat).unwrap();
    assert!(tri.is_masked(0));
    assert_eq!(tri.masked_count(), 1);
}

#[test]
fn test_regional_cell_is_not_masked() {
    let (lon, lat) = single_cell_radians([10.0, 11.0, 12.0], [53.0, 54.0, 53.0]);
    let tri = Triangulation::from_radians(&lon, &lat).unwrap();
    assert!(!tri.is_masked(0));
    assert_eq!(tri.visible_triangles().collect::<Vec<_>>(), vec![0]);
}

#[test]
fn test_mask_marks_exactly_wide_triangles() {
    let lon = vec![
        10.0, 11.0, 12.0, // narrow
        179.5, -179.5, 179.0, // crosses the dateline
        -170.0, 0.0, 170.0, // outer pair 340°
        -90.0, 0.0, 90.0, // exactly 180°, kept
    ];
    let lat = vec![0.0; lon.len()];
    let tri = Triangulation::from_degrees(lon.clone(), lat).unwrap();

    for i in 0..tri.num_triangles() {
        let l = &lon[3 * i..3 * i + 3];
        let span = l
            .iter()
            .flat_map(|a| l.iter().map(move |b| (a - b).abs()))
            .fold(0.0f64, f64::max);
        assert_eq!(tri.is_masked(i), span > DATELINE_THRESHOLD_DEG, "triangle {}", i);
    }
    assert_eq!(tri.mask(), &[false, true, true, false]);
}

#[test]
fn test_global_grid_masks_only_seam_cells() {
    // A band that wraps the whole globe has exactly one column of seam cells
    let grid = create_regional_icon_grid(36, 2, [-180.0, 180.0, -10.0, 10.0]);
    let tri = Triangulation::from_radians(&grid.lon_vertices, &grid.lat_vertices).unwrap();
    assert_eq!(tri.masked_count(), 0);

    let wrapped = test_utils::wrap_longitudes(&grid, 175.0);
    let tri = Triangulation::from_radians(&wrapped.lon_vertices, &wrapped.lat_vertices).unwrap();
    assert!(tri.masked_count() > 0);
    assert!(tri.masked_count() < tri.num_triangles());
}

#[test]
fn test_visible_in_culls_outside_triangles() {
    let grid = create_regional_icon_grid(10, 10, [0.0, 20.0, 40.0, 60.0]);
    let tri = Triangulation::from_radians(&grid.lon_vertices, &grid.lat_vertices).unwrap();

    let region = icon_common::BoundingBox::from_extent([7.0, 13.0, 53.0, 58.0]);
    let inside: Vec<usize> = tri.visible_in(&region).collect();

    assert!(!inside.is_empty());
    assert!(inside.len() < tri.num_triangles());
    for i in inside {
        let vertices = tri.triangle_vertices(i).unwrap();
        assert!(vertices.iter().any(|&(x, _)| x >= 5.9 && x <= 14.1));
    }
}

// ============================================================================
// Cell field
// ============================================================================

#[test]
fn test_celsius_is_kelvin_minus_offset() {
    let kelvin = create_temperature_cells(500);
    let field = CellField::from_kelvin(&kelvin);

    assert_eq!(field.len(), kelvin.len());
    for (c, k) in field.values().iter().zip(&kelvin) {
        assert_eq!(*c, *k - 273.15);
    }
}

#[test]
fn test_field_must_match_mesh() {
    let grid = create_regional_icon_grid(2, 2, [0.0, 2.0, 0.0, 2.0]);
    let tri = Triangulation::from_radians(&grid.lon_vertices, &grid.lat_vertices).unwrap();

    let ok = CellField::from_kelvin(&create_temperature_cells(tri.num_triangles()));
    ok.check_matches(&tri).unwrap();

    let short = CellField::from_kelvin(&create_temperature_cells(tri.num_triangles() - 1));
    assert!(matches!(
        short.check_matches(&tri),
        Err(MeshError::FieldLength { .. })
    ));
}
