//! End-to-end tests for map figures: layout, masking, NaN handling, feature
//! overlays and PNG output.

use icon_common::BoundingBox;
use mesh::{CellField, Triangulation};
use renderer::{
    ColorbarSpec, Colormap, FeatureLayer, FeatureStyle, Figure, FigureSpec, LineStyle, Normalize,
    TextRenderer,
};
use test_utils::{
    create_regional_icon_grid, create_temperature_cells, write_feature_fixtures,
    NORTH_GERMANY_EXTENT,
};

// ============================================================================
// Helper functions
// ============================================================================

fn window() -> BoundingBox {
    BoundingBox::from_extent(NORTH_GERMANY_EXTENT)
}

fn spec(dpi: f32) -> FigureSpec {
    FigureSpec {
        width_in: 3.0,
        height_in: 3.0,
        dpi,
    }
}

fn regional_mesh() -> Triangulation {
    let grid = create_regional_icon_grid(12, 10, [6.0, 14.0, 52.0, 59.0]);
    Triangulation::from_radians(&grid.lon_vertices, &grid.lat_vertices).unwrap()
}

/// One big triangle that covers the whole window.
fn covering_triangle() -> Triangulation {
    Triangulation::from_degrees(vec![0.0, 30.0, 0.0], vec![50.0, 50.0, 70.0]).unwrap()
}

fn pixel_at(fig: &Figure, lon: f64, lat: f64) -> (u32, u32) {
    let (x, y) = fig.projection().unwrap().geo_to_pixel(lon, lat);
    (x as u32, y as u32)
}

// ============================================================================
// Size and layout
// ============================================================================

#[test]
fn test_default_figure_is_3000_square() {
    let fonts = TextRenderer::none();
    let mut fig = Figure::new(FigureSpec::default(), &fonts).unwrap();
    fig.add_map_axes(window(), "ICON-DREAM-Global Grid", None)
        .unwrap();

    let img = fig.render().unwrap();
    assert_eq!(img.dimensions(), (3000, 3000));
}

#[test]
fn test_map_frame_keeps_window_aspect() {
    let fonts = TextRenderer::none();
    let mut fig = Figure::new(spec(100.0), &fonts).unwrap();
    fig.add_map_axes(
        window(),
        "T2M",
        Some((ColorbarSpec::new("2 m Temperature [C]"), Normalize::new(0.0, 10.0))),
    )
    .unwrap();

    let frame = fig.projection().unwrap().frame();
    assert!((frame.width / frame.height - 6.0 / 5.0).abs() < 1e-9);
}

// ============================================================================
// Triangles
// ============================================================================

#[test]
fn test_wireframe_draws_dark_pixels() {
    let fonts = TextRenderer::none();
    let mut fig = Figure::new(spec(100.0), &fonts).unwrap();
    fig.add_map_axes(window(), "grid", None).unwrap();

    let drawn = fig
        .triplot(&regional_mesh(), &LineStyle::solid(0.2, "#000000"))
        .unwrap();
    assert!(drawn > 0);

    let img = fig.render().unwrap();
    assert!(img.pixels().any(|p| p.0[0] < 128));
}

#[test]
fn test_masked_triangle_not_drawn() {
    let fonts = TextRenderer::none();
    // Longitude span of 200° covering the window
    let mut mesh =
        Triangulation::from_degrees(vec![-100.0, 100.0, 10.0], vec![50.0, 50.0, 70.0]).unwrap();
    assert!(mesh.is_masked(0));
    let field = CellField::new(vec![5.0], None);

    let mut fig = Figure::new(spec(100.0), &fonts).unwrap();
    fig.add_map_axes(window(), "", None).unwrap();
    let (x, y) = pixel_at(&fig, 10.0, 55.0);
    assert_eq!(
        fig.tripcolor(&mesh, &field, &Colormap::coolwarm(), &Normalize::new(0.0, 10.0))
            .unwrap(),
        0
    );
    assert_eq!(fig.render().unwrap().get_pixel(x, y).0, [255, 255, 255, 255]);

    // The same triangle unmasked paints the window
    mesh.set_mask(vec![false]).unwrap();
    let mut fig = Figure::new(spec(100.0), &fonts).unwrap();
    fig.add_map_axes(window(), "", None).unwrap();
    fig.tripcolor(&mesh, &field, &Colormap::coolwarm(), &Normalize::new(0.0, 10.0))
        .unwrap();
    assert_ne!(fig.render().unwrap().get_pixel(x, y).0, [255, 255, 255, 255]);
}

#[test]
fn test_nan_cell_left_blank() {
    let fonts = TextRenderer::none();
    let mut fig = Figure::new(spec(100.0), &fonts).unwrap();
    fig.add_map_axes(window(), "", None).unwrap();
    let (x, y) = pixel_at(&fig, 10.0, 55.0);

    let field = CellField::new(vec![f32::NAN], None);
    fig.tripcolor(
        &covering_triangle(),
        &field,
        &Colormap::coolwarm(),
        &Normalize::new(0.0, 10.0),
    )
    .unwrap();

    assert_eq!(fig.render().unwrap().get_pixel(x, y).0, [255, 255, 255, 255]);
}

#[test]
fn test_values_clamp_to_colormap_ends() {
    let fonts = TextRenderer::none();
    let cmap = Colormap::coolwarm();
    let norm = Normalize::new(0.0, 10.0);

    for (celsius, expected) in [(-40.0, cmap.map(0.0)), (45.0, cmap.map(1.0))] {
        let mut fig = Figure::new(spec(100.0), &fonts).unwrap();
        fig.add_map_axes(window(), "", None).unwrap();
        let (x, y) = pixel_at(&fig, 10.0, 55.0);
        fig.tripcolor(
            &covering_triangle(),
            &CellField::new(vec![celsius], None),
            &cmap,
            &norm,
        )
        .unwrap();

        let px = fig.render().unwrap().get_pixel(x, y).0;
        assert_eq!(px, [expected.r, expected.g, expected.b, 255]);
    }
}

#[test]
fn test_nothing_drawn_outside_frame() {
    let fonts = TextRenderer::none();
    let mut fig = Figure::new(spec(100.0), &fonts).unwrap();
    fig.add_map_axes(window(), "", None).unwrap();
    fig.tripcolor(
        &covering_triangle(),
        &CellField::new(vec![5.0], None),
        &Colormap::coolwarm(),
        &Normalize::new(0.0, 10.0),
    )
    .unwrap();

    let img = fig.render().unwrap();
    // Page corners stay white
    assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(298, 298).0, [255, 255, 255, 255]);
}

// ============================================================================
// Features
// ============================================================================

#[test]
fn test_lake_fill_respects_hole() {
    let dir = tempfile::tempdir().unwrap();
    write_feature_fixtures(dir.path()).unwrap();
    let style = FeatureStyle::lakes();
    let lakes = FeatureLayer::load(&style.name, &dir.path().join(&style.file)).unwrap();

    let fonts = TextRenderer::none();
    let mut fig = Figure::new(spec(300.0), &fonts).unwrap();
    fig.add_map_axes(window(), "", None).unwrap();
    let water = pixel_at(&fig, 11.39, 53.71);
    let hole = pixel_at(&fig, 11.45, 53.65);
    fig.add_feature(&lakes, &style).unwrap();

    let img = fig.render().unwrap();
    let w = img.get_pixel(water.0, water.1).0;
    assert!(w[2] > w[0], "lake pixel should be bluish: {:?}", w);
    assert!(w[0] < 255);
    assert_eq!(img.get_pixel(hole.0, hole.1).0, [255, 255, 255, 255]);
}

// ============================================================================
// PNG output
// ============================================================================

fn temperature_figure(fonts: &TextRenderer, path: &std::path::Path) -> usize {
    let dir = tempfile::tempdir().unwrap();
    write_feature_fixtures(dir.path()).unwrap();

    let mesh = regional_mesh();
    let field = CellField::from_kelvin(&create_temperature_cells(mesh.num_triangles()));
    let norm = Normalize::new(0.0, 10.0);
    let cmap = Colormap::coolwarm();

    let mut fig = Figure::new(spec(100.0), fonts).unwrap();
    fig.add_map_axes(
        window(),
        "T2M, ICON-DREAM-Global Grid",
        Some((ColorbarSpec::new("2 m Temperature [C]"), norm)),
    )
    .unwrap();
    fig.tripcolor(&mesh, &field, &cmap, &norm).unwrap();
    for style in FeatureStyle::defaults() {
        let layer = FeatureLayer::load(&style.name, &dir.path().join(&style.file)).unwrap();
        fig.add_feature(&layer, &style).unwrap();
    }
    fig.colorbar(&cmap).unwrap();
    fig.save_png(path).unwrap()
}

#[test]
fn test_save_png_without_font() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t2m.png");
    let fonts = TextRenderer::from_file("/nonexistent/DejaVuSans.ttf".as_ref());

    let bytes = temperature_figure(&fonts, &path);

    assert_eq!(std::fs::metadata(&path).unwrap().len() as usize, bytes);
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (300, 300));
}

#[test]
fn test_save_png_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let fonts = TextRenderer::none();
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");

    temperature_figure(&fonts, &a);
    temperature_figure(&fonts, &b);

    assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
}

#[test]
fn test_save_png_with_system_font() {
    let font = test_utils::require_test_file!("DejaVuSans.ttf");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t2m.png");
    let fonts = TextRenderer::from_file(&font);
    assert!(fonts.has_font());

    assert!(temperature_figure(&fonts, &path) > 0);
}
