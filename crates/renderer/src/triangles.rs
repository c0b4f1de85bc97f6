//! Wireframe and per-cell filled drawing of a triangulation.

use std::collections::BTreeMap;

use mesh::{CellField, Triangulation};
use projection::PlateCarree;
use tiny_skia::{FillRule, Mask, PathBuilder, Pixmap, Transform};
use tracing::debug;

use crate::colormap::{Color, Colormap, Normalize};
use crate::draw::{paint, push_polyline, stroke};
use crate::error::RenderResult;

fn triangle_ring(proj: &PlateCarree, vertices: [(f64, f64); 3]) -> [(f64, f64); 3] {
    vertices.map(|(lon, lat)| proj.geo_to_pixel(lon, lat))
}

/// Stroke every visible triangle edge as one path.
///
/// Returns the number of triangles drawn.
pub fn triplot(
    pixmap: &mut Pixmap,
    clip: &Mask,
    proj: &PlateCarree,
    mesh: &Triangulation,
    color: Color,
    width_px: f32,
) -> usize {
    let mut pb = PathBuilder::new();
    let mut drawn = 0;

    for i in mesh.visible_in(proj.extent()) {
        if let Some(vertices) = mesh.triangle_vertices(i) {
            push_polyline(&mut pb, triangle_ring(proj, vertices), true);
            drawn += 1;
        }
    }

    if let Some(path) = pb.finish() {
        pixmap.stroke_path(
            &path,
            &paint(color, true),
            &stroke(width_px, None),
            Transform::identity(),
            Some(clip),
        );
    }

    debug!(triangles = drawn, "Drew triangulation wireframe");
    drawn
}

/// Fill every visible triangle with the colour of its cell value.
///
/// Triangles are grouped by colour so each colour is one path; fills are
/// not anti-aliased, which keeps shared edges seamless. NaN cells stay
/// transparent. Returns the number of triangles drawn.
pub fn tripcolor(
    pixmap: &mut Pixmap,
    clip: &Mask,
    proj: &PlateCarree,
    mesh: &Triangulation,
    field: &CellField,
    cmap: &Colormap,
    norm: &Normalize,
) -> RenderResult<usize> {
    field.check_matches(mesh)?;

    let mut by_color: BTreeMap<u32, (Color, PathBuilder)> = BTreeMap::new();
    let mut drawn = 0;

    for i in mesh.visible_in(proj.extent()) {
        let value = field.values()[i];
        if value.is_nan() {
            continue;
        }
        let Some(vertices) = mesh.triangle_vertices(i) else {
            continue;
        };

        let color = cmap.map(norm.apply(value));
        let (_, pb) = by_color
            .entry(color.packed())
            .or_insert_with(|| (color, PathBuilder::new()));
        push_polyline(pb, triangle_ring(proj, vertices), true);
        drawn += 1;
    }

    let colors = by_color.len();
    for (color, pb) in by_color.into_values() {
        if let Some(path) = pb.finish() {
            pixmap.fill_path(
                &path,
                &paint(color, false),
                FillRule::Winding,
                Transform::identity(),
                Some(clip),
            );
        }
    }

    debug!(triangles = drawn, colors, "Drew filled triangulation");
    Ok(drawn)
}
