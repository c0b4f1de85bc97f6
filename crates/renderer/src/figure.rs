//! A fixed-size figure holding one map axes in Plate Carree.
//!
//! Drawing happens in two passes: shapes are rasterized into a tiny-skia
//! pixmap as they are added, text is queued and drawn onto the final image
//! by [`Figure::render`].

use std::path::Path;

use icon_common::BoundingBox;
use image::RgbaImage;
use mesh::{CellField, Triangulation};
use projection::{PixelRect, PlateCarree};
use serde::{Deserialize, Serialize};
use tiny_skia::{FillRule, Mask, PathBuilder, Pixmap, Transform};
use tracing::{debug, info};

use crate::colorbar::Colorbar;
use crate::colormap::{Color, Colormap, Normalize};
use crate::draw::{paint, push_polyline, rect_mask, rect_path, stroke};
use crate::error::{RenderError, RenderResult};
use crate::features::{FeatureLayer, Shape};
use crate::layout::{tight_layout, ColorbarSpec, FRAME_WIDTH_PT};
use crate::png::create_png_auto;
use crate::style::{FeatureStyle, LineStyle};
use crate::text::{TextItem, TextRenderer};
use crate::triangles;

/// Points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

fn default_size_in() -> f32 {
    10.0
}

fn default_dpi() -> f32 {
    300.0
}

/// Physical figure size and resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureSpec {
    #[serde(default = "default_size_in")]
    pub width_in: f32,
    #[serde(default = "default_size_in")]
    pub height_in: f32,
    #[serde(default = "default_dpi")]
    pub dpi: f32,
}

impl Default for FigureSpec {
    fn default() -> Self {
        Self {
            width_in: default_size_in(),
            height_in: default_size_in(),
            dpi: default_dpi(),
        }
    }
}

impl FigureSpec {
    pub fn width_px(&self) -> u32 {
        (self.width_in * self.dpi).round().max(0.0) as u32
    }

    pub fn height_px(&self) -> u32 {
        (self.height_in * self.dpi).round().max(0.0) as u32
    }

    /// Convert a length in points to pixels.
    pub fn pt_to_px(&self, pt: f32) -> f32 {
        pt * self.dpi / POINTS_PER_INCH
    }
}

struct MapAxes {
    projection: PlateCarree,
    clip: Mask,
    colorbar: Option<(Colorbar, PixelRect)>,
}

fn require_axes(axes: &Option<MapAxes>) -> RenderResult<&MapAxes> {
    axes.as_ref()
        .ok_or_else(|| RenderError::Layout("figure has no map axes".to_string()))
}

/// One figure with a single map axes.
pub struct Figure<'a> {
    spec: FigureSpec,
    pixmap: Pixmap,
    texts: Vec<TextItem>,
    fonts: &'a TextRenderer,
    axes: Option<MapAxes>,
}

impl<'a> Figure<'a> {
    /// Blank white figure.
    pub fn new(spec: FigureSpec, fonts: &'a TextRenderer) -> RenderResult<Self> {
        let (width, height) = (spec.width_px(), spec.height_px());
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Canvas { width, height })?;
        pixmap.fill(tiny_skia::Color::WHITE);

        Ok(Self {
            spec,
            pixmap,
            texts: Vec::new(),
            fonts,
            axes: None,
        })
    }

    pub fn spec(&self) -> &FigureSpec {
        &self.spec
    }

    /// Lay out a map of `extent` with a title and optionally room for a
    /// colorbar on the right.
    pub fn add_map_axes(
        &mut self,
        extent: BoundingBox,
        title: &str,
        colorbar: Option<(ColorbarSpec, Normalize)>,
    ) -> RenderResult<()> {
        let colorbar = colorbar.map(|(spec, norm)| Colorbar::new(spec, norm));
        let title = (!title.is_empty()).then_some(title);

        let layout = tight_layout(
            &self.spec,
            extent,
            title,
            colorbar.as_ref().map(|cb| (&cb.spec, cb.labels.as_slice())),
            self.fonts,
        )?;

        let frame = layout.projection.frame();
        let clip = rect_mask(self.pixmap.width(), self.pixmap.height(), frame).ok_or_else(|| {
            RenderError::Layout(format!("map frame {:?} does not fit the canvas", frame))
        })?;

        if let Some(item) = layout.title {
            self.texts.push(item);
        }

        debug!(
            x = frame.x,
            y = frame.y,
            width = frame.width,
            height = frame.height,
            "Placed map axes"
        );

        self.axes = Some(MapAxes {
            projection: layout.projection,
            clip,
            colorbar: colorbar.zip(layout.colorbar),
        });
        Ok(())
    }

    /// The map projection, once axes exist.
    pub fn projection(&self) -> Option<&PlateCarree> {
        self.axes.as_ref().map(|a| &a.projection)
    }

    /// Draw the unmasked triangle edges.
    pub fn triplot(&mut self, mesh: &Triangulation, style: &LineStyle) -> RenderResult<usize> {
        let color = style.rgba()?;
        let width = self.spec.pt_to_px(style.width_pt);
        let Self { pixmap, axes, .. } = self;
        let axes = require_axes(axes)?;

        Ok(triangles::triplot(
            pixmap,
            &axes.clip,
            &axes.projection,
            mesh,
            color,
            width,
        ))
    }

    /// Fill unmasked triangles by their cell value.
    pub fn tripcolor(
        &mut self,
        mesh: &Triangulation,
        field: &CellField,
        cmap: &Colormap,
        norm: &Normalize,
    ) -> RenderResult<usize> {
        let Self { pixmap, axes, .. } = self;
        let axes = require_axes(axes)?;

        triangles::tripcolor(pixmap, &axes.clip, &axes.projection, mesh, field, cmap, norm)
    }

    /// Overlay a reference layer: polygon fills first, then outlines.
    pub fn add_feature(&mut self, layer: &FeatureLayer, style: &FeatureStyle) -> RenderResult<()> {
        let fill = style.fill.as_ref().map(|f| f.rgba()).transpose()?;
        let edge = style
            .edge
            .as_ref()
            .map(|e| Ok::<_, RenderError>((e.rgba()?, self.spec.pt_to_px(e.width_pt), e.pattern)))
            .transpose()?;

        let Self { pixmap, axes, .. } = self;
        let axes = require_axes(axes)?;
        let proj = &axes.projection;
        let extent = *proj.extent();

        let mut fill_pb = PathBuilder::new();
        let mut edge_pb = PathBuilder::new();
        let mut shapes = 0;

        for shape in layer.shapes_in(&extent) {
            let to_px = |ring: &Vec<(f64, f64)>| {
                ring.iter()
                    .map(|&(lon, lat)| proj.geo_to_pixel(lon, lat))
                    .collect::<Vec<_>>()
            };
            match shape {
                Shape::Line(line) => push_polyline(&mut edge_pb, to_px(line), false),
                Shape::Polygon(rings) => {
                    for ring in rings {
                        let px = to_px(ring);
                        push_polyline(&mut fill_pb, px.iter().copied(), true);
                        push_polyline(&mut edge_pb, px, true);
                    }
                }
            }
            shapes += 1;
        }

        if let (Some(color), Some(path)) = (fill, fill_pb.finish()) {
            pixmap.fill_path(
                &path,
                &paint(color, true),
                FillRule::EvenOdd,
                Transform::identity(),
                Some(&axes.clip),
            );
        }
        if let (Some((color, width, pattern)), Some(path)) = (edge, edge_pb.finish()) {
            pixmap.stroke_path(
                &path,
                &paint(color, true),
                &stroke(width, pattern.intervals()),
                Transform::identity(),
                Some(&axes.clip),
            );
        }

        debug!(layer = %layer.name, shapes, "Drew feature layer");
        Ok(())
    }

    /// Draw the colorbar reserved by [`Figure::add_map_axes`].
    pub fn colorbar(&mut self, cmap: &Colormap) -> RenderResult<()> {
        let Self {
            spec,
            pixmap,
            texts,
            fonts,
            axes,
        } = self;
        let axes = require_axes(axes)?;
        let (colorbar, rect) = axes
            .colorbar
            .as_ref()
            .ok_or_else(|| RenderError::Layout("no colorbar space reserved".to_string()))?;

        colorbar.draw(pixmap, *rect, cmap, &*spec, *fonts, texts);
        Ok(())
    }

    /// Rasterize the queued text and return the final image.
    pub fn render(mut self) -> RenderResult<RgbaImage> {
        if let Some(axes) = &self.axes {
            if let Some(path) = rect_path(axes.projection.frame()) {
                self.pixmap.stroke_path(
                    &path,
                    &paint(Color::BLACK, true),
                    &stroke(self.spec.pt_to_px(FRAME_WIDTH_PT), None),
                    Transform::identity(),
                    None,
                );
            }
        }

        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        // Opaque white background, so premultiplied equals straight RGBA
        let mut img = RgbaImage::from_raw(width, height, self.pixmap.take())
            .ok_or(RenderError::Canvas { width, height })?;

        for item in &self.texts {
            self.fonts.draw(&mut img, item);
        }
        Ok(img)
    }

    /// Render and write a PNG carrying the figure dpi; returns bytes written.
    pub fn save_png(self, path: &Path) -> RenderResult<usize> {
        let dpi = self.spec.dpi;
        let img = self.render()?;
        let (width, height) = img.dimensions();

        let png = create_png_auto(img.as_raw(), width as usize, height as usize, Some(dpi))
            .map_err(RenderError::Encode)?;
        std::fs::write(path, &png)?;

        info!(
            path = %path.display(),
            width,
            height,
            bytes = png.len(),
            "Saved figure"
        );
        Ok(png.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::NORTH_GERMANY_EXTENT;

    fn small_spec() -> FigureSpec {
        FigureSpec {
            width_in: 3.0,
            height_in: 3.0,
            dpi: 50.0,
        }
    }

    #[test]
    fn test_default_spec_is_3000px() {
        let spec = FigureSpec::default();
        assert_eq!((spec.width_px(), spec.height_px()), (3000, 3000));
        assert!((spec.pt_to_px(72.0) - 300.0).abs() < 1e-4);
    }

    #[test]
    fn test_spec_yaml_defaults() {
        let spec: FigureSpec = serde_yaml::from_str("dpi: 100").unwrap();
        assert_eq!(spec.width_in, 10.0);
        assert_eq!(spec.dpi, 100.0);
    }

    #[test]
    fn test_drawing_requires_axes() {
        let fonts = TextRenderer::none();
        let mut fig = Figure::new(small_spec(), &fonts).unwrap();
        let mesh = Triangulation::from_degrees(vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]).unwrap();

        assert!(matches!(
            fig.triplot(&mesh, &LineStyle::solid(0.2, "#000000")),
            Err(RenderError::Layout(_))
        ));
        assert!(matches!(fig.colorbar(&Colormap::coolwarm()), Err(RenderError::Layout(_))));
    }

    #[test]
    fn test_colorbar_needs_reservation() {
        let fonts = TextRenderer::none();
        let mut fig = Figure::new(small_spec(), &fonts).unwrap();
        fig.add_map_axes(BoundingBox::from_extent(NORTH_GERMANY_EXTENT), "t", None)
            .unwrap();
        assert!(matches!(fig.colorbar(&Colormap::coolwarm()), Err(RenderError::Layout(_))));
    }

    #[test]
    fn test_render_size_and_background() {
        let fonts = TextRenderer::none();
        let mut fig = Figure::new(small_spec(), &fonts).unwrap();
        fig.add_map_axes(BoundingBox::from_extent(NORTH_GERMANY_EXTENT), "t", None)
            .unwrap();
        let img = fig.render().unwrap();

        assert_eq!(img.dimensions(), (150, 150));
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_zero_size_canvas() {
        let fonts = TextRenderer::none();
        let spec = FigureSpec {
            width_in: 0.0,
            height_in: 1.0,
            dpi: 100.0,
        };
        assert!(matches!(
            Figure::new(spec, &fonts),
            Err(RenderError::Canvas { width: 0, .. })
        ));
    }
}
