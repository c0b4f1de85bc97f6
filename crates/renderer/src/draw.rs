//! Small tiny-skia helpers shared by the figure layers.

use projection::PixelRect;
use tiny_skia::{
    FillRule, LineCap, LineJoin, Mask, Paint, Path, PathBuilder, Rect, Stroke, StrokeDash,
    Transform,
};

use crate::colormap::Color;

pub(crate) fn paint(color: Color, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = anti_alias;
    paint
}

/// Stroke of `width` px, dashed when `intervals` (multiples of the width)
/// are given.
pub(crate) fn stroke(width: f32, intervals: Option<[f32; 2]>) -> Stroke {
    let mut stroke = Stroke::default();
    stroke.width = width;
    stroke.line_join = LineJoin::Round;
    match intervals {
        Some([on, off]) => {
            stroke.line_cap = LineCap::Butt;
            stroke.dash = StrokeDash::new(vec![on * width, off * width], 0.0);
        }
        None => stroke.line_cap = LineCap::Square,
    }
    stroke
}

/// Append one polyline (or closed ring) to `pb`.
pub(crate) fn push_polyline<I>(pb: &mut PathBuilder, points: I, close: bool)
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut points = points.into_iter();
    let Some((x0, y0)) = points.next() else {
        return;
    };
    pb.move_to(x0 as f32, y0 as f32);
    for (x, y) in points {
        pb.line_to(x as f32, y as f32);
    }
    if close {
        pb.close();
    }
}

pub(crate) fn rect_path(rect: PixelRect) -> Option<Path> {
    let rect = Rect::from_xywh(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    )?;
    Some(PathBuilder::from_rect(rect))
}

/// Clip mask covering `rect` on a `width` x `height` canvas.
pub(crate) fn rect_mask(width: u32, height: u32, rect: PixelRect) -> Option<Mask> {
    let mut mask = Mask::new(width, height)?;
    let path = rect_path(rect)?;
    mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
    Some(mask)
}
