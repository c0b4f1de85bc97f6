//! Vertical colorbar: gradient, outline, ticks and label.

use projection::PixelRect;
use tiny_skia::{PathBuilder, Pixmap, Rect, Transform};

use crate::colormap::{Color, Colormap, Normalize};
use crate::draw::{paint, rect_path, stroke};
use crate::figure::FigureSpec;
use crate::layout::{
    ColorbarSpec, FONT_SIZE_PT, FRAME_WIDTH_PT, LABEL_PAD_PT, TICK_LENGTH_PT, TICK_PAD_PT,
};
use crate::text::{HAlign, TextItem, TextRenderer, VAlign};

/// Most ticks a colorbar gets.
pub const MAX_TICKS: usize = 6;

const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Tick step for `[vmin, vmax]`: the smallest of 1, 2, 2.5, 5 × 10^k that
/// keeps the tick count at or below `max_ticks`.
pub fn tick_step(vmin: f32, vmax: f32, max_ticks: usize) -> Option<f64> {
    let range = (vmax - vmin) as f64;
    if !(range.is_finite() && range > 0.0) || max_ticks < 2 {
        return None;
    }
    let raw = range / (max_ticks - 1) as f64;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    NICE_STEPS
        .iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw * (1.0 - 1e-9))
}

/// Tick values inside `[vmin, vmax]` on a nice step.
pub fn nice_ticks(vmin: f32, vmax: f32, max_ticks: usize) -> Vec<f32> {
    let Some(step) = tick_step(vmin, vmax, max_ticks) else {
        return if vmin.is_finite() { vec![vmin] } else { Vec::new() };
    };
    let eps = step * 1e-9;
    let first = (vmin as f64 / step - 1e-9).ceil() as i64;
    (first..)
        .map(|k| k as f64 * step)
        .take_while(|v| *v <= vmax as f64 + eps)
        .map(|v| v as f32)
        .collect()
}

/// Format a tick with as many decimals as the step needs.
pub fn format_tick(value: f32, step: f64) -> String {
    let decimals = (0..=6)
        .find(|d| {
            let scaled = step * 10f64.powi(*d);
            (scaled - scaled.round()).abs() < 1e-6
        })
        .unwrap_or(6) as usize;
    // Avoid "-0"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.*}", decimals, value)
}

/// A colorbar for one normalization, with its ticks precomputed so layout
/// can reserve space for the labels.
#[derive(Debug, Clone)]
pub struct Colorbar {
    pub spec: ColorbarSpec,
    pub norm: Normalize,
    pub ticks: Vec<f32>,
    pub labels: Vec<String>,
}

impl Colorbar {
    pub fn new(spec: ColorbarSpec, norm: Normalize) -> Self {
        let ticks = nice_ticks(norm.vmin, norm.vmax, MAX_TICKS);
        let step = tick_step(norm.vmin, norm.vmax, MAX_TICKS).unwrap_or(1.0);
        let labels = ticks.iter().map(|t| format_tick(*t, step)).collect();
        Self {
            spec,
            norm,
            ticks,
            labels,
        }
    }

    /// Rasterize into `rect`; tick labels and the axis label are queued on
    /// `texts`.
    pub fn draw(
        &self,
        pixmap: &mut Pixmap,
        rect: PixelRect,
        cmap: &Colormap,
        figure: &FigureSpec,
        text: &TextRenderer,
        texts: &mut Vec<TextItem>,
    ) {
        let x0 = rect.x.round() as f32;
        let x1 = rect.right().round() as f32;
        let y0 = rect.y.round() as i64;
        let y1 = rect.bottom().round() as i64;
        let rows = (y1 - y0).max(1) as f32;

        // One band per pixel row, vmax at the top
        for row in y0..y1 {
            let t = ((y1 - row) as f32 - 0.5) / rows;
            if let Some(band) = Rect::from_xywh(x0, row as f32, x1 - x0, 1.0) {
                pixmap.fill_rect(band, &paint(cmap.map(t), false), Transform::identity(), None);
            }
        }

        let line_width = figure.pt_to_px(FRAME_WIDTH_PT);
        let line_paint = paint(Color::BLACK, true);
        let line_stroke = stroke(line_width, None);

        let tick_length = figure.pt_to_px(TICK_LENGTH_PT);
        let font_px = figure.pt_to_px(FONT_SIZE_PT);
        let label_x = x1 + tick_length + figure.pt_to_px(TICK_PAD_PT);

        let mut pb = PathBuilder::new();
        for (tick, label) in self.ticks.iter().zip(&self.labels) {
            let y = y1 as f32 - self.norm.apply(*tick) * rows;
            pb.move_to(x1, y);
            pb.line_to(x1 + tick_length, y);
            texts.push(
                TextItem::new(label, label_x, y, font_px).aligned(HAlign::Left, VAlign::Center),
            );
        }
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &line_paint, &line_stroke, Transform::identity(), None);
        }

        let outline = PixelRect::new(x0 as f64, y0 as f64, (x1 - x0) as f64, rows as f64);
        if let Some(path) = rect_path(outline) {
            pixmap.stroke_path(&path, &line_paint, &line_stroke, Transform::identity(), None);
        }

        if !self.spec.label.is_empty() {
            let widest = self
                .labels
                .iter()
                .map(|l| text.measure(l, font_px).0)
                .fold(0.0f32, f32::max);
            texts.push(
                TextItem::new(
                    &self.spec.label,
                    label_x + widest + figure.pt_to_px(LABEL_PAD_PT),
                    (y0 as f32 + y1 as f32) / 2.0,
                    font_px,
                )
                .aligned(HAlign::Left, VAlign::Center)
                .vertical(),
            );
        }
    }
}
