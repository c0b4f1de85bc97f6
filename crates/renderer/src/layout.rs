//! Tight layout of title, map axes and colorbar inside a figure.
//!
//! Sizes follow the usual plotting defaults in points: 10 pt text, 12 pt
//! titles with a 6 pt gap, and an outer padding of 1.08 font heights.

use icon_common::BoundingBox;
use projection::{PixelRect, PlateCarree};
use serde::{Deserialize, Serialize};

use crate::error::RenderResult;
use crate::figure::FigureSpec;
use crate::text::{HAlign, TextItem, TextRenderer, VAlign};

pub const FONT_SIZE_PT: f32 = 10.0;
pub const TITLE_SIZE_PT: f32 = 12.0;
pub const TITLE_PAD_PT: f32 = 6.0;
/// Outer padding as a multiple of the font size.
pub const LAYOUT_PAD: f32 = 1.08;
pub const TICK_LENGTH_PT: f32 = 3.5;
pub const TICK_PAD_PT: f32 = 3.5;
pub const LABEL_PAD_PT: f32 = 4.0;
pub const FRAME_WIDTH_PT: f32 = 0.8;

fn default_shrink() -> f32 {
    0.8
}

fn default_aspect() -> f32 {
    20.0
}

fn default_pad() -> f32 {
    0.05
}

/// Vertical colorbar attached to the right of the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorbarSpec {
    pub label: String,
    /// Bar height as a fraction of the map height.
    #[serde(default = "default_shrink")]
    pub shrink: f32,
    /// Ratio of bar height to bar width.
    #[serde(default = "default_aspect")]
    pub aspect: f32,
    /// Gap to the map as a fraction of the usable figure width.
    #[serde(default = "default_pad")]
    pub pad: f32,
}

impl ColorbarSpec {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            shrink: default_shrink(),
            aspect: default_aspect(),
            pad: default_pad(),
        }
    }
}

/// Where everything goes on the page.
#[derive(Debug, Clone)]
pub struct Layout {
    pub projection: PlateCarree,
    pub title: Option<TextItem>,
    pub colorbar: Option<PixelRect>,
}

/// Place the map (and optional colorbar) below the title, as large as the
/// page allows while keeping equal aspect, centred horizontally.
pub fn tight_layout(
    spec: &FigureSpec,
    extent: BoundingBox,
    title: Option<&str>,
    colorbar: Option<(&ColorbarSpec, &[String])>,
    text: &TextRenderer,
) -> RenderResult<Layout> {
    let width = spec.width_px() as f64;
    let height = spec.height_px() as f64;
    let font_px = spec.pt_to_px(FONT_SIZE_PT);
    let title_px = spec.pt_to_px(TITLE_SIZE_PT);
    let pad = (LAYOUT_PAD * font_px) as f64;

    let title_block = title
        .map(|t| (text.measure(t, title_px).1 + spec.pt_to_px(TITLE_PAD_PT)) as f64)
        .unwrap_or(0.0);
    let top = pad + title_block;
    let avail_height = height - pad - top;
    let usable_width = width - 2.0 * pad;

    // Space right of the bar: ticks, tick labels and the rotated label
    let decoration = colorbar.map(|(cb, labels)| {
        let widest = labels
            .iter()
            .map(|l| text.measure(l, font_px).0)
            .fold(0.0f32, f32::max);
        let label_height = if cb.label.is_empty() {
            0.0
        } else {
            spec.pt_to_px(LABEL_PAD_PT) + text.measure(&cb.label, font_px).1
        };
        (spec.pt_to_px(TICK_LENGTH_PT) + spec.pt_to_px(TICK_PAD_PT) + widest + label_height) as f64
    });

    let reserve = |map_height: f64| -> f64 {
        match (colorbar, decoration) {
            (Some((cb, _)), Some(decoration)) => {
                cb.pad as f64 * usable_width
                    + cb.shrink as f64 * map_height / cb.aspect as f64
                    + decoration
            }
            _ => 0.0,
        }
    };
    let fit = |map_height: f64| {
        PlateCarree::fit(
            extent,
            PixelRect::new(pad, top, usable_width - reserve(map_height), avail_height),
        )
    };

    // The bar width depends on the map height, so fit twice
    let first = fit(avail_height)?;
    let fitted = fit(first.frame().height)?;
    let frame = fitted.frame();

    let group_width = frame.width + reserve(frame.height);
    let projection = fitted.with_origin((width - group_width) / 2.0, frame.y);
    let frame = projection.frame();

    let title = title.map(|t| {
        TextItem::new(
            t,
            frame.center().0 as f32,
            frame.y as f32 - spec.pt_to_px(TITLE_PAD_PT),
            title_px,
        )
        .aligned(HAlign::Center, VAlign::Bottom)
    });

    let colorbar = colorbar.map(|(cb, _)| {
        let bar_height = cb.shrink as f64 * frame.height;
        PixelRect::new(
            frame.right() + cb.pad as f64 * usable_width,
            frame.center().1 - bar_height / 2.0,
            bar_height / cb.aspect as f64,
            bar_height,
        )
    });

    Ok(Layout {
        projection,
        title,
        colorbar,
    })
}
