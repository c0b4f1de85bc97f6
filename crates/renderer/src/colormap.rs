//! Colormaps and value normalization.

use serde::{Deserialize, Serialize};

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    /// Same color with alpha scaled by `alpha` (0..=1).
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = (self.a as f32 * alpha.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }

    /// Pack into a u32 for hashing and ordering.
    pub fn packed(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }
}

/// Linear color interpolation
fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;

    Color::new(
        ((color1.r as f32 * t_inv) + (color2.r as f32 * t)).round() as u8,
        ((color1.g as f32 * t_inv) + (color2.g as f32 * t)).round() as u8,
        ((color1.b as f32 * t_inv) + (color2.b as f32 * t)).round() as u8,
        ((color1.a as f32 * t_inv) + (color2.a as f32 * t)).round() as u8,
    )
}

/// Number of entries in a colormap lookup table.
pub const LUT_SIZE: usize = 256;

/// A piecewise-linear colormap sampled into a fixed lookup table.
///
/// A normalized value `t` in [0, 1] selects entry `floor(t * 256)` (clamped
/// to 255), so both ends of the range are reachable and values outside it
/// take the end colors.
#[derive(Debug, Clone)]
pub struct Colormap {
    name: String,
    lut: Vec<Color>,
}

impl Colormap {
    /// Build a colormap from `(position, color)` stops with positions in [0, 1].
    pub fn from_stops(name: &str, stops: &[(f32, Color)]) -> Self {
        let lut = (0..LUT_SIZE)
            .map(|i| sample_stops(stops, i as f32 / (LUT_SIZE - 1) as f32))
            .collect();
        Self {
            name: name.to_string(),
            lut,
        }
    }

    /// Diverging blue to red map (Moreland's cool-warm).
    pub fn coolwarm() -> Self {
        Self::from_stops(
            "coolwarm",
            &[
                (0.0, Color::rgb(59, 76, 192)),
                (0.125, Color::rgb(98, 130, 234)),
                (0.25, Color::rgb(141, 176, 254)),
                (0.375, Color::rgb(184, 208, 249)),
                (0.5, Color::rgb(221, 221, 221)),
                (0.625, Color::rgb(245, 196, 173)),
                (0.75, Color::rgb(244, 154, 123)),
                (0.875, Color::rgb(222, 96, 77)),
                (1.0, Color::rgb(180, 4, 38)),
            ],
        )
    }

    pub fn greys() -> Self {
        Self::from_stops(
            "Greys",
            &[(0.0, Color::rgb(255, 255, 255)), (1.0, Color::rgb(0, 0, 0))],
        )
    }

    /// Look up a built-in colormap by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "coolwarm" => Some(Self::coolwarm()),
            "Greys" | "greys" => Some(Self::greys()),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color for a normalized value; NaN maps to transparent.
    pub fn map(&self, t: f32) -> Color {
        if t.is_nan() {
            return Color::transparent();
        }
        let idx = ((t * LUT_SIZE as f32).floor().max(0.0) as usize).min(LUT_SIZE - 1);
        self.lut[idx]
    }
}

fn sample_stops(stops: &[(f32, Color)], x: f32) -> Color {
    match stops {
        [] => Color::transparent(),
        [only] => only.1,
        _ => {
            let upper = stops
                .iter()
                .position(|(pos, _)| *pos >= x)
                .unwrap_or(stops.len() - 1)
                .max(1);
            let (p0, c0) = stops[upper - 1];
            let (p1, c1) = stops[upper];
            let span = p1 - p0;
            let t = if span > 0.0 { (x - p0) / span } else { 0.0 };
            interpolate_color(c0, c1, t)
        }
    }
}

/// Linear mapping from a data range onto [0, 1], clamped at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normalize {
    pub vmin: f32,
    pub vmax: f32,
}

impl Normalize {
    pub fn new(vmin: f32, vmax: f32) -> Self {
        Self { vmin, vmax }
    }

    /// Normalized position of `value`; NaN stays NaN.
    pub fn apply(&self, value: f32) -> f32 {
        if value.is_nan() {
            return f32::NAN;
        }
        let range = self.vmax - self.vmin;
        if range.abs() < f32::EPSILON {
            return 0.0;
        }
        ((value - self.vmin) / range).clamp(0.0, 1.0)
    }
}
