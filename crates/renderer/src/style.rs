//! Style configuration for map layers.
//!
//! Widths are given in points (1/72 inch) and converted to pixels with the
//! figure dpi at draw time.

use serde::{Deserialize, Serialize};

use crate::colormap::Color;
use crate::error::{RenderError, RenderResult};

/// Color of water bodies (lakes, rivers).
pub const WATER_COLOR: &str = "#97b6e1";

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

/// Resolve a hex color and an alpha factor.
pub fn parse_color(hex: &str, alpha: f32) -> RenderResult<Color> {
    let (r, g, b) =
        hex_to_rgb(hex).ok_or_else(|| RenderError::Style(format!("invalid color '{}'", hex)))?;
    Ok(Color::rgb(r, g, b).with_alpha(alpha))
}

fn default_alpha() -> f32 {
    1.0
}

/// Line dash pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinePattern {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LinePattern {
    /// On/off lengths in multiples of the line width.
    pub fn intervals(&self) -> Option<[f32; 2]> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some([3.7, 1.6]),
            Self::Dotted => Some([1.0, 1.65]),
        }
    }
}

/// Stroke style for lines and polygon outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub width_pt: f32,
    pub color: String,
    #[serde(default = "default_alpha")]
    pub alpha: f32,
    #[serde(default)]
    pub pattern: LinePattern,
}

impl LineStyle {
    pub fn solid(width_pt: f32, color: &str) -> Self {
        Self {
            width_pt,
            color: color.to_string(),
            alpha: 1.0,
            pattern: LinePattern::Solid,
        }
    }

    pub fn with_pattern(mut self, pattern: LinePattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn rgba(&self) -> RenderResult<Color> {
        parse_color(&self.color, self.alpha)
    }
}

/// Fill style for polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillStyle {
    pub color: String,
    #[serde(default = "default_alpha")]
    pub alpha: f32,
}

impl FillStyle {
    pub fn rgba(&self) -> RenderResult<Color> {
        parse_color(&self.color, self.alpha)
    }
}

/// A reference feature layer: source file plus how to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStyle {
    pub name: String,
    /// GeoJSON file name, relative to the features directory.
    pub file: String,
    #[serde(default)]
    pub edge: Option<LineStyle>,
    #[serde(default)]
    pub fill: Option<FillStyle>,
}

impl FeatureStyle {
    pub fn coastline() -> Self {
        Self {
            name: "coastline".to_string(),
            file: "coastline.geojson".to_string(),
            edge: Some(LineStyle::solid(0.8, "#000000")),
            fill: None,
        }
    }

    pub fn borders() -> Self {
        Self {
            name: "borders".to_string(),
            file: "borders.geojson".to_string(),
            edge: Some(LineStyle::solid(0.5, "#000000").with_pattern(LinePattern::Dotted)),
            fill: None,
        }
    }

    /// Lakes are filled and outlined in the water color at half opacity.
    pub fn lakes() -> Self {
        Self {
            name: "lakes".to_string(),
            file: "lakes.geojson".to_string(),
            edge: Some(LineStyle::solid(1.0, WATER_COLOR).with_alpha(0.5)),
            fill: Some(FillStyle {
                color: WATER_COLOR.to_string(),
                alpha: 0.5,
            }),
        }
    }

    pub fn rivers() -> Self {
        Self {
            name: "rivers".to_string(),
            file: "rivers.geojson".to_string(),
            edge: Some(LineStyle::solid(1.0, WATER_COLOR).with_alpha(0.5)),
            fill: None,
        }
    }

    /// Coastlines, borders, lakes and rivers, in drawing order.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::coastline(),
            Self::borders(),
            Self::lakes(),
            Self::rivers(),
        ]
    }
}
