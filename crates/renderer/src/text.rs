//! Text rendering with rusttype glyphs onto an RGBA image.
//!
//! Text is optional: when no font can be loaded every draw call is a no-op
//! and layout falls back to an estimated glyph size, so figures are still
//! produced without labels.

use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rusttype::{Font, Scale};
use tracing::{debug, warn};

use crate::colormap::Color;

/// Horizontal anchor of a text item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical anchor of a text item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// A positioned label, queued until the raster pass is finished.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size_px: f32,
    pub halign: HAlign,
    pub valign: VAlign,
    /// Rotated 90° counter-clockwise (reads bottom to top).
    pub vertical: bool,
    pub color: Color,
}

impl TextItem {
    pub fn new(text: &str, x: f32, y: f32, size_px: f32) -> Self {
        Self {
            text: text.to_string(),
            x,
            y,
            size_px,
            halign: HAlign::Left,
            valign: VAlign::Top,
            vertical: false,
            color: Color::BLACK,
        }
    }

    pub fn aligned(mut self, halign: HAlign, valign: VAlign) -> Self {
        self.halign = halign;
        self.valign = valign;
        self
    }

    pub fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }
}

/// Glyph source for figure labels.
pub struct TextRenderer {
    font: Option<Font<'static>>,
}

impl TextRenderer {
    /// Load a TrueType font; on failure text is skipped with a warning.
    pub fn from_file(path: &Path) -> Self {
        match std::fs::read(path) {
            Ok(bytes) => match Self::from_bytes(bytes) {
                Some(renderer) => {
                    debug!(path = %path.display(), "Loaded font");
                    renderer
                }
                None => {
                    warn!(path = %path.display(), "Font file could not be parsed, text will be skipped");
                    Self::none()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read font, text will be skipped");
                Self::none()
            }
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(bytes).map(|font| Self { font: Some(font) })
    }

    /// A renderer without glyphs.
    pub fn none() -> Self {
        Self { font: None }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Width and height of `text` at `size_px`, unrotated.
    pub fn measure(&self, text: &str, size_px: f32) -> (f32, f32) {
        match &self.font {
            Some(font) => {
                let (w, h) = text_size(Scale::uniform(size_px), font, text);
                (w.max(0) as f32, h.max(0) as f32)
            }
            // Same estimate the label backgrounds use without glyph metrics
            None => (text.chars().count() as f32 * size_px * 0.6, size_px),
        }
    }

    /// Extent of an item on the page, after rotation.
    pub fn extent(&self, item: &TextItem) -> (f32, f32) {
        let (w, h) = self.measure(&item.text, item.size_px);
        if item.vertical {
            (h, w)
        } else {
            (w, h)
        }
    }

    /// Draw a queued item.
    pub fn draw(&self, img: &mut RgbaImage, item: &TextItem) {
        let Some(font) = &self.font else {
            return;
        };
        if item.text.is_empty() {
            return;
        }

        let (w, h) = self.extent(item);
        let left = match item.halign {
            HAlign::Left => item.x,
            HAlign::Center => item.x - w / 2.0,
            HAlign::Right => item.x - w,
        };
        let top = match item.valign {
            VAlign::Top => item.y,
            VAlign::Center => item.y - h / 2.0,
            VAlign::Bottom => item.y - h,
        };

        let scale = Scale::uniform(item.size_px);
        let color = item.color.to_rgba();

        if !item.vertical {
            draw_text_mut(
                img,
                color,
                left.round() as i32,
                top.round() as i32,
                scale,
                font,
                &item.text,
            );
            return;
        }

        // Render horizontally on a scratch image, then turn it
        let (tw, th) = self.measure(&item.text, item.size_px);
        let mut scratch = RgbaImage::from_pixel(
            tw.ceil().max(1.0) as u32,
            th.ceil().max(1.0) as u32,
            Rgba([color[0], color[1], color[2], 0]),
        );
        draw_text_mut(&mut scratch, color, 0, 0, scale, font, &item.text);
        let rotated = image::imageops::rotate270(&scratch);
        image::imageops::overlay(img, &rotated, left.round() as i64, top.round() as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_falls_back() {
        let renderer = TextRenderer::from_file(Path::new("/nonexistent/font.ttf"));
        assert!(!renderer.has_font());
    }

    #[test]
    fn test_estimated_measure() {
        let renderer = TextRenderer::none();
        assert_eq!(renderer.measure("abcd", 10.0), (24.0, 10.0));
    }

    #[test]
    fn test_vertical_extent_swaps_axes() {
        let renderer = TextRenderer::none();
        let item = TextItem::new("abcd", 0.0, 0.0, 10.0).vertical();
        assert_eq!(renderer.extent(&item), (10.0, 24.0));
    }

    #[test]
    fn test_draw_without_font_is_noop() {
        let renderer = TextRenderer::none();
        let mut img = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
        renderer.draw(&mut img, &TextItem::new("x", 2.0, 2.0, 10.0));
        assert!(img.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        assert!(TextRenderer::from_bytes(b"not a font".to_vec()).is_none());
    }
}
