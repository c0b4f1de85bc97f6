//! Plate Carree (equirectangular) projection.
//!
//! x = lon, y = lat, scaled into a pixel frame. The frame keeps the equal
//! aspect of the projection: when the available area has a different
//! aspect ratio than the extent, the frame shrinks along one axis and is
//! centred in the available area.

use icon_common::BoundingBox;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("Extent has zero or negative size: {0:?}")]
    DegenerateExtent(BoundingBox),

    #[error("Pixel area has zero or negative size: {0:?}")]
    EmptyArea(PixelRect),
}

/// Axis-aligned rectangle in pixel coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// Plate Carree projection of a geographic extent onto a pixel frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateCarree {
    extent: BoundingBox,
    frame: PixelRect,
    /// Pixels per degree, identical for both axes.
    scale: f64,
}

impl PlateCarree {
    /// Fit `extent` into `available` with equal aspect, centred.
    pub fn fit(extent: BoundingBox, available: PixelRect) -> Result<Self, ProjectionError> {
        if !(extent.width() > 0.0 && extent.height() > 0.0) {
            return Err(ProjectionError::DegenerateExtent(extent));
        }
        if !(available.width > 0.0 && available.height > 0.0) {
            return Err(ProjectionError::EmptyArea(available));
        }

        let scale = (available.width / extent.width()).min(available.height / extent.height());
        let width = extent.width() * scale;
        let height = extent.height() * scale;
        let (cx, cy) = available.center();

        Ok(Self {
            extent,
            frame: PixelRect::new(cx - width / 2.0, cy - height / 2.0, width, height),
            scale,
        })
    }

    pub fn extent(&self) -> &BoundingBox {
        &self.extent
    }

    /// The pixel rectangle the extent is mapped onto.
    pub fn frame(&self) -> PixelRect {
        self.frame
    }

    pub fn pixels_per_degree(&self) -> f64 {
        self.scale
    }

    /// Geographic (lon, lat) in degrees to pixel (x, y).
    pub fn geo_to_pixel(&self, lon: f64, lat: f64) -> (f64, f64) {
        let x = self.frame.x + (lon - self.extent.min_x) * self.scale;
        let y = self.frame.y + (self.extent.max_y - lat) * self.scale;
        (x, y)
    }

    /// Pixel (x, y) to geographic (lon, lat) in degrees.
    pub fn pixel_to_geo(&self, x: f64, y: f64) -> (f64, f64) {
        let lon = self.extent.min_x + (x - self.frame.x) / self.scale;
        let lat = self.extent.max_y - (y - self.frame.y) / self.scale;
        (lon, lat)
    }

    /// Move the frame so that its top-left corner sits at `(x, y)`.
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.frame.x = x;
        self.frame.y = y;
        self
    }
}
