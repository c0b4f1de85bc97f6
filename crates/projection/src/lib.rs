//! Map projections from geographic coordinates to image pixels.
//!
//! Only the equirectangular (Plate Carree) projection is needed: longitude
//! and latitude map linearly onto x and y with one common scale, so a degree
//! spans the same number of pixels in both directions.

pub mod plate_carree;

pub use plate_carree::{PixelRect, PlateCarree, ProjectionError};
