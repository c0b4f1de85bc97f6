//! Common types shared across the icon-plot crates.

pub mod bbox;
pub mod units;

pub use bbox::{BboxParseError, BoundingBox};
pub use units::{UnitTransform, KELVIN_OFFSET};
