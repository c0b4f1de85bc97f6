//! GRIB2 field loading for unstructured (ICON) grids.
//!
//! Messages are decoded with the `grib` crate. A [`FieldSelector`] picks the
//! message to read (2 m temperature by default) and [`read_field`] returns
//! its values together with the identifying metadata.

pub mod error;
pub mod reader;
pub mod selector;
pub mod tables;

pub use error::{Grib2Error, Grib2Result};
pub use reader::{list_messages, read_field, read_field_from_bytes, GribField, MessageInfo};
pub use selector::FieldSelector;
pub use tables::{Grib2Tables, LevelDescription};

/// Grid definition template number of the general unstructured grid (ICON).
pub const UNSTRUCTURED_GRID_TEMPLATE: u16 = 101;
