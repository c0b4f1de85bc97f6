//! NetCDF reader for ICON unstructured grid definitions.
//!
//! An ICON grid file describes each triangular cell by the longitudes and
//! latitudes of its three vertices (`clon_vertices`, `clat_vertices`,
//! dimensions `(cell, nv)` with `nv = 3`, radians). This crate reads those
//! arrays through the native `netcdf` library.
//!
//! # Example
//!
//! ```ignore
//! use netcdf_parser::{load_icon_grid, GridVariables};
//!
//! let grid = load_icon_grid("icon_grid_0026_R03B07_G.nc", &GridVariables::default())?;
//! println!("{} cells", grid.num_cells());
//! ```

pub mod error;
pub mod grid;
mod native;

pub use error::{NetCdfError, NetCdfResult};
pub use grid::{load_icon_grid, GridVariables, IconGrid, VERTICES_PER_CELL};
pub use native::silence_hdf5_errors;
