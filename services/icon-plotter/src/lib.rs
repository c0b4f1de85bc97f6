//! ICON plotter library.
//!
//! Loads an ICON grid and a cell field, renders the grid wireframe and the
//! field over a fixed map window, and copies both figures to a delivery
//! directory.

pub mod config;
pub mod distribute;
pub mod pipeline;

pub use config::{Overrides, PlotConfig};
pub use distribute::copy_with_metadata;
pub use pipeline::{run, RunSummary};
