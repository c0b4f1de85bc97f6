//! Mesh construction for unstructured triangular grids.
//!
//! Each grid cell becomes one triangle. Vertices are not shared between
//! cells: cell `i` owns vertices `3i`, `3i + 1` and `3i + 2`. Triangles whose
//! vertex longitudes jump by more than 180° are masked since they straddle
//! the antimeridian and would be drawn stretched across the whole map.

pub mod error;
pub mod field;
pub mod triangulation;

pub use error::{MeshError, MeshResult};
pub use field::CellField;
pub use triangulation::{Triangulation, DATELINE_THRESHOLD_DEG};
