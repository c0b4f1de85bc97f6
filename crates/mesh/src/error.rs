//! Error types for mesh construction.

use thiserror::Error;

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

#[derive(Error, Debug)]
pub enum MeshError {
    /// Longitude and latitude vertex arrays differ in length
    #[error("Vertex arrays differ in length: {lon} longitudes vs {lat} latitudes")]
    LengthMismatch { lon: usize, lat: usize },

    /// Flattened vertex array is not made of whole triangles
    #[error("Vertex count {0} is not a multiple of 3")]
    NotTriangles(usize),

    /// Mask does not have one entry per triangle
    #[error("Mask length {mask} does not match triangle count {triangles}")]
    MaskLength { mask: usize, triangles: usize },

    /// Field does not have one value per cell
    #[error("Field has {values} values but the mesh has {cells} cells")]
    FieldLength { values: usize, cells: usize },
}
