//! Error types for figure rendering.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load feature layer {path}: {reason}")]
    Feature { path: PathBuf, reason: String },

    #[error("Invalid style: {0}")]
    Style(String),

    #[error("Cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error(transparent)]
    Projection(#[from] projection::ProjectionError),

    #[error(transparent)]
    Mesh(#[from] mesh::MeshError),
}

pub type RenderResult<T> = Result<T, RenderError>;
