//! Error types for GRIB2 loading.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Grib2Error {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid GRIB2 format: {0}")]
    InvalidFormat(String),

    #[error("Failed to decode message {index}: {reason}")]
    DecodeError { index: usize, reason: String },

    #[error("No message matches {0}")]
    FieldNotFound(String),

    #[error("Decoded {actual} values but the grid defines {expected} points")]
    PointCountMismatch { expected: usize, actual: usize },
}

pub type Grib2Result<T> = Result<T, Grib2Error>;
