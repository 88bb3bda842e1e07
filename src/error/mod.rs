//! Error types for the image fidelity library.
//!
//! Only recoverable conditions live here. Comparing grids of different shape
//! or indexing a grid out of range is a caller bug and panics instead.

use thiserror::Error;

use crate::color::ColorModel;
use crate::metrics::Metric;

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, PixfidError>;

/// Main error type for the image fidelity library.
#[derive(Error, Debug)]
pub enum PixfidError {
    /// Error opening, decoding or encoding an image file.
    #[error("Image error: {0}")]
    Image(String),

    /// Input rejected before any metric runs.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Metric name not present in the registry.
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// Metric is registered but has no implementation.
    #[error("Metric not implemented: {0}")]
    NotImplemented(Metric),

    /// Color model cannot be computed from raw RGBA samples.
    #[error("Unsupported projection: {0} has no scalar projection from RGBA")]
    UnsupportedProjection(ColorModel),

    /// Unknown color model name.
    #[error("Unknown color model: {0}")]
    UnknownColorModel(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<image::ImageError> for PixfidError {
    fn from(err: image::ImageError) -> Self {
        PixfidError::Image(err.to_string())
    }
}

impl From<toml::de::Error> for PixfidError {
    fn from(err: toml::de::Error) -> Self {
        PixfidError::Config(err.to_string())
    }
}
