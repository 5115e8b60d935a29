//! Error taxonomy shared by windows, scene objects and images.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, GraphicsError>;

/// Errors raised by drawing, window and image operations.
///
/// Every variant is reported synchronously at the offending call; none of
/// them is worth retrying.
#[derive(Debug, Error)]
pub enum GraphicsError {
    /// Operating on, drawing into, or waiting on a closed window.
    #[error("{0}")]
    ClosedWindow(&'static str),

    /// Drawing an object that is still visible in an open window.
    #[error("Object currently drawn")]
    AlreadyDrawn,

    /// Reconfiguring an option the object's variant does not carry.
    #[error("Object doesn't support operation: {0}")]
    UnsupportedOption(&'static str),

    /// Option value outside its enumeration or range.
    #[error("Illegal option value for {option}: {value}")]
    BadOptionValue { option: &'static str, value: String },

    #[error("Window dimensions must be positive, got {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(&'static str),

    #[error("Pixel ({x}, {y}) is outside the image")]
    PixelOutOfBounds { x: u32, y: u32 },

    #[error("Cannot infer image format from {}", .0.display())]
    UnknownImageFormat(PathBuf),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rendering error: {0}")]
    Render(#[from] cairo::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

impl GraphicsError {
    pub(crate) fn bad_value(option: &'static str, value: impl ToString) -> Self {
        GraphicsError::BadOptionValue {
            option,
            value: value.to_string(),
        }
    }
}
