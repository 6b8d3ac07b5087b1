//! Error handling for floorsketch
//!
//! Provides the error types used across the sketch engine:
//! - Sketch errors (surface, geometry, encoding)
//! - A unified `Error` wrapping sketch and I/O failures
//!
//! All error types use `thiserror` for ergonomic error handling. None of
//! these errors cross into the host application: the session layer turns
//! them into logged no-ops.

use thiserror::Error;

/// Sketch engine error type
///
/// Represents failures of the drawing surface, the export composer and
/// value parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SketchError {
    /// The raster surface has not been mounted yet
    #[error("Drawing surface not initialized")]
    SurfaceUnavailable,

    /// A raster surface could not be allocated with the given size
    #[error("Invalid surface dimensions {width}x{height}")]
    InvalidDimensions {
        /// The requested width in pixels.
        width: u32,
        /// The requested height in pixels.
        height: u32,
    },

    /// A color string is not `#rrggbb`
    #[error("Invalid color '{value}', expected #rrggbb")]
    InvalidColor {
        /// The rejected input.
        value: String,
    },

    /// Raster encoding failed
    #[error("Image encoding failed: {reason}")]
    Encode {
        /// The reason reported by the encoder.
        reason: String,
    },
}

/// Main error type for floorsketch
///
/// A unified error type that can represent any error from the library
/// crates. This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Sketch error
    #[error(transparent)]
    Sketch(#[from] SketchError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error means the surface is not mounted yet
    pub fn is_surface_unavailable(&self) -> bool {
        matches!(self, Error::Sketch(SketchError::SurfaceUnavailable))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
