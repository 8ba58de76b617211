//! Error handling for MedialCAM
//!
//! Provides the error types for every layer of the pipeline:
//! - Shape errors (fatal for one shape, never for the batch)
//! - Input errors (curve source loading)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Errors that abort the processing of a single shape.
///
/// These are caught at the shape-processing boundary, logged with the shape
/// index, and collected into the batch summary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Curve data for the shape is incomplete or out of order
    #[error("Malformed input: {reason}")]
    MalformedInput {
        /// What was wrong with the curve records.
        reason: String,
    },

    /// The assembled outline is not a valid polygon with holes
    #[error("Malformed envelope: {reason}")]
    MalformedEnvelope {
        /// Which validity check failed.
        reason: String,
    },

    /// Too few boundary samples to build a Voronoi diagram
    #[error("Insufficient boundary samples: found {found}, need at least {required}")]
    InsufficientSamples {
        /// Number of samples produced by the resampler.
        found: usize,
        /// Minimum number of samples required.
        required: usize,
    },

    /// The resampling step would produce an unmanageable number of samples
    #[error("Resolution too fine: about {estimated} boundary samples, limit is {limit}")]
    TooManySamples {
        /// Estimated sample count for the whole boundary.
        estimated: usize,
        /// Largest accepted sample count.
        limit: usize,
    },
}

impl ShapeError {
    pub fn malformed_input(reason: impl Into<String>) -> Self {
        ShapeError::MalformedInput {
            reason: reason.into(),
        }
    }

    pub fn malformed_envelope(reason: impl Into<String>) -> Self {
        ShapeError::MalformedEnvelope {
            reason: reason.into(),
        }
    }

    /// Short machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeError::MalformedInput { .. } => "MalformedInput",
            ShapeError::MalformedEnvelope { .. } => "MalformedEnvelope",
            ShapeError::InsufficientSamples { .. } => "InsufficientSamples",
            ShapeError::TooManySamples { .. } => "TooManySamples",
        }
    }
}

/// Errors raised while reading a curve source as a whole.
///
/// Unlike [`ShapeError`] these abort the run before any shape is processed.
#[derive(Error, Debug)]
pub enum InputError {
    /// The input file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path of the input file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The table header lacks required columns
    #[error("Curve table is missing required columns: {}", missing.join(", "))]
    MissingColumns {
        /// Names of the absent columns.
        missing: Vec<String>,
    },

    /// The document is not usable SVG
    #[error("Invalid SVG document: {0}")]
    Svg(String),

    /// The file extension is not a known curve format
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// The input contained no shapes at all
    #[error("No shapes found in {0}")]
    Empty(String),
}

/// Main error type for MedialCAM
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Shape processing error
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Input loading error
    #[error(transparent)]
    Input(#[from] InputError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A pipeline parameter is out of range
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl Error {
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
