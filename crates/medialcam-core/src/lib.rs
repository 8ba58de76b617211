//! # MedialCAM Core
//!
//! Core types, errors, and callback aliases shared by the MedialCAM crates.
//! Provides the value types that flow through the medial-axis toolpath
//! pipeline: points, cubic Bézier segments, and depth-tagged medial points.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, InputError, Result, ShapeError};
pub use geometry::{BoundingBox, CurveSegment, MedialPoint, Point2D, ShapeCurves};
pub use types::ProgressCallback;
