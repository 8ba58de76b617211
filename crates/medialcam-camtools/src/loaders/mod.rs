//! Curve sources
//!
//! Loaders turn an input document into one [`ShapeInput`] per shape. A
//! problem that can be pinned to one shape is reported in that shape's slot
//! so the rest of the batch still runs; problems with the document as a whole
//! are returned as [`InputError`].

mod svg;
mod table;

pub use svg::SvgCurveSource;
pub use table::{TableCurveSource, REQUIRED_COLUMNS};

use medialcam_core::{InputError, ShapeCurves, ShapeError};
use std::path::{Path, PathBuf};

/// Curves for one shape, or the reason they could not be read.
pub type ShapeInput = Result<ShapeCurves, ShapeError>;

/// Yields the ordered cubic segment groups of an input document.
pub trait CurveSource {
    fn load(&self) -> Result<Vec<ShapeInput>, InputError>;
}

pub(crate) fn read_input(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Picks a loader from the file extension.
pub fn source_for_path(path: impl Into<PathBuf>) -> Result<Box<dyn CurveSource>, InputError> {
    let path = path.into();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "svg" => Ok(Box::new(SvgCurveSource::new(path))),
        "csv" | "txt" => Ok(Box::new(TableCurveSource::new(path))),
        "tsv" => Ok(Box::new(TableCurveSource::new(path).with_delimiter('\t'))),
        _ => Err(InputError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Loads every shape from `path` using the loader chosen by its extension.
pub fn load_from_path(path: impl Into<PathBuf>) -> Result<Vec<ShapeInput>, InputError> {
    source_for_path(path)?.load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let err = source_for_path("drawing.dxf").err().unwrap();
        assert!(matches!(err, InputError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_from_path("/nonexistent/shapes.csv").unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }
}
