use super::{read_input, CurveSource, ShapeInput};
use medialcam_core::{CurveSegment, InputError, Point2D, ShapeCurves, ShapeError};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Header columns a curve table must carry.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Type", "P0X", "P0Y", "P1X", "P1Y", "P2X", "P2Y", "P3X", "P3Y",
];

/// Row type that starts a new shape.
const MOVE_MARKER: &str = "M";

/// Spreadsheet of cubic segments exported as delimited text.
///
/// A row whose `Type` is `M` opens a new shape; every other row adds one
/// segment (`P0..P3`) to the current shape.
#[derive(Debug, Clone)]
pub struct TableCurveSource {
    path: PathBuf,
    delimiter: char,
}

impl TableCurveSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: ',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parses table text. Exposed for callers that already hold the content.
    pub fn parse(&self, content: &str) -> Result<Vec<ShapeInput>, InputError> {
        let mut lines = content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((_, header)) = lines.next() else {
            return Err(InputError::Empty(self.path.display().to_string()));
        };
        let header: Vec<&str> = header.split(self.delimiter).map(|h| h.trim()).collect();

        let mut columns = [0usize; 9];
        let mut missing = Vec::new();
        for (slot, name) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
            match header.iter().position(|h| *h == name) {
                Some(index) => *slot = index,
                None => missing.push(name.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(InputError::MissingColumns { missing });
        }

        let mut shapes: Vec<ShapeInput> = Vec::new();
        // Open shape: `None` until the first M row
        let mut current: Option<ShapeInput> = None;

        for (line_no, line) in lines {
            let cells: Vec<&str> = line.split(self.delimiter).map(|c| c.trim()).collect();
            let row_type = cells.get(columns[0]).copied().unwrap_or_default();

            if row_type == MOVE_MARKER {
                if let Some(shape) = current.take() {
                    shapes.push(shape);
                }
                current = Some(Ok(ShapeCurves::default()));
                continue;
            }

            let shape = current.get_or_insert_with(|| {
                warn!(
                    "Line {}: first record is '{}', expected a move marker",
                    line_no + 1,
                    row_type
                );
                Err(ShapeError::malformed_input(format!(
                    "first record not a move marker (found '{}')",
                    row_type
                )))
            });
            if shape.is_err() {
                continue;
            }

            match parse_segment(&cells, &columns) {
                Ok(segment) => {
                    if let Ok(curves) = shape.as_mut() {
                        curves.segments.push(segment);
                    }
                }
                Err(reason) => {
                    *shape = Err(ShapeError::malformed_input(format!(
                        "line {}: {}",
                        line_no + 1,
                        reason
                    )));
                }
            }
        }
        if let Some(shape) = current {
            shapes.push(shape);
        }

        if shapes.is_empty() {
            return Err(InputError::Empty(self.path.display().to_string()));
        }
        debug!("Loaded {} shapes from {}", shapes.len(), self.path.display());
        Ok(shapes)
    }
}

fn parse_segment(cells: &[&str], columns: &[usize; 9]) -> Result<CurveSegment, String> {
    let mut values = [0.0f64; 8];
    for (value, (&column, name)) in values
        .iter_mut()
        .zip(columns[1..].iter().zip(&REQUIRED_COLUMNS[1..]))
    {
        let cell = cells
            .get(column)
            .copied()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| format!("missing value for {}", name))?;
        *value = cell
            .parse::<f64>()
            .map_err(|_| format!("invalid number '{}' for {}", cell, name))?;
    }
    Ok(CurveSegment::new(
        Point2D::new(values[0], values[1]),
        Point2D::new(values[2], values[3]),
        Point2D::new(values[4], values[5]),
        Point2D::new(values[6], values[7]),
    ))
}

impl CurveSource for TableCurveSource {
    fn load(&self) -> Result<Vec<ShapeInput>, InputError> {
        let content = read_input(&self.path)?;
        self.parse(&content)
    }
}
