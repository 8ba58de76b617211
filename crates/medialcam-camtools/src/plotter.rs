//! Result visualisation
//!
//! The pipeline flattens its results into two point tables: boundary
//! outlines and tool paths, one row per point. A [`Plotter`] renders them;
//! [`SvgPlotter`] draws a single SVG with equal axis scaling.

use medialcam_core::{BoundingBox, Point2D};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// File name of the rendered preview.
pub const PREVIEW_FILE_NAME: &str = "visualisation.svg";

/// File name of the JSON point tables.
pub const TABLES_FILE_NAME: &str = "plot_tables.json";

const PATH_COLOURS: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#17becf",
];

/// One point of a plotted polyline.
///
/// `part` numbers the polyline inside its shape: the loop index for boundary
/// rows, the path segment index for path rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotRow {
    pub shape: usize,
    pub part: usize,
    pub x: f64,
    pub y: f64,
}

/// Boundary and path tables for every processed shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotTables {
    pub boundary: Vec<PlotRow>,
    pub path: Vec<PlotRow>,
}

impl PlotTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.boundary.is_empty() && self.path.is_empty()
    }

    pub fn push_boundary<'a>(
        &mut self,
        shape: usize,
        part: usize,
        points: impl IntoIterator<Item = &'a Point2D>,
    ) {
        self.boundary.extend(points.into_iter().map(|p| PlotRow {
            shape,
            part,
            x: p.x,
            y: p.y,
        }));
    }

    pub fn push_path<'a>(
        &mut self,
        shape: usize,
        part: usize,
        points: impl IntoIterator<Item = &'a Point2D>,
    ) {
        self.path.extend(points.into_iter().map(|p| PlotRow {
            shape,
            part,
            x: p.x,
            y: p.y,
        }));
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        let points: Vec<Point2D> = self
            .boundary
            .iter()
            .chain(&self.path)
            .map(|r| Point2D::new(r.x, r.y))
            .collect();
        BoundingBox::from_points(&points)
    }
}

/// Renders plot tables to a file.
pub trait Plotter {
    fn plot(&self, tables: &PlotTables, path: &Path) -> io::Result<()>;
}

/// Writes the tables as pretty-printed JSON.
pub fn write_tables_json(tables: &PlotTables, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, tables)?;
    writer.flush()
}

/// Splits rows into runs sharing the same `(shape, part)`.
fn polylines(rows: &[PlotRow]) -> Vec<&[PlotRow]> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..rows.len() {
        if (rows[i].shape, rows[i].part) != (rows[i - 1].shape, rows[i - 1].part) {
            runs.push(&rows[start..i]);
            start = i;
        }
    }
    if start < rows.len() {
        runs.push(&rows[start..]);
    }
    runs
}

/// SVG polyline path data; Y is negated so up is up on screen.
fn path_data(rows: &[PlotRow]) -> String {
    let mut d = String::with_capacity(rows.len() * 24);
    for (i, row) in rows.iter().enumerate() {
        let _ = write!(
            d,
            "{} {:.4} {:.4} ",
            if i == 0 { "M" } else { "L" },
            row.x,
            -row.y
        );
    }
    d.trim_end().to_string()
}

/// Draws outlines in grey and each tool path segment in its own colour.
#[derive(Debug, Clone, Copy)]
pub struct SvgPlotter {
    width: f64,
}

impl Default for SvgPlotter {
    fn default() -> Self {
        Self { width: 800.0 }
    }
}

impl SvgPlotter {
    /// `width` is the rendered width in pixels; height follows the aspect ratio.
    pub fn new(width: f64) -> Self {
        Self { width }
    }

    pub fn render(&self, tables: &PlotTables) -> String {
        let (min_x, min_y, w, h) = match tables.bounding_box() {
            Some(bbox) => {
                let margin = 0.05 * bbox.width().max(bbox.height()).max(1e-9);
                (
                    bbox.min.x - margin,
                    -bbox.max.y - margin,
                    bbox.width() + 2.0 * margin,
                    bbox.height() + 2.0 * margin,
                )
            }
            None => (0.0, 0.0, 1.0, 1.0),
        };
        let height = self.width * h / w;
        let stroke = w.max(h) / 500.0;

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="{:.4} {:.4} {:.4} {:.4}">"#,
            self.width, height, min_x, min_y, w, h
        );
        let _ = writeln!(
            svg,
            r##"<g id="boundary" fill="none" stroke="#555555" stroke-width="{:.4}">"##,
            stroke
        );
        for run in polylines(&tables.boundary) {
            let _ = writeln!(svg, r#"<path d="{} Z"/>"#, path_data(run));
        }
        svg.push_str("</g>\n");

        let _ = writeln!(
            svg,
            r#"<g id="toolpath" fill="none" stroke-width="{:.4}">"#,
            stroke
        );
        for (k, run) in polylines(&tables.path).into_iter().enumerate() {
            let _ = writeln!(
                svg,
                r#"<path stroke="{}" d="{}"/>"#,
                PATH_COLOURS[k % PATH_COLOURS.len()],
                path_data(run)
            );
        }
        svg.push_str("</g>\n</svg>\n");
        svg
    }
}

impl Plotter for SvgPlotter {
    fn plot(&self, tables: &PlotTables, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.render(tables))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> PlotTables {
        let square = [
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
            Point2D::new(0.0, 0.0),
        ];
        let mut tables = PlotTables::new();
        tables.push_boundary(0, 0, &square);
        tables.push_path(0, 0, &[Point2D::new(2.0, 5.0), Point2D::new(8.0, 5.0)]);
        tables.push_path(0, 1, &[Point2D::new(5.0, 2.0), Point2D::new(5.0, 8.0)]);
        tables
    }

    #[test]
    fn test_polylines_split_on_part() {
        let t = tables();
        let runs = polylines(&t.path);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1][0].y, 2.0);
        assert_eq!(polylines(&t.boundary).len(), 1);
        assert!(polylines(&[]).is_empty());
    }

    #[test]
    fn test_render_flips_y_and_colours_segments() {
        let svg = SvgPlotter::default().render(&tables());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("M 2.0000 -5.0000 L 8.0000 -5.0000"));
        assert!(svg.contains(PATH_COLOURS[0]));
        assert!(svg.contains(PATH_COLOURS[1]));
        // Square extent with margins keeps a square aspect ratio
        assert!(svg.contains(r#"width="800" height="800""#));
    }

    #[test]
    fn test_render_empty() {
        let svg = SvgPlotter::default().render(&PlotTables::new());
        assert!(svg.contains(r#"viewBox="0.0000 0.0000 1.0000 1.0000""#));
    }

    #[test]
    fn test_tables_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TABLES_FILE_NAME);
        write_tables_json(&tables(), &path).unwrap();
        let back: PlotTables =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, tables());
    }
}
