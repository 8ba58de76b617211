//! G-code text emission
//!
//! Writes one line per motion record: `G0 X.. Y.. Z..` for rapids and
//! `G1 X.. Y.. Z..` for cuts. No header, no feed rates.

use crate::toolpath::MotionRecord;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Formats motion records as G-code lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct GcodeWriter {
    precision: Option<usize>,
}

impl GcodeWriter {
    /// `None` writes the shortest literal that round-trips; `Some(p)` writes
    /// `p` decimals.
    pub fn new(precision: Option<usize>) -> Self {
        Self { precision }
    }

    fn number(&self, value: f64) -> String {
        // Avoid printing "-0"
        let value = if value == 0.0 { 0.0 } else { value };
        match self.precision {
            Some(p) => format!("{:.*}", p, value),
            None => format!("{}", value),
        }
    }

    /// A single line without trailing newline.
    pub fn format_record(&self, record: &MotionRecord) -> String {
        let (x, y, z) = record.coordinates();
        format!(
            "G{} X{} Y{} Z{}",
            record.code(),
            self.number(x),
            self.number(y),
            self.number(z)
        )
    }

    /// All records, newline terminated.
    pub fn format(&self, records: &[MotionRecord]) -> String {
        let mut out = String::with_capacity(records.len() * 32);
        for record in records {
            let _ = writeln!(out, "{}", self.format_record(record));
        }
        out
    }

    pub fn write<W: Write>(&self, records: &[MotionRecord], writer: &mut W) -> std::io::Result<()> {
        for record in records {
            writeln!(writer, "{}", self.format_record(record))?;
        }
        Ok(())
    }

    /// Creates (or truncates) `path` and writes the records to it.
    pub fn write_to(&self, records: &[MotionRecord], path: &Path) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(records, &mut writer)?;
        writer.flush()
    }
}

/// Output file name for the shape at `index`.
pub fn output_file_name(index: usize, extension: &str) -> String {
    format!("machining_positions_{}.{}", index, extension)
}
