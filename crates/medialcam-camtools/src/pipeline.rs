//! Batch pipeline
//!
//! Runs every shape through envelope construction, boundary resampling,
//! medial-axis extraction, path ordering and motion emission. Shapes are
//! independent: a failing shape is reported and skipped, and shapes may be
//! processed on a rayon pool. Results are always reported in shape order.

use crate::envelope::{Envelope, EnvelopeBuilder};
use crate::gcode_writer::{output_file_name, GcodeWriter};
use crate::loaders::ShapeInput;
use crate::medial_axis::MedialAxisExtractor;
use crate::path_orderer::{PathOrderer, PathSegment};
use crate::plotter::{
    write_tables_json, PlotTables, Plotter, SvgPlotter, PREVIEW_FILE_NAME, TABLES_FILE_NAME,
};
use crate::resampler::BoundaryResampler;
use crate::toolpath::{MotionRecord, ToolpathEmitter, DEFAULT_SAFE_HEIGHT};
use medialcam_core::{Error, ProgressCallback, ShapeCurves, ShapeError};
use parking_lot::Mutex;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info, info_span, warn};

/// Parameters for the machining pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineParameters {
    /// Samples per Bézier segment when building the envelope (at least 2)
    pub points_per_curve: usize,
    /// Arc-length step for boundary resampling
    pub resolution: f64,
    /// Retract height for rapid moves
    pub safe_height: f64,
    /// Process shapes on the rayon thread pool
    pub parallel: bool,
}

impl PipelineParameters {
    /// Checks every parameter before any shape is processed.
    pub fn validate(&self) -> medialcam_core::Result<()> {
        if self.points_per_curve < 2 {
            return Err(Error::invalid_parameter(
                "points_per_curve",
                format!("must be at least 2, got {}", self.points_per_curve),
            ));
        }
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(Error::invalid_parameter(
                "resolution",
                format!("must be a positive finite number, got {}", self.resolution),
            ));
        }
        if !self.safe_height.is_finite() {
            return Err(Error::invalid_parameter(
                "safe_height",
                format!("must be finite, got {}", self.safe_height),
            ));
        }
        Ok(())
    }
}

impl Default for PipelineParameters {
    fn default() -> Self {
        Self {
            points_per_curve: 20,
            resolution: 1.0,
            safe_height: DEFAULT_SAFE_HEIGHT,
            parallel: false,
        }
    }
}

/// Where and how results are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputOptions {
    pub directory: PathBuf,
    pub extension: String,
    pub write_preview: bool,
    pub write_tables: bool,
    pub precision: Option<usize>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            extension: "gcode".to_string(),
            write_preview: true,
            write_tables: false,
            precision: None,
        }
    }
}

/// Result of one successfully processed shape.
#[derive(Debug, Clone)]
pub struct ShapeToolpath {
    /// Position of the shape in the input
    pub index: usize,
    pub envelope: Envelope,
    pub medial_point_count: usize,
    pub segments: Vec<PathSegment>,
    pub records: Vec<MotionRecord>,
}

/// A shape that could not be processed.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeFailure {
    pub index: usize,
    pub error: ShapeError,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub total: usize,
    pub outputs: Vec<ShapeToolpath>,
    pub failures: Vec<ShapeFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// True when there was at least one shape and none succeeded.
    pub fn all_failed(&self) -> bool {
        self.total > 0 && self.outputs.is_empty()
    }

    /// Human-readable summary listing every failed shape.
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Processed {} shape(s): {} succeeded, {} failed",
            self.total,
            self.outputs.len(),
            self.failures.len()
        );
        for failure in &self.failures {
            let _ = write!(
                text,
                "\n  shape {}: [{}] {}",
                failure.index,
                failure.error.kind(),
                failure.error
            );
        }
        text
    }

    /// Boundary and path tables of all successful shapes.
    pub fn plot_tables(&self) -> PlotTables {
        let mut tables = PlotTables::new();
        for output in &self.outputs {
            for (part, ring) in output.envelope.loops().enumerate() {
                tables.push_boundary(output.index, part, ring.points());
            }
            for (part, segment) in output.segments.iter().enumerate() {
                tables.push_path(
                    output.index,
                    part,
                    segment.points.iter().map(|p| &p.position),
                );
            }
        }
        tables
    }
}

/// Receives batch progress. Methods may be called from worker threads.
pub trait BatchListener: Send + Sync {
    /// Called after each shape completes, successfully or not
    fn on_progress(&self, _done: usize, _total: usize) {}

    /// Called when a shape fails
    fn on_shape_failed(&self, _index: usize, _error: &ShapeError) {}

    /// Called once with the final report
    fn on_finished(&self, _report: &BatchReport) {}
}

/// Listener that ignores every event
pub struct NoOpBatchListener;

impl BatchListener for NoOpBatchListener {}

/// Forwards progress to a plain callback.
pub struct CallbackListener {
    callback: ProgressCallback,
}

impl CallbackListener {
    pub fn new(callback: ProgressCallback) -> Self {
        Self { callback }
    }
}

impl BatchListener for CallbackListener {
    fn on_progress(&self, done: usize, total: usize) {
        (self.callback)(done as u64, total as u64);
    }
}

/// Medial-axis machining pipeline
pub struct MachiningPipeline {
    params: PipelineParameters,
    builder: EnvelopeBuilder,
    resampler: BoundaryResampler,
    orderer: PathOrderer,
    emitter: ToolpathEmitter,
}

impl MachiningPipeline {
    /// Validates `params` and builds the stage objects.
    pub fn new(params: PipelineParameters) -> medialcam_core::Result<Self> {
        params.validate()?;
        Ok(Self {
            builder: EnvelopeBuilder::new(params.points_per_curve),
            resampler: BoundaryResampler::new(params.resolution),
            orderer: PathOrderer::default(),
            emitter: ToolpathEmitter::new(params.safe_height),
            params,
        })
    }

    pub fn parameters(&self) -> &PipelineParameters {
        &self.params
    }

    /// Runs all stages for one shape. The returned toolpath has index 0.
    pub fn process_shape(&self, curves: &ShapeCurves) -> Result<ShapeToolpath, ShapeError> {
        let envelope = self.builder.build(&curves.segments)?;
        let boundary = self.resampler.resample(&envelope)?;
        let medial = MedialAxisExtractor::extract(&boundary, &envelope)?;
        let segments = self.orderer.order(&medial);
        let records = self.emitter.emit(&segments);

        debug!(
            "{} medial points, {} segments, {} motion records",
            medial.len(),
            segments.len(),
            records.len()
        );

        Ok(ShapeToolpath {
            index: 0,
            envelope,
            medial_point_count: medial.len(),
            segments,
            records,
        })
    }

    /// Processes every shape and reports results in input order.
    pub fn run(&self, shapes: &[ShapeInput], listener: &dyn BatchListener) -> BatchReport {
        let total = shapes.len();
        let done = Mutex::new(0usize);

        info!(
            "Processing {} shape(s) ({})",
            total,
            if self.params.parallel {
                "parallel"
            } else {
                "sequential"
            }
        );

        let work = |(index, input): (usize, &ShapeInput)| -> Result<ShapeToolpath, ShapeFailure> {
            let _span = info_span!("shape", index).entered();
            let result = match input {
                Ok(curves) => self.process_shape(curves).map(|mut toolpath| {
                    toolpath.index = index;
                    toolpath
                }),
                Err(error) => Err(error.clone()),
            };

            match &result {
                Ok(toolpath) => info!(
                    "Shape {} done: {} segment(s), {} record(s)",
                    index,
                    toolpath.segments.len(),
                    toolpath.records.len()
                ),
                Err(error) => {
                    warn!("Shape {} skipped: {}", index, error);
                    listener.on_shape_failed(index, error);
                }
            }

            let finished = {
                let mut done = done.lock();
                *done += 1;
                *done
            };
            listener.on_progress(finished, total);

            result.map_err(|error| ShapeFailure { index, error })
        };

        let results: Vec<Result<ShapeToolpath, ShapeFailure>> = if self.params.parallel {
            shapes.par_iter().enumerate().map(work).collect()
        } else {
            shapes.iter().enumerate().map(work).collect()
        };

        let mut report = BatchReport {
            total,
            ..BatchReport::default()
        };
        for result in results {
            match result {
                Ok(toolpath) => report.outputs.push(toolpath),
                Err(failure) => report.failures.push(failure),
            }
        }

        listener.on_finished(&report);
        report
    }

    /// Prepares the output directory, runs the batch and writes the results.
    ///
    /// An unusable output directory is reported before any shape is processed.
    pub fn run_and_write(
        &self,
        shapes: &[ShapeInput],
        options: &OutputOptions,
        listener: &dyn BatchListener,
    ) -> io::Result<(BatchReport, Vec<PathBuf>)> {
        prepare_output_dir(options)?;
        let report = self.run(shapes, listener);
        let written = write_outputs(&report, options)?;
        Ok((report, written))
    }
}

/// Creates the output directory and checks that it accepts files.
pub fn prepare_output_dir(options: &OutputOptions) -> io::Result<()> {
    std::fs::create_dir_all(&options.directory)?;
    let metadata = std::fs::metadata(&options.directory)?;
    if metadata.permissions().readonly() {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("{} is read-only", options.directory.display()),
        ));
    }
    Ok(())
}

/// Writes one G-code file per successful shape plus the optional preview and
/// tables. The directory is created first; failing that, nothing is written.
pub fn write_outputs(report: &BatchReport, options: &OutputOptions) -> io::Result<Vec<PathBuf>> {
    prepare_output_dir(options)?;

    let writer = GcodeWriter::new(options.precision);
    let mut written = Vec::with_capacity(report.outputs.len() + 2);
    for output in &report.outputs {
        let path = options
            .directory
            .join(output_file_name(output.index, &options.extension));
        writer.write_to(&output.records, &path)?;
        written.push(path);
    }

    if options.write_preview || options.write_tables {
        let tables = report.plot_tables();
        if options.write_preview {
            let path = options.directory.join(PREVIEW_FILE_NAME);
            SvgPlotter::default().plot(&tables, &path)?;
            written.push(path);
        }
        if options.write_tables {
            let path = options.directory.join(TABLES_FILE_NAME);
            write_tables_json(&tables, &path)?;
            written.push(path);
        }
    }

    info!(
        "Wrote {} file(s) to {}",
        written.len(),
        options.directory.display()
    );
    Ok(written)
}
