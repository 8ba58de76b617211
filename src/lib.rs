//! # MedialCAM
//!
//! Turns closed outlines made of cubic Bézier segments into CNC toolpaths
//! that follow the shape's medial axis. The cutting depth at every point is
//! the distance to the nearest boundary, so a V-shaped tool carves a groove
//! that touches the outline.
//!
//! ## Architecture
//!
//! MedialCAM is organized as a workspace with multiple crates:
//!
//! 1. **medialcam-core** - Geometry value types and error enums
//! 2. **medialcam-camtools** - Envelope, Voronoi medial axis, path ordering, G-code, loaders
//! 3. **medialcam-settings** - Machining configuration persistence and validation
//! 4. **medialcam** - Command-line binary that integrates all crates

pub use medialcam_camtools as camtools;
pub use medialcam_settings as settings;

pub use medialcam_camtools::{
    load_from_path, prepare_output_dir, write_outputs, BatchListener, BatchReport,
    MachiningPipeline, MotionRecord, OutputOptions, PipelineParameters, ShapeToolpath,
};
pub use medialcam_core::{Error, InputError, Result, ShapeError};
pub use medialcam_settings::{MachiningConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Pipeline parameters for a configuration.
pub fn pipeline_parameters(config: &MachiningConfig) -> PipelineParameters {
    PipelineParameters {
        points_per_curve: config.points_per_curve,
        resolution: config.resolution,
        safe_height: config.safe_height,
        parallel: config.parallel,
    }
}

/// Output options for a configuration.
pub fn output_options(config: &MachiningConfig) -> OutputOptions {
    OutputOptions {
        directory: config.output_directory.clone(),
        extension: config.output_extension.clone(),
        write_preview: config.write_preview,
        write_tables: config.write_tables,
        precision: config.coordinate_precision,
    }
}

/// Batch listener that reports progress through `tracing`.
#[derive(Debug, Default)]
pub struct LoggingListener;

impl BatchListener for LoggingListener {
    fn on_progress(&self, done: usize, total: usize) {
        tracing::debug!("Shape {}/{} done", done, total);
    }

    fn on_shape_failed(&self, index: usize, error: &ShapeError) {
        tracing::debug!("Shape {} failed: [{}] {}", index, error.kind(), error);
    }

    fn on_finished(&self, report: &BatchReport) {
        tracing::info!("{}", report.summary());
    }
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
/// - `INFO` by default, `DEBUG` when `verbose` is set
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
