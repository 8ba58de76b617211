//! # MedialCAM CAM Tools
//!
//! Medial-axis toolpath generation for closed outlines.
//!
//! ## Pipeline stages
//!
//! - **Curve Sampler**: evaluates cubic Bézier segments at uniform parameters
//! - **Envelope Builder**: assembles sampled loops into an outer boundary with holes
//! - **Boundary Resampler**: re-samples loops at a fixed arc-length step
//! - **Medial Axis Extractor**: interior Voronoi vertices with distance to the boundary
//! - **Path Orderer**: greedy nearest-neighbour ordering split at large jumps
//! - **Toolpath Emitter**: rapid and cut motion records at depth `-distance`
//!
//! ## Supporting infrastructure
//!
//! - **Loaders**: curve tables (CSV/TSV) and SVG path documents
//! - **G-code Writer**: one `G0`/`G1` line per motion record
//! - **Plotter**: SVG preview and JSON point tables
//! - **Pipeline**: batch runner with per-shape failure isolation and progress reporting

pub mod bezier;
pub mod delaunay;
pub mod envelope;
pub mod gcode_writer;
pub mod loaders;
pub mod medial_axis;
pub mod path_orderer;
pub mod pipeline;
pub mod plotter;
pub mod predicates;
pub mod resampler;
pub mod toolpath;

// Re-export commonly used items
pub use bezier::CurveSampler;
pub use delaunay::Triangulation;
pub use envelope::{BoundaryLoop, Envelope, EnvelopeBuilder, CONTINUITY_EPSILON};
pub use gcode_writer::{output_file_name, GcodeWriter};
pub use loaders::{
    load_from_path, source_for_path, CurveSource, ShapeInput, SvgCurveSource, TableCurveSource,
};
pub use medial_axis::{MedialAxisExtractor, MIN_BOUNDARY_SAMPLES};
pub use path_orderer::{PathOrderer, PathSegment, BREAK_FACTOR, WARMUP_STEPS};
pub use pipeline::{
    prepare_output_dir, write_outputs, BatchListener, BatchReport, CallbackListener,
    MachiningPipeline, NoOpBatchListener, OutputOptions, PipelineParameters, ShapeFailure,
    ShapeToolpath,
};
pub use plotter::{write_tables_json, PlotRow, PlotTables, Plotter, SvgPlotter};
pub use resampler::{BoundaryResampler, SampledBoundary, MAX_BOUNDARY_SAMPLES};
pub use toolpath::{MotionRecord, ToolpathEmitter, DEFAULT_SAFE_HEIGHT};
