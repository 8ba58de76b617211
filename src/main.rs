use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use medialcam::{
    init_logging, load_from_path, output_options, pipeline_parameters, LoggingListener,
    MachiningConfig, MachiningPipeline, BUILD_DATE, VERSION,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "medialcam")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate G-code toolpaths for every shape in a curve file
    Generate {
        /// Curve table (.csv, .tsv, .txt) or SVG document
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (TOML or JSON); defaults to the user config if present
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Samples per Bézier segment when building the envelope
        #[arg(long)]
        points_per_curve: Option<usize>,

        /// Boundary resampling step in drawing units
        #[arg(short, long)]
        resolution: Option<f64>,

        /// Z height for rapid moves
        #[arg(long)]
        safe_height: Option<f64>,

        /// Process shapes on all cores
        #[arg(long)]
        parallel: bool,

        /// Skip the SVG preview
        #[arg(long)]
        no_preview: bool,

        /// Also write the plot tables as JSON
        #[arg(long)]
        tables: bool,
    },
    /// Write a configuration file with default values
    InitConfig {
        /// Destination (.toml or .json); defaults to the user config path
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    info!("medialcam {} (built {})", VERSION, BUILD_DATE);

    match cli.command {
        Commands::Generate {
            input,
            output,
            config,
            points_per_curve,
            resolution,
            safe_height,
            parallel,
            no_preview,
            tables,
        } => {
            let mut config = load_config(config)?;
            if let Some(directory) = output {
                config.output_directory = directory;
            }
            if let Some(n) = points_per_curve {
                config.points_per_curve = n;
            }
            if let Some(r) = resolution {
                config.resolution = r;
            }
            if let Some(z) = safe_height {
                config.safe_height = z;
            }
            config.parallel |= parallel;
            config.write_preview &= !no_preview;
            config.write_tables |= tables;
            config.validate().context("Invalid machining settings")?;

            generate(&input, &config)
        }
        Commands::InitConfig { path } => {
            let path = match path {
                Some(path) => path,
                None => MachiningConfig::default_path()
                    .context("No configuration directory available; pass a path")?,
            };
            MachiningConfig::default()
                .save_to_file(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote default configuration to {}", path.display());
            Ok(())
        }
    }
}

/// Explicit file, else the user config when it exists, else defaults.
fn load_config(path: Option<PathBuf>) -> Result<MachiningConfig> {
    if let Some(path) = path {
        return MachiningConfig::load_from_file(&path)
            .with_context(|| format!("Failed to load configuration {}", path.display()));
    }
    match MachiningConfig::default_path() {
        Some(path) if path.exists() => {
            info!("Using configuration {}", path.display());
            MachiningConfig::load_from_file(&path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))
        }
        _ => Ok(MachiningConfig::default()),
    }
}

fn generate(input: &Path, config: &MachiningConfig) -> Result<()> {
    let shapes = load_from_path(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    info!("Loaded {} shape(s) from {}", shapes.len(), input.display());

    let pipeline = MachiningPipeline::new(pipeline_parameters(config))
        .context("Invalid machining parameters")?;
    let (report, written) = pipeline
        .run_and_write(&shapes, &output_options(config), &LoggingListener)
        .with_context(|| {
            format!(
                "Failed to write outputs to {}",
                config.output_directory.display()
            )
        })?;
    for path in &written {
        info!("Wrote {}", path.display());
    }

    if report.all_failed() {
        bail!("{}", report.summary());
    }
    if !report.is_success() {
        warn!("{} shape(s) failed", report.failures.len());
    }
    Ok(())
}
