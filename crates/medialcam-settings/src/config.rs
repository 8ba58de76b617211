//! Machining configuration
//!
//! Every field has a default, so partial files are accepted. Files are JSON or
//! TOML depending on their extension and are validated on load and save.

use crate::error::{Result, SettingsError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Options for turning outlines into medial-axis toolpaths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachiningConfig {
    /// Samples per Bézier segment when building the envelope
    pub points_per_curve: usize,
    /// Arc-length step for boundary resampling
    pub resolution: f64,
    /// Retract height for rapid moves
    pub safe_height: f64,
    /// Destination of the per-shape files
    pub output_directory: PathBuf,
    /// Extension of the per-shape files
    pub output_extension: String,
    /// Render `visualisation.svg`
    pub write_preview: bool,
    /// Write `plot_tables.json`
    pub write_tables: bool,
    /// Process shapes in parallel
    pub parallel: bool,
    /// Fixed decimals for coordinates; shortest round-trip form when unset
    pub coordinate_precision: Option<usize>,
}

impl Default for MachiningConfig {
    fn default() -> Self {
        Self {
            points_per_curve: 20,
            resolution: 1.0,
            safe_height: 5.0,
            output_directory: PathBuf::from("output"),
            output_extension: "gcode".to_string(),
            write_preview: true,
            write_tables: false,
            parallel: false,
            coordinate_precision: None,
        }
    }
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        _ => Err(SettingsError::UnsupportedFormat(path.display().to_string())),
    }
}

impl MachiningConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, e.g. `~/.config/medialcam/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join("medialcam").join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;

        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.points_per_curve < 2 {
            return Err(SettingsError::invalid(
                "points_per_curve",
                format!("must be at least 2, got {}", self.points_per_curve),
            ));
        }

        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(SettingsError::invalid(
                "resolution",
                format!("must be a positive number, got {}", self.resolution),
            ));
        }

        if !self.safe_height.is_finite() {
            return Err(SettingsError::invalid("safe_height", "must be finite"));
        }

        if self.output_extension.is_empty()
            || self
                .output_extension
                .contains(|c: char| c == '.' || std::path::is_separator(c))
        {
            return Err(SettingsError::invalid(
                "output_extension",
                format!("'{}' is not a plain file extension", self.output_extension),
            ));
        }

        if self.coordinate_precision.is_some_and(|p| p > 17) {
            return Err(SettingsError::invalid(
                "coordinate_precision",
                "must be at most 17 decimals",
            ));
        }

        Ok(())
    }
}
