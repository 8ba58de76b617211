//! MedialCAM Settings Crate
//!
//! Handles the machining configuration: defaults, JSON/TOML persistence and
//! validation.

pub mod config;
pub mod error;

pub use config::{MachiningConfig, CONFIG_FILE_NAME};
pub use error::{Result, SettingsError};
