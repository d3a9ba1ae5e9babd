//! SensorKit Settings Crate
//!
//! Loads, validates and saves the configuration that drives a generation
//! run: design parameters, logging preferences and output files.

pub mod config;
pub mod error;

pub use config::{default_config_path, Config, LoggingSettings, OutputSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
