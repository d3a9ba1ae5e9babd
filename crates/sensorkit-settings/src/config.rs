//! Configuration file handling for SensorKit.
//!
//! Configuration is organized into sections mirroring the design parameters
//! of a generation run, plus logging and output preferences:
//! - Device outline
//! - Trace width and end caps
//! - Material (layer thicknesses, density)
//! - Detector comb geometry
//! - Render options
//! - Logging and output files
//!
//! Files are JSON or TOML, chosen by extension. Every section has defaults,
//! so a file only needs the values it changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use sensorkit_designer::{
    DesignParameters, DetectorParameters, DeviceGeometry, MaterialProperties, RenderOptions,
    TraceParameters,
};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Logging preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Output files written after a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub png: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
    /// Raster resolution in pixels per millimetre
    pub raster_scale: f64,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            svg: None,
            png: None,
            report: None,
            raster_scale: 20.0,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub device: DeviceGeometry,
    pub trace: TraceParameters,
    pub material: MaterialProperties,
    pub detector: DetectorParameters,
    pub render: RenderOptions,
    pub logging: LoggingSettings,
    pub output: OutputSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
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
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(())
    }

    /// Load `path` if given, else the default config file if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match default_config_path() {
            Ok(default) if default.exists() => Self::load_from_file(&default),
            _ => {
                tracing::debug!("No configuration file; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.design_parameters().validate()?;

        if !(self.output.raster_scale.is_finite() && self.output.raster_scale > 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "output.raster_scale".to_string(),
                value: self.output.raster_scale.to_string(),
            });
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValueOutOfRange {
                key: "logging.level".to_string(),
                value: String::new(),
            });
        }

        Ok(())
    }

    /// Parameters for a generation run
    pub fn design_parameters(&self) -> DesignParameters {
        DesignParameters {
            device: self.device,
            trace: self.trace,
            material: self.material,
            detector: self.detector,
            render: self.render,
        }
    }
}

/// `<config dir>/sensorkit/config.toml`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("sensorkit").join("config.toml"))
        .ok_or(ConfigError::NoConfigDirectory)
}
