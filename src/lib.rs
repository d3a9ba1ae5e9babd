//! # SensorKit
//!
//! Generator for small planar conductive-trace devices: pins, straight and
//! diagonal traces, and a serpentine detector comb. Alongside the geometry it
//! derives the occupied area, mass and three-axis moments of the conductor.
//!
//! ## Architecture
//!
//! SensorKit is organized as a workspace with multiple crates:
//!
//! 1. **sensorkit-core** - Error taxonomy, unit conversions, constants
//! 2. **sensorkit-designer** - Feature model, accumulator, canvas, SVG, generator
//! 3. **sensorkit-settings** - Configuration files and validation
//! 4. **sensorkit** - Command line binary that integrates all crates

pub use sensorkit_core::{Error, Result};
pub use sensorkit_designer as designer;
pub use sensorkit_settings as settings;

pub use sensorkit_designer::{
    DesignParameters, DeviceGenerator, DeviceSpec, GenerationOutput, GenerationReport, Layout,
    PhysicalSummary, RasterCanvas, RecordingCanvas,
};
pub use sensorkit_settings::{Config, LoggingSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - RUST_LOG environment variable support, falling back to `settings.level`
/// - Pretty console output on stderr, or JSON lines when `settings.json` is set
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))?;

    if settings.json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
