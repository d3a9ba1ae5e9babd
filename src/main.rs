//! SensorKit command line
//!
//! Build a device from its specification file, then write the SVG, an
//! optional PNG preview and an optional JSON report.
//!
//! # Usage
//!
//! ```bash
//! # Generate with default settings, SVG next to the device file
//! sensorkit demos/sensor.toml
//!
//! # Use a config file and write all outputs
//! sensorkit demos/sensor.toml --config demos/config.toml \
//!     --svg out/sensor.svg --png out/sensor.png --report out/report.json
//!
//! # Write a default configuration file
//! sensorkit --init-config sensorkit.toml
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};

use sensorkit::{
    init_logging, Config, DeviceGenerator, DeviceSpec, GenerationOutput, RasterCanvas,
    RecordingCanvas, BUILD_DATE, VERSION,
};

#[derive(Parser)]
#[command(name = "sensorkit")]
#[command(about = "Generate a conductive-trace sensor device and report its physical properties")]
#[command(version)]
struct Cli {
    /// Device specification (.toml or .json)
    #[arg(required_unless_present = "init_config")]
    spec: Option<PathBuf>,

    /// Configuration file; defaults to the platform config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SVG output path (defaults to the device file with an .svg extension)
    #[arg(long)]
    svg: Option<PathBuf>,

    /// PNG preview output path
    #[arg(long)]
    png: Option<PathBuf>,

    /// JSON report output path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Highlight the detector comb in the preview
    #[arg(long)]
    highlight_detector: bool,

    /// Override the logging level from the configuration
    #[arg(long)]
    log_level: Option<String>,

    /// Write a default configuration file and exit
    #[arg(long, value_name = "PATH")]
    init_config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.init_config {
        Config::default()
            .save_to_file(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.highlight_detector {
        config.render.highlight_detector = true;
    }
    init_logging(&config.logging)?;
    tracing::debug!("sensorkit {} (built {})", VERSION, BUILD_DATE);

    let spec_path = cli
        .spec
        .as_deref()
        .context("A device specification path is required")?;
    let output = generate(spec_path, &cli, &config)?;

    println!("{}", output.report.summary);
    for diagnostic in &output.report.diagnostics {
        println!("warning: {}", diagnostic);
    }
    Ok(())
}

fn generate(spec_path: &Path, cli: &Cli, config: &Config) -> anyhow::Result<GenerationOutput> {
    let params = config.design_parameters();
    let spec = DeviceSpec::load_from_file(spec_path)?;
    let layout = spec
        .build(&params)
        .with_context(|| format!("Invalid device specification {}", spec_path.display()))?;

    let generator = DeviceGenerator::new(params).with_name(spec.name.clone());
    let png_path = cli.png.clone().or_else(|| config.output.png.clone());

    let output = match &png_path {
        Some(path) => {
            let mut canvas = RasterCanvas::new(&params.device, config.output.raster_scale)?;
            let output = generator.generate(&layout, &mut canvas)?;
            canvas.save_png(path)?;
            tracing::info!("Wrote {}", path.display());
            output
        }
        None => generator.generate(&layout, &mut RecordingCanvas::new())?,
    };

    let svg_path = cli
        .svg
        .clone()
        .or_else(|| config.output.svg.clone())
        .unwrap_or_else(|| spec_path.with_extension("svg"));
    output.svg.write_to_file(&svg_path)?;
    tracing::info!("Wrote {}", svg_path.display());

    if let Some(path) = cli.report.clone().or_else(|| config.output.report.clone()) {
        std::fs::write(&path, output.report.to_json()?)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
    }

    Ok(output)
}
