//! # SensorKit Designer
//!
//! Geometry and physical-property generation for planar conductive-trace
//! devices.
//!
//! ## Core Components
//!
//! - **Features**: circular pins, straight and 45° diagonal traces, and the
//!   serpentine detector comb
//! - **Accumulator**: occupied area, mass and per-axis moments of one run
//! - **Canvas**: primitive render sink, with recording and raster sinks
//! - **SVG**: document assembly from per-feature fragments
//! - **Layout**: device specifications loaded from TOML or JSON and linked
//!   in two phases
//!
//! ## Architecture
//!
//! ```text
//! DeviceSpec (records)
//!   └── LayoutBuilder (construct, then link by name)
//!         └── Layout (immutable feature list)
//!
//! DeviceGenerator
//!   ├── construction pass (pin and trace areas)
//!   └── render pass (canvas, SVG, mass and moments, reports)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sensorkit_designer::{DesignParameters, DeviceGenerator, DeviceSpec, RecordingCanvas};
//!
//! let params = DesignParameters::default();
//! let layout = DeviceSpec::load_from_file(path)?.build(&params)?;
//! let output = DeviceGenerator::new(params).generate(&layout, &mut RecordingCanvas::new())?;
//! println!("{}", output.report.summary);
//! ```

pub mod accumulator;
pub mod canvas;
pub mod generator;
pub mod layout;
pub mod model;
pub mod params;
pub mod raster;
pub mod report;
pub mod svg;

pub use accumulator::{AxisOffsets, MassContribution, PhysicalAccumulator, PhysicalSummary};
pub use canvas::{Canvas, FillStyle, Primitive, RecordingCanvas};
pub use generator::{DeviceGenerator, GenerationOutput};
pub use layout::{DeviceSpec, FeatureRecord, Layout, LayoutBuilder};
pub use model::{
    AreaContribution, Detector, DeviceFeature, Feature, FeatureId, FeatureType, Pin, Point, Trace,
    TraceKind,
};
pub use params::{
    DesignParameters, DetectorParameters, DeviceGeometry, MaterialProperties, RenderOptions,
    TraceParameters,
};
pub use raster::RasterCanvas;
pub use report::{Diagnostic, DiagnosticKind, FeatureReport, GenerationReport};
pub use svg::SvgDocument;
