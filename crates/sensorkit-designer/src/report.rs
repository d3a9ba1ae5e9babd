//! Per-feature area reports and the end-of-run physical summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use sensorkit_core::um2_to_m2;

use crate::accumulator::PhysicalSummary;
use crate::model::FeatureId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureReport {
    pub id: FeatureId,
    pub name: Option<String>,
    /// e.g. "pin GND" or "diagonal-up trace"
    pub description: String,
    pub area_um2: f64,
    pub mass_g: f64,
}

impl FeatureReport {
    pub fn area_m2(&self) -> f64 {
        um2_to_m2(self.area_um2)
    }
}

impl fmt::Display for FeatureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} area: {:e} m^2", self.description, self.area_m2())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Diagonal trace whose horizontal and vertical spans differ
    MalformedDiagonal { dw: f64, dh: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub feature: FeatureId,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::MalformedDiagonal { dw, dh } => write!(
                f,
                "feature {}: diagonal trace is not 45 degrees (dw = {}, dh = {})",
                self.feature, dw, dh
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generated_at: DateTime<Utc>,
    pub device_name: String,
    pub features: Vec<FeatureReport>,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: PhysicalSummary,
}

impl GenerationReport {
    /// Detector aggregate trace area in mm²
    pub fn detector_area_mm2(&self) -> f64 {
        self.summary.detector_area_mm2
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for PhysicalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total trace area: {:e} m^2", self.total_area_m2)?;
        writeln!(f, "Detector trace area: {:e} m^2", self.detector_area_m2)?;
        writeln!(f, "Device area: {:e} m^2", self.device_area_m2)?;
        writeln!(f, "Moment X: {:e} g*m", self.moment_x)?;
        writeln!(f, "Moment Y: {:e} g*m", self.moment_y)?;
        writeln!(f, "Moment Z: {:e} g*m", self.moment_z)?;
        writeln!(f, "Moment sum: {:e} g*m", self.moment_sum)?;
        writeln!(f, "Overall mass: {:e} g", self.mass_g)?;
        match self.legacy_center_offset {
            Some(offset) => writeln!(f, "Center offset (combined): {:e} m", offset)?,
            None => writeln!(f, "Center offset (combined): undefined")?,
        }
        match self.center_offset {
            Some(o) => write!(
                f,
                "Center offset (per axis): x {:e} m, y {:e} m, z {:e} m",
                o.x, o.y, o.z
            ),
            None => write!(f, "Center offset (per axis): undefined"),
        }
    }
}
