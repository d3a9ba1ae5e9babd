//! Design parameters shared by every feature of a generation run.
//!
//! All lengths are in micrometres. Parameter groups deserialize with
//! defaults so configuration files only need to name what they change.

use serde::{Deserialize, Serialize};

use sensorkit_core::constants::{
    COPPER_DENSITY, DEFAULT_HORIZONTAL_PAIR_DIVISOR, DEFAULT_SUBSTRATE_THICKNESS,
    DEFAULT_TRACE_THICKNESS, DEFAULT_TRACE_WIDTH, GRAMS_PER_KILOGRAM,
};
use sensorkit_core::{um2_to_m2, um_to_m, GeometryError};

use crate::model::Point;

/// Overall device outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceGeometry {
    /// Device width in µm
    pub width: f64,
    /// Device height in µm
    pub height: f64,
}

impl Default for DeviceGeometry {
    fn default() -> Self {
        Self {
            width: 10_000.0,
            height: 10_000.0,
        }
    }
}

impl DeviceGeometry {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Geometric center used as the moment reference point
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Bounding area of the device in µm²
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Conductor settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceParameters {
    /// Fixed conductor width in µm
    pub trace_width: f64,
    /// Terminate straight traces with a round cap
    pub end_caps: bool,
}

impl Default for TraceParameters {
    fn default() -> Self {
        Self {
            trace_width: DEFAULT_TRACE_WIDTH,
            end_caps: true,
        }
    }
}

/// Physical stack-up used for mass and moment calculations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialProperties {
    /// Conductor layer thickness in µm
    pub trace_thickness: f64,
    /// Substrate thickness in µm
    pub substrate_thickness: f64,
    /// Conductor density in kg/m³
    pub density_kg_per_m3: f64,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self {
            trace_thickness: DEFAULT_TRACE_THICKNESS,
            substrate_thickness: DEFAULT_SUBSTRATE_THICKNESS,
            density_kg_per_m3: COPPER_DENSITY,
        }
    }
}

impl MaterialProperties {
    /// Mass in grams of a conductor patch of `area_um2`
    pub fn mass_grams(&self, area_um2: f64) -> f64 {
        um2_to_m2(area_um2) * um_to_m(self.trace_thickness) * self.density_kg_per_m3
            * GRAMS_PER_KILOGRAM
    }

    /// Distance in metres from the substrate mid-plane to the conductor mid-plane
    pub fn z_offset_m(&self) -> f64 {
        um_to_m(self.substrate_thickness / 2.0 + self.trace_thickness / 2.0)
    }
}

/// Detector comb parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParameters {
    /// Comb width in µm
    pub width: f64,
    /// Comb height in µm
    pub height: f64,
    /// Gap between adjacent vertical traces in µm
    pub spacing: f64,
    /// Conductor width inside the comb; falls back to the global trace width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_width: Option<f64>,
    /// Scaling literal applied to the horizontal link count
    pub horizontal_pair_divisor: f64,
}

impl Default for DetectorParameters {
    fn default() -> Self {
        Self {
            width: 7_300.0,
            height: 7_300.0,
            spacing: 100.0,
            trace_width: None,
            horizontal_pair_divisor: DEFAULT_HORIZONTAL_PAIR_DIVISOR,
        }
    }
}

/// Display-only switches for the render pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Draw the first pin label over each pin
    pub show_labels: bool,
    /// Draw a highlight rectangle behind the detector
    pub highlight_detector: bool,
    /// Side of the square drawn in place of a malformed diagonal, in µm
    pub error_marker_size: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_labels: true,
            highlight_detector: false,
            error_marker_size: 150.0,
        }
    }
}

/// Everything a generation run needs besides the layout itself
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignParameters {
    pub device: DeviceGeometry,
    pub trace: TraceParameters,
    pub material: MaterialProperties,
    pub detector: DetectorParameters,
    pub render: RenderOptions,
}

impl DesignParameters {
    /// Effective conductor width of the detector comb
    pub fn detector_trace_width(&self) -> f64 {
        self.detector.trace_width.unwrap_or(self.trace.trace_width)
    }

    /// Check that every dimension used as a divisor or size is usable
    pub fn validate(&self) -> Result<(), GeometryError> {
        positive("device.width", self.device.width)?;
        positive("device.height", self.device.height)?;
        positive("trace.trace_width", self.trace.trace_width)?;
        positive("material.trace_thickness", self.material.trace_thickness)?;
        positive("material.density_kg_per_m3", self.material.density_kg_per_m3)?;
        non_negative(
            "material.substrate_thickness",
            self.material.substrate_thickness,
        )?;
        positive("detector.width", self.detector.width)?;
        positive("detector.height", self.detector.height)?;
        positive("detector.spacing", self.detector.spacing)?;
        positive("detector.trace_width", self.detector_trace_width())?;
        positive(
            "detector.horizontal_pair_divisor",
            self.detector.horizontal_pair_divisor,
        )?;
        non_negative("render.error_marker_size", self.render.error_marker_size)?;
        Ok(())
    }
}

pub(crate) fn finite(name: &str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite {
            name: name.to_string(),
        })
    }
}

pub(crate) fn positive(name: &str, value: f64) -> Result<(), GeometryError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::NonPositive {
            name: name.to_string(),
            value,
        })
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), GeometryError> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(GeometryError::NonPositive {
            name: name.to_string(),
            value,
        })
    }
}
