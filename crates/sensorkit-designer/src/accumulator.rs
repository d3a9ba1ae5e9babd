//! Physical property accumulation for one generation run.
//!
//! The accumulator is created fresh for each run and only ever grows. It
//! remembers which features already contributed so a feature can register
//! its area and its mass at most once.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use sensorkit_core::{um2_to_m2, um2_to_mm2, um_to_m, AccumulatorError};

use crate::model::{FeatureId, Point};
use crate::params::{DeviceGeometry, MaterialProperties};

/// Mass and per-axis moment of a single feature
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MassContribution {
    /// Grams
    pub mass: f64,
    /// Gram-metres about the device center, per axis
    pub moment_x: f64,
    pub moment_y: f64,
    pub moment_z: f64,
}

impl MassContribution {
    /// Mass of `area_um2` of conductor centered at `center`
    pub fn compute(
        area_um2: f64,
        center: Point,
        device: &DeviceGeometry,
        material: &MaterialProperties,
    ) -> Self {
        let mass = material.mass_grams(area_um2);
        let reference = device.center();
        let dx = um_to_m((center.x - reference.x).abs());
        let dy = um_to_m((center.y - reference.y).abs());
        let dz = material.z_offset_m();
        Self {
            mass,
            moment_x: dx * mass,
            moment_y: dy * mass,
            moment_z: dz * mass,
        }
    }
}

/// Center offset resolved per axis, in metres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisOffsets {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PhysicalAccumulator {
    /// Occupied conductor area in µm²
    pub total_area: f64,
    /// Detector subset of `total_area` in µm²
    pub detector_trace_area: f64,
    /// Grams
    pub overall_mass: f64,
    pub moment_x: f64,
    pub moment_y: f64,
    pub moment_z: f64,
    area_registered: HashSet<FeatureId>,
    mass_registered: HashSet<FeatureId>,
}

impl PhysicalAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature's area to the total
    pub fn register_area(&mut self, feature: FeatureId, area: f64) -> Result<(), AccumulatorError> {
        if !self.area_registered.insert(feature) {
            return Err(AccumulatorError::AreaAlreadyRegistered {
                feature: feature.index(),
            });
        }
        self.total_area += area;
        Ok(())
    }

    /// Add a detector aggregate to both the detector subset and the total
    pub fn register_detector_area(
        &mut self,
        feature: FeatureId,
        area: f64,
    ) -> Result<(), AccumulatorError> {
        self.register_area(feature, area)?;
        self.detector_trace_area += area;
        Ok(())
    }

    /// Add a feature's mass and moments
    pub fn register_mass(
        &mut self,
        feature: FeatureId,
        contribution: MassContribution,
    ) -> Result<(), AccumulatorError> {
        if !self.mass_registered.insert(feature) {
            return Err(AccumulatorError::MassAlreadyRegistered {
                feature: feature.index(),
            });
        }
        self.overall_mass += contribution.mass;
        self.moment_x += contribution.moment_x;
        self.moment_y += contribution.moment_y;
        self.moment_z += contribution.moment_z;
        Ok(())
    }

    pub fn has_area(&self, feature: FeatureId) -> bool {
        self.area_registered.contains(&feature)
    }

    pub fn moment_sum(&self) -> f64 {
        self.moment_x + self.moment_y + self.moment_z
    }

    /// `(Mx + My + Mz) / mass`, the single combined offset figure
    ///
    /// Summing moments across axes is not a center of mass; see
    /// [`Self::center_offset`] for the per-axis figure.
    pub fn legacy_center_offset(&self) -> Option<f64> {
        if self.overall_mass > 0.0 {
            Some(self.moment_sum() / self.overall_mass)
        } else {
            None
        }
    }

    /// Per-axis mean distance from the device center
    pub fn center_offset(&self) -> Option<AxisOffsets> {
        if self.overall_mass > 0.0 {
            Some(AxisOffsets {
                x: self.moment_x / self.overall_mass,
                y: self.moment_y / self.overall_mass,
                z: self.moment_z / self.overall_mass,
            })
        } else {
            None
        }
    }

    /// Snapshot of the totals in reporting units
    pub fn summary(&self, device: &DeviceGeometry) -> PhysicalSummary {
        PhysicalSummary {
            total_area_m2: um2_to_m2(self.total_area),
            detector_area_m2: um2_to_m2(self.detector_trace_area),
            detector_area_mm2: um2_to_mm2(self.detector_trace_area),
            device_area_m2: um2_to_m2(device.area()),
            moment_x: self.moment_x,
            moment_y: self.moment_y,
            moment_z: self.moment_z,
            moment_sum: self.moment_sum(),
            mass_g: self.overall_mass,
            legacy_center_offset: self.legacy_center_offset(),
            center_offset: self.center_offset(),
        }
    }
}

/// End-of-run totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSummary {
    pub total_area_m2: f64,
    pub detector_area_m2: f64,
    pub detector_area_mm2: f64,
    pub device_area_m2: f64,
    pub moment_x: f64,
    pub moment_y: f64,
    pub moment_z: f64,
    pub moment_sum: f64,
    pub mass_g: f64,
    /// `None` when the device has no mass
    pub legacy_center_offset: Option<f64>,
    pub center_offset: Option<AxisOffsets>,
}
