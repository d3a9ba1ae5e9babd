//! Device generation run.
//!
//! A run walks a built [`Layout`] twice. The construction pass registers the
//! area of every pin and trace in feature order. The render pass then draws
//! each feature, appends its SVG fragment, registers its mass and moments and
//! reports its area. The detector registers its aggregate area during the
//! render pass, since its internal traces only exist while it is drawn.

use chrono::Utc;
use tracing::{debug, info, warn};

use sensorkit_core::Result;

use crate::accumulator::{MassContribution, PhysicalAccumulator};
use crate::canvas::Canvas;
use crate::layout::Layout;
use crate::model::{AreaContribution, DeviceFeature, Feature, FeatureId};
use crate::params::DesignParameters;
use crate::report::{Diagnostic, DiagnosticKind, FeatureReport, GenerationReport};
use crate::svg::SvgDocument;

/// Everything one run produces
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    pub svg: SvgDocument,
    pub report: GenerationReport,
    pub accumulator: PhysicalAccumulator,
}

/// Generates the geometry and physical properties of one device
pub struct DeviceGenerator {
    params: DesignParameters,
    name: String,
}

impl DeviceGenerator {
    pub fn new(params: DesignParameters) -> Self {
        Self {
            params,
            name: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn params(&self) -> &DesignParameters {
        &self.params
    }

    /// Run both passes over `layout`, drawing onto `canvas`
    ///
    /// Each call starts from a fresh accumulator, so repeated runs over the
    /// same layout produce identical totals.
    pub fn generate(&self, layout: &Layout, canvas: &mut dyn Canvas) -> Result<GenerationOutput> {
        self.params.validate()?;

        let mut accumulator = PhysicalAccumulator::new();
        let mut diagnostics = Vec::new();

        debug!("Construction pass over {} features", layout.len());
        let areas = self.construction_pass(layout, &mut accumulator, &mut diagnostics)?;

        debug!("Render pass over {} features", layout.len());
        let mut svg = SvgDocument::new(&self.params.device);
        let features = self.render_pass(layout, &areas, &mut accumulator, canvas, &mut svg)?;

        let summary = accumulator.summary(&self.params.device);
        info!(
            "Generated {} features, total area {:e} m^2, mass {:e} g",
            features.len(),
            summary.total_area_m2,
            summary.mass_g
        );

        Ok(GenerationOutput {
            svg,
            report: GenerationReport {
                generated_at: Utc::now(),
                device_name: self.name.clone(),
                features,
                diagnostics,
                summary,
            },
            accumulator,
        })
    }

    /// Register pin and trace areas; returns each feature's area
    fn construction_pass(
        &self,
        layout: &Layout,
        accumulator: &mut PhysicalAccumulator,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<f64>> {
        let mut areas = Vec::with_capacity(layout.len());

        for (id, feature) in layout.iter() {
            let contribution = feature.area_contribution(layout.previous_of(id), &self.params);
            match contribution {
                AreaContribution::Registered(area) => accumulator.register_area(id, area)?,
                AreaContribution::Unlinked => {
                    debug!("Feature {} has no previous feature; area not registered", id)
                }
                AreaContribution::MalformedDiagonal { dw, dh } => {
                    let diagnostic = Diagnostic {
                        feature: id,
                        kind: DiagnosticKind::MalformedDiagonal { dw, dh },
                    };
                    warn!("{}", diagnostic);
                    diagnostics.push(diagnostic);
                }
                AreaContribution::Deferred => {}
            }
            areas.push(contribution.value());
        }

        Ok(areas)
    }

    fn render_pass(
        &self,
        layout: &Layout,
        areas: &[f64],
        accumulator: &mut PhysicalAccumulator,
        canvas: &mut dyn Canvas,
        svg: &mut SvgDocument,
    ) -> Result<Vec<FeatureReport>> {
        let mut reports = Vec::with_capacity(layout.len());

        for (id, feature) in layout.iter() {
            for primitive in feature.primitives(&self.params) {
                primitive.draw(canvas);
            }
            svg.push_fragment(&feature.svg_fragment(&self.params));

            let area = match feature {
                Feature::Detector(detector) => {
                    let aggregate = detector.aggregate_area();
                    accumulator.register_detector_area(id, aggregate)?;
                    aggregate
                }
                _ => areas.get(id.index()).copied().unwrap_or_default(),
            };

            let report = self.register_mass(id, feature, area, accumulator, layout)?;
            info!("{}", report);
            reports.push(report);
        }

        Ok(reports)
    }

    fn register_mass(
        &self,
        id: FeatureId,
        feature: &Feature,
        area: f64,
        accumulator: &mut PhysicalAccumulator,
        layout: &Layout,
    ) -> Result<FeatureReport> {
        let contribution = MassContribution::compute(
            area,
            feature.center(&self.params),
            &self.params.device,
            &self.params.material,
        );
        accumulator.register_mass(id, contribution)?;

        Ok(FeatureReport {
            id,
            name: layout.name_of(id).map(str::to_string),
            description: feature.describe(),
            area_um2: area,
            mass_g: contribution.mass,
        })
    }
}
