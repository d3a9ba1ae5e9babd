use serde::{Deserialize, Serialize};

use crate::canvas::{FillStyle, Primitive};
use sensorkit_core::GeometryError;

use crate::params::{positive, DesignParameters, DetectorParameters};

use super::{AreaContribution, DeviceFeature, Feature, FeatureId, FeatureType, Point, Trace};

/// Serpentine comb of vertical traces joined by horizontal links
///
/// The comb's internal traces are synthesized at render time and never
/// appear in the layout. Its area is a closed-form aggregate registered once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detector {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub spacing: f64,
    pub trace_width: f64,
    pub horizontal_pair_divisor: f64,
    pub previous: Option<FeatureId>,
}

impl Detector {
    pub fn new(origin: Point, params: &DetectorParameters, trace_width: f64) -> Self {
        Self {
            origin,
            width: params.width,
            height: params.height,
            spacing: params.spacing,
            trace_width,
            horizontal_pair_divisor: params.horizontal_pair_divisor,
            previous: None,
        }
    }

    /// Detector configured from the run parameters
    pub fn from_params(origin: Point, params: &DesignParameters) -> Self {
        Self::new(origin, &params.detector, params.detector_trace_width())
    }

    /// Comb dimensions must be positive for the counts below to be finite
    pub fn validate(&self) -> Result<(), GeometryError> {
        positive("detector.width", self.width)?;
        positive("detector.height", self.height)?;
        positive("detector.spacing", self.spacing)?;
        positive("detector.trace_width", self.trace_width)?;
        positive(
            "detector.horizontal_pair_divisor",
            self.horizontal_pair_divisor,
        )
    }

    /// `ceil((width / spacing) / 2)`
    pub fn vertical_count(&self) -> usize {
        ((self.width / self.spacing) / 2.0).ceil().max(0.0) as usize
    }

    /// `floor((width / 2) / 2) / divisor`; may be fractional
    pub fn horizontal_pair_count(&self) -> f64 {
        ((self.width / 2.0) / 2.0).floor() / self.horizontal_pair_divisor
    }

    /// Number of link pairs actually drawn: every integer below the pair count
    pub fn horizontal_pair_iterations(&self) -> usize {
        self.horizontal_pair_count().ceil().max(0.0) as usize
    }

    /// Distance between the left edges of neighbouring vertical traces
    pub fn pitch(&self) -> f64 {
        self.spacing + self.trace_width
    }

    /// Closed-form conductor area of the comb in µm²
    pub fn aggregate_area(&self) -> f64 {
        let verticals = self.vertical_count() as f64;
        let pairs = self.horizontal_pair_count();
        verticals * (self.trace_width * self.height)
            + (pairs * 2.0) * (self.spacing * self.trace_width)
            - verticals * (self.trace_width * 2.0)
    }

    /// Horizontal links, two per pair, alternating top and bottom rows
    pub fn link_traces(&self) -> Vec<Trace> {
        let tw = self.trace_width;
        let pitch = self.pitch();
        let top = self.origin.y;
        let bottom = self.origin.y + self.height - tw;
        let mut cursor = self.origin.x;
        let mut links = Vec::with_capacity(self.horizontal_pair_iterations() * 2);

        for _ in 0..self.horizontal_pair_iterations() {
            // Even verticals end on the top row, odd ones on the bottom row
            for row in [top, bottom] {
                links.push(Trace::horizontal(
                    Point::new(cursor, row),
                    cursor + pitch + tw,
                    tw,
                ));
                cursor += pitch;
            }
        }
        links
    }

    /// Vertical comb teeth; even indices run bottom to top, odd ones top to bottom
    pub fn vertical_traces(&self) -> Vec<Trace> {
        let top = self.origin.y;
        let bottom = self.origin.y + self.height;
        let mut cursor = self.origin.x;
        let mut teeth = Vec::with_capacity(self.vertical_count());

        for i in 0..self.vertical_count() {
            let (from, to) = if i % 2 == 0 { (bottom, top) } else { (top, bottom) };
            teeth.push(Trace::vertical(Point::new(cursor, from), to, self.trace_width));
            cursor += self.pitch();
        }
        teeth
    }

    fn comb_primitives(&self, params: &DesignParameters) -> Vec<Primitive> {
        // Internal traces never carry end caps; the caller's options are left untouched
        let mut comb = *params;
        comb.trace.end_caps = false;

        self.link_traces()
            .iter()
            .chain(self.vertical_traces().iter())
            .flat_map(|t| t.primitives(&comb))
            .collect()
    }
}

impl DeviceFeature for Detector {
    fn feature_type(&self) -> FeatureType {
        FeatureType::Detector
    }

    fn previous(&self) -> Option<FeatureId> {
        self.previous
    }

    fn set_previous(&mut self, previous: Option<FeatureId>) {
        self.previous = previous;
    }

    fn center(&self, _params: &DesignParameters) -> Point {
        Point::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }

    fn area_contribution(
        &self,
        _previous: Option<&Feature>,
        _params: &DesignParameters,
    ) -> AreaContribution {
        AreaContribution::Deferred
    }

    fn primitives(&self, params: &DesignParameters) -> Vec<Primitive> {
        let mut out = Vec::new();
        if params.render.highlight_detector {
            out.push(Primitive::Rect {
                origin: self.origin,
                width: self.width,
                height: self.height,
                style: FillStyle::Highlight,
            });
        }
        out.extend(self.comb_primitives(params));
        out
    }

    fn svg_fragment(&self, params: &DesignParameters) -> String {
        let body: String = self
            .comb_primitives(params)
            .iter()
            .filter(|p| p.is_conductor())
            .map(Primitive::to_svg)
            .collect();
        format!("<g id=\"detector\">\n{}</g>\n", body)
    }
}
