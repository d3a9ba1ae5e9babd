//! Device feature model.
//!
//! A device is an ordered list of [`Feature`]s. Each feature knows its own
//! area, produces drawing [`Primitive`]s, and serializes to an SVG fragment.
//! Adjacent features are linked through a [`FeatureId`] back-reference that
//! only drives the overlap correction of trace areas.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::canvas::Primitive;
use crate::params::DesignParameters;

mod detector;
mod pin;
mod trace;

pub use detector::Detector;
pub use pin::Pin;
pub use trace::{Trace, TraceKind};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Rotate `(dx, dy)` by `angle_deg` and offset this point by the result
    pub fn offset_rotated(&self, dx: f64, dy: f64, angle_deg: f64) -> Point {
        let (sin_a, cos_a) = angle_deg.to_radians().sin_cos();
        Point::new(
            self.x + dx * cos_a - dy * sin_a,
            self.y + dx * sin_a + dy * cos_a,
        )
    }
}

/// Index of a feature inside its layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureId(pub usize);

impl FeatureId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    Pin,
    Trace,
    Detector,
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pin => write!(f, "pin"),
            Self::Trace => write!(f, "trace"),
            Self::Detector => write!(f, "detector"),
        }
    }
}

/// Area a feature contributes during the construction pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AreaContribution {
    /// Register this many µm²
    Registered(f64),
    /// Straight trace without a previous feature: nothing is registered
    Unlinked,
    /// Diagonal trace whose spans differ: contributes zero
    MalformedDiagonal { dw: f64, dh: f64 },
    /// Detector comb: registers its aggregate area during rendering
    Deferred,
}

impl AreaContribution {
    /// The value that ends up in the feature's `area` field
    pub fn value(&self) -> f64 {
        match self {
            Self::Registered(area) => *area,
            _ => 0.0,
        }
    }
}

/// Common behaviour of every feature kind
pub trait DeviceFeature {
    fn feature_type(&self) -> FeatureType;

    /// Stored back-reference to the adjacent prior feature
    fn previous(&self) -> Option<FeatureId>;

    fn set_previous(&mut self, previous: Option<FeatureId>);

    /// Reference point for moment calculations
    fn center(&self, params: &DesignParameters) -> Point;

    /// Area registered during the construction pass; `previous` is the
    /// resolved back-reference
    fn area_contribution(
        &self,
        previous: Option<&Feature>,
        params: &DesignParameters,
    ) -> AreaContribution;

    /// Drawing primitives for the render pass
    fn primitives(&self, params: &DesignParameters) -> Vec<Primitive>;

    /// SVG fragment in millimetres; empty when the feature has no conductor
    fn svg_fragment(&self, params: &DesignParameters) -> String {
        self.primitives(params)
            .iter()
            .filter(|p| p.is_conductor())
            .map(Primitive::to_svg)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Feature {
    Pin(Pin),
    Trace(Trace),
    Detector(Detector),
}

impl Feature {
    /// Radius of the pad when this feature is a pin
    pub fn pin_radius(&self) -> Option<f64> {
        match self {
            Feature::Pin(p) => Some(p.radius()),
            _ => None,
        }
    }

    /// Short description used in area reports
    pub fn describe(&self) -> String {
        match self {
            Feature::Pin(p) => match p.label() {
                Some(label) => format!("pin {}", label),
                None => "pin".to_string(),
            },
            Feature::Trace(t) => format!("{} trace", t.kind),
            Feature::Detector(_) => "detector".to_string(),
        }
    }
}

impl DeviceFeature for Feature {
    fn feature_type(&self) -> FeatureType {
        match self {
            Feature::Pin(s) => s.feature_type(),
            Feature::Trace(s) => s.feature_type(),
            Feature::Detector(s) => s.feature_type(),
        }
    }

    fn previous(&self) -> Option<FeatureId> {
        match self {
            Feature::Pin(s) => s.previous(),
            Feature::Trace(s) => s.previous(),
            Feature::Detector(s) => s.previous(),
        }
    }

    fn set_previous(&mut self, previous: Option<FeatureId>) {
        match self {
            Feature::Pin(s) => s.set_previous(previous),
            Feature::Trace(s) => s.set_previous(previous),
            Feature::Detector(s) => s.set_previous(previous),
        }
    }

    fn center(&self, params: &DesignParameters) -> Point {
        match self {
            Feature::Pin(s) => s.center(params),
            Feature::Trace(s) => s.center(params),
            Feature::Detector(s) => s.center(params),
        }
    }

    fn area_contribution(
        &self,
        previous: Option<&Feature>,
        params: &DesignParameters,
    ) -> AreaContribution {
        match self {
            Feature::Pin(s) => s.area_contribution(previous, params),
            Feature::Trace(s) => s.area_contribution(previous, params),
            Feature::Detector(s) => s.area_contribution(previous, params),
        }
    }

    fn primitives(&self, params: &DesignParameters) -> Vec<Primitive> {
        match self {
            Feature::Pin(s) => s.primitives(params),
            Feature::Trace(s) => s.primitives(params),
            Feature::Detector(s) => s.primitives(params),
        }
    }

    fn svg_fragment(&self, params: &DesignParameters) -> String {
        match self {
            Feature::Pin(s) => s.svg_fragment(params),
            Feature::Trace(s) => s.svg_fragment(params),
            Feature::Detector(s) => s.svg_fragment(params),
        }
    }
}
