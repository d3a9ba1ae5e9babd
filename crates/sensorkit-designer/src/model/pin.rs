use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::canvas::{FillStyle, Primitive};
use crate::params::DesignParameters;

use super::{AreaContribution, DeviceFeature, Feature, FeatureId, FeatureType, Point};

/// Circular contact pad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub position: Point,
    pub diameter: f64,
    /// Only the first label is drawn
    pub labels: Vec<String>,
    pub previous: Option<FeatureId>,
}

impl Pin {
    pub fn new(position: Point, diameter: f64) -> Self {
        Self {
            position,
            diameter,
            labels: Vec::new(),
            previous: None,
        }
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// π·r²
    pub fn area(&self) -> f64 {
        let r = self.radius();
        PI * r * r
    }

    /// First label, if present and non-empty
    pub fn label(&self) -> Option<&str> {
        self.labels
            .first()
            .map(String::as_str)
            .filter(|l| !l.is_empty())
    }
}

impl DeviceFeature for Pin {
    fn feature_type(&self) -> FeatureType {
        FeatureType::Pin
    }

    fn previous(&self) -> Option<FeatureId> {
        self.previous
    }

    fn set_previous(&mut self, previous: Option<FeatureId>) {
        self.previous = previous;
    }

    fn center(&self, _params: &DesignParameters) -> Point {
        self.position
    }

    fn area_contribution(
        &self,
        _previous: Option<&Feature>,
        _params: &DesignParameters,
    ) -> AreaContribution {
        AreaContribution::Registered(self.area())
    }

    fn primitives(&self, params: &DesignParameters) -> Vec<Primitive> {
        let mut out = vec![Primitive::Disk {
            center: self.position,
            diameter: self.diameter,
            style: FillStyle::Conductor,
        }];
        if params.render.show_labels {
            if let Some(label) = self.label() {
                out.push(Primitive::Label {
                    center: self.position,
                    text: label.to_string(),
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_area() {
        let pin = Pin::new(Point::new(5000.0, 5000.0), 400.0);
        assert!((pin.area() - 125_663.706_143_6).abs() < 1e-6);
        assert_eq!(
            pin.area_contribution(None, &DesignParameters::default()),
            AreaContribution::Registered(pin.area())
        );
    }

    #[test]
    fn test_only_first_label_drawn() {
        let pin = Pin::new(Point::new(0.0, 0.0), 300.0).with_labels(["GND", "ignored"]);
        let prims = pin.primitives(&DesignParameters::default());
        assert_eq!(prims.len(), 2);
        assert_eq!(
            prims[1],
            Primitive::Label {
                center: Point::new(0.0, 0.0),
                text: "GND".to_string()
            }
        );
    }

    #[test]
    fn test_empty_label_not_drawn() {
        let pin = Pin::new(Point::new(0.0, 0.0), 300.0).with_labels([""]);
        assert_eq!(pin.primitives(&DesignParameters::default()).len(), 1);

        let mut params = DesignParameters::default();
        params.render.show_labels = false;
        let labelled = Pin::new(Point::new(0.0, 0.0), 300.0).with_labels(["VCC"]);
        assert_eq!(labelled.primitives(&params).len(), 1);
    }

    #[test]
    fn test_pin_serializes_circle_only() {
        let pin = Pin::new(Point::new(1000.0, 2000.0), 500.0).with_labels(["S1"]);
        let svg = pin.svg_fragment(&DesignParameters::default());
        assert_eq!(svg, "<circle cx=\"1.000\" cy=\"2.000\" r=\"0.250\"/>\n");
    }
}
