use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;
use std::fmt;

use sensorkit_core::constants::DIAGONAL_SPAN_TOLERANCE;

use crate::canvas::{FillStyle, Primitive};
use crate::params::DesignParameters;

use super::{AreaContribution, DeviceFeature, Feature, FeatureId, FeatureType, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Vertical,
    Horizontal,
    /// 45° segment rising to the right
    DiagonalUp,
    /// 45° segment falling to the right
    DiagonalDown,
}

impl TraceKind {
    pub fn is_diagonal(self) -> bool {
        matches!(self, Self::DiagonalUp | Self::DiagonalDown)
    }

    /// Rotation applied to a diagonal segment (y axis points down)
    pub fn angle_deg(self) -> f64 {
        match self {
            Self::DiagonalUp => -45.0,
            Self::DiagonalDown => 45.0,
            Self::Vertical | Self::Horizontal => 0.0,
        }
    }
}

impl fmt::Display for TraceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => write!(f, "vertical"),
            Self::Horizontal => write!(f, "horizontal"),
            Self::DiagonalUp => write!(f, "diagonal-up"),
            Self::DiagonalDown => write!(f, "diagonal-down"),
        }
    }
}

/// Finite-width conductor segment
///
/// The `(width, height)` pair is read per kind:
/// - vertical: `height` is the absolute end Y, `width` is unused
/// - horizontal: `width` is the absolute end X, `height` offsets the end Y
/// - diagonal: `(width, height)` is the absolute end point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub start: Point,
    pub width: f64,
    pub height: f64,
    pub kind: TraceKind,
    pub trace_width: f64,
    pub previous: Option<FeatureId>,
    end: Point,
}

impl Trace {
    pub fn new(start: Point, width: f64, height: f64, kind: TraceKind, trace_width: f64) -> Self {
        let end = derive_end(start, width, height, kind, trace_width);
        Self {
            start,
            width,
            height,
            kind,
            trace_width,
            previous: None,
            end,
        }
    }

    pub fn vertical(start: Point, end_y: f64, trace_width: f64) -> Self {
        Self::new(start, 0.0, end_y, TraceKind::Vertical, trace_width)
    }

    pub fn horizontal(start: Point, end_x: f64, trace_width: f64) -> Self {
        Self::new(start, end_x, trace_width, TraceKind::Horizontal, trace_width)
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Horizontal and vertical extent of a diagonal, `(dw, dh)`
    pub fn diagonal_spans(&self) -> (f64, f64) {
        (self.width - self.start.x, self.height - self.start.y)
    }

    /// Length along the trace's long axis
    pub fn span(&self) -> f64 {
        match self.kind {
            TraceKind::Vertical => (self.end.y - self.start.y).abs(),
            TraceKind::Horizontal => (self.end.x - self.start.x).abs(),
            TraceKind::DiagonalUp | TraceKind::DiagonalDown => self.diagonal_spans().0.abs(),
        }
    }

    /// Whether a diagonal covers equal horizontal and vertical distance
    pub fn is_true_diagonal(&self) -> bool {
        let (dw, dh) = self.diagonal_spans();
        (dw.abs() - dh.abs()).abs() <= DIAGONAL_SPAN_TOLERANCE
    }

    /// Drawn length of a diagonal segment
    pub fn diagonal_length(&self) -> f64 {
        self.diagonal_spans().1.abs() * SQRT_2
    }

    fn straight_area(&self, previous: Option<&Feature>) -> AreaContribution {
        let raw = self.trace_width * self.span();
        let overlap = match previous {
            None => return AreaContribution::Unlinked,
            // The trace starts at the pad center, so a radius worth of it is inside the pad
            Some(Feature::Pin(pin)) => self.trace_width * pin.radius(),
            // Consecutive traces are drawn overlapping at the joint
            Some(_) => self.trace_width / 2.0,
        };
        AreaContribution::Registered((raw - overlap).max(0.0))
    }

    fn straight_primitives(&self, end_caps: bool) -> Vec<Primitive> {
        let tw = self.trace_width;
        let half = tw / 2.0;
        let span = self.span();
        let (s, e) = (self.start, self.end);

        if !end_caps {
            let rect = match self.kind {
                TraceKind::Vertical => Primitive::Rect {
                    origin: Point::new(s.x, s.y.min(e.y)),
                    width: tw,
                    height: span,
                    style: FillStyle::Conductor,
                },
                _ => Primitive::Rect {
                    origin: Point::new(s.x.min(e.x), s.y),
                    width: span,
                    height: tw,
                    style: FillStyle::Conductor,
                },
            };
            return vec![rect];
        }

        // Shorten the body by half a width so the cap closes it off
        let body = (span - half).max(0.0);
        let (origin, width, height, cap) = match self.kind {
            TraceKind::Vertical => {
                if e.y >= s.y {
                    (s, tw, body, Point::new(s.x + half, e.y - half))
                } else {
                    (
                        Point::new(s.x, e.y + half),
                        tw,
                        body,
                        Point::new(s.x + half, e.y + half),
                    )
                }
            }
            _ => {
                if e.x >= s.x {
                    (s, body, tw, Point::new(e.x - half, s.y + half))
                } else {
                    (
                        Point::new(e.x + half, s.y),
                        body,
                        tw,
                        Point::new(e.x + half, s.y + half),
                    )
                }
            }
        };

        vec![
            Primitive::Rect {
                origin,
                width,
                height,
                style: FillStyle::Conductor,
            },
            Primitive::Disk {
                center: cap,
                diameter: tw,
                style: FillStyle::Conductor,
            },
        ]
    }

    fn diagonal_primitives(&self, params: &DesignParameters) -> Vec<Primitive> {
        if !self.is_true_diagonal() {
            let size = params.render.error_marker_size;
            return vec![Primitive::Rect {
                origin: Point::new(self.start.x - size / 2.0, self.start.y - size / 2.0),
                width: size,
                height: size,
                style: FillStyle::Error,
            }];
        }

        let pivot = self.start.midpoint(&self.end);
        let angle = self.kind.angle_deg();
        let length = self.diagonal_length();
        let mut out = vec![Primitive::RotatedRect {
            pivot,
            angle_deg: angle,
            length,
            width: self.trace_width,
            style: FillStyle::Conductor,
        }];

        if params.trace.end_caps {
            let (dw, _) = self.diagonal_spans();
            out.push(Primitive::Disk {
                center: pivot.offset_rotated(dw.signum() * length / 2.0, 0.0, angle),
                diameter: self.trace_width,
                style: FillStyle::Conductor,
            });
        }
        out
    }
}

fn derive_end(start: Point, width: f64, height: f64, kind: TraceKind, trace_width: f64) -> Point {
    match kind {
        TraceKind::Vertical => Point::new(start.x + trace_width, start.y + (height - start.y)),
        TraceKind::Horizontal => Point::new(start.x + (width - start.x), start.y + height),
        TraceKind::DiagonalUp | TraceKind::DiagonalDown => {
            Point::new(start.x + (width - start.x), start.y + (height - start.y))
        }
    }
}

impl DeviceFeature for Trace {
    fn feature_type(&self) -> FeatureType {
        FeatureType::Trace
    }

    fn previous(&self) -> Option<FeatureId> {
        self.previous
    }

    fn set_previous(&mut self, previous: Option<FeatureId>) {
        self.previous = previous;
    }

    fn center(&self, _params: &DesignParameters) -> Point {
        self.start.midpoint(&self.end)
    }

    fn area_contribution(
        &self,
        previous: Option<&Feature>,
        _params: &DesignParameters,
    ) -> AreaContribution {
        if self.kind.is_diagonal() {
            let (dw, dh) = self.diagonal_spans();
            if self.is_true_diagonal() {
                AreaContribution::Registered(dw.abs() * dh.abs())
            } else {
                AreaContribution::MalformedDiagonal { dw, dh }
            }
        } else {
            self.straight_area(previous)
        }
    }

    fn primitives(&self, params: &DesignParameters) -> Vec<Primitive> {
        if self.kind.is_diagonal() {
            self.diagonal_primitives(params)
        } else {
            self.straight_primitives(params.trace.end_caps)
        }
    }
}
