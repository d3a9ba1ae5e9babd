//! Render sink abstraction.
//!
//! Features describe their drawing as a list of [`Primitive`]s. The render
//! pass replays them onto any [`Canvas`]; the SVG writer formats the
//! conductor primitives directly.

use serde::{Deserialize, Serialize};

use sensorkit_core::format_mm;

use crate::model::Point;

/// Fill role of a primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStyle {
    /// Conductive material
    Conductor,
    /// Display-only highlight behind the detector
    Highlight,
    /// Marker drawn in place of a malformed feature
    Error,
}

/// One drawing operation in device coordinates (µm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Disk {
        center: Point,
        diameter: f64,
        style: FillStyle,
    },
    /// Axis-aligned rectangle anchored at its top-left corner
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        style: FillStyle,
    },
    /// Rectangle centered on `pivot`, its long axis rotated by `angle_deg`
    RotatedRect {
        pivot: Point,
        angle_deg: f64,
        length: f64,
        width: f64,
        style: FillStyle,
    },
    /// Text centered on a point
    Label { center: Point, text: String },
}

impl Primitive {
    pub fn style(&self) -> Option<FillStyle> {
        match self {
            Primitive::Disk { style, .. }
            | Primitive::Rect { style, .. }
            | Primitive::RotatedRect { style, .. } => Some(*style),
            Primitive::Label { .. } => None,
        }
    }

    /// Whether the primitive describes conductive material
    pub fn is_conductor(&self) -> bool {
        self.style() == Some(FillStyle::Conductor)
    }

    /// Replay this primitive onto a canvas
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self {
            Primitive::Disk {
                center,
                diameter,
                style,
            } => canvas.fill_disk(*center, *diameter, *style),
            Primitive::Rect {
                origin,
                width,
                height,
                style,
            } => canvas.fill_rect(*origin, *width, *height, *style),
            Primitive::RotatedRect {
                pivot,
                angle_deg,
                length,
                width,
                style,
            } => canvas.fill_rotated_rect(*pivot, *angle_deg, *length, *width, *style),
            Primitive::Label { center, text } => canvas.text(*center, text),
        }
    }

    /// SVG element with coordinates converted to millimetres
    pub fn to_svg(&self) -> String {
        match self {
            Primitive::Disk {
                center, diameter, ..
            } => format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"/>\n",
                format_mm(center.x),
                format_mm(center.y),
                format_mm(diameter / 2.0)
            ),
            Primitive::Rect {
                origin,
                width,
                height,
                ..
            } => format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>\n",
                format_mm(origin.x),
                format_mm(origin.y),
                format_mm(*width),
                format_mm(*height)
            ),
            Primitive::RotatedRect {
                pivot,
                angle_deg,
                length,
                width,
                ..
            } => format!(
                concat!(
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" ",
                    "transform=\"translate({} {}) rotate({:.3})\"/>\n"
                ),
                format_mm(-length / 2.0),
                format_mm(-width / 2.0),
                format_mm(*length),
                format_mm(*width),
                format_mm(pivot.x),
                format_mm(pivot.y),
                angle_deg
            ),
            Primitive::Label { center, text } => format!(
                concat!(
                    "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" ",
                    "dominant-baseline=\"middle\">{}</text>\n"
                ),
                format_mm(center.x),
                format_mm(center.y),
                escape_xml(text)
            ),
        }
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Drawing surface driven by the render pass
pub trait Canvas {
    fn fill_disk(&mut self, center: Point, diameter: f64, style: FillStyle);

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, style: FillStyle);

    fn fill_rotated_rect(
        &mut self,
        pivot: Point,
        angle_deg: f64,
        length: f64,
        width: f64,
        style: FillStyle,
    );

    fn text(&mut self, center: Point, label: &str);
}

/// Canvas that keeps every primitive it receives
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    primitives: Vec<Primitive>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn count_style(&self, style: FillStyle) -> usize {
        self.primitives
            .iter()
            .filter(|p| p.style() == Some(style))
            .count()
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn fill_disk(&mut self, center: Point, diameter: f64, style: FillStyle) {
        self.primitives.push(Primitive::Disk {
            center,
            diameter,
            style,
        });
    }

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, style: FillStyle) {
        self.primitives.push(Primitive::Rect {
            origin,
            width,
            height,
            style,
        });
    }

    fn fill_rotated_rect(
        &mut self,
        pivot: Point,
        angle_deg: f64,
        length: f64,
        width: f64,
        style: FillStyle,
    ) {
        self.primitives.push(Primitive::RotatedRect {
            pivot,
            angle_deg,
            length,
            width,
            style,
        });
    }

    fn text(&mut self, center: Point, label: &str) {
        self.primitives.push(Primitive::Label {
            center,
            text: label.to_string(),
        });
    }
}
