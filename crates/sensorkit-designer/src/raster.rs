//! Raster canvas backed by tiny-skia.
//!
//! Features:
//! - Anti-aliased fills for pads and traces
//! - Device micrometres mapped to pixels by a fixed scale
//! - PNG export through the `image` crate
//!
//! Text is not rasterized; labels only appear on canvases that can draw fonts.

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use std::path::Path;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

use crate::canvas::{Canvas, FillStyle};
use crate::model::Point;
use crate::params::DeviceGeometry;

fn bg_color() -> Color {
    Color::from_rgba8(24, 36, 48, 255)
}
fn conductor_color() -> Color {
    Color::from_rgba8(214, 160, 82, 255)
}
fn highlight_color() -> Color {
    Color::from_rgba8(52, 152, 219, 96)
}
fn error_color() -> Color {
    Color::from_rgba8(231, 76, 60, 255)
}

pub struct RasterCanvas {
    pixmap: Pixmap,
    /// Pixels per micrometre
    scale: f32,
}

impl RasterCanvas {
    /// Canvas covering `device` at `pixels_per_mm`
    pub fn new(device: &DeviceGeometry, pixels_per_mm: f64) -> Result<Self> {
        let scale = pixels_per_mm / 1000.0;
        let width = (device.width * scale).ceil().max(1.0) as u32;
        let height = (device.height * scale).ceil().max(1.0) as u32;
        let mut pixmap = Pixmap::new(width, height)
            .with_context(|| format!("Cannot allocate {}x{} pixmap", width, height))?;
        pixmap.fill(bg_color());
        Ok(Self {
            pixmap,
            scale: scale as f32,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn paint(style: FillStyle) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(match style {
            FillStyle::Conductor => conductor_color(),
            FillStyle::Highlight => highlight_color(),
            FillStyle::Error => error_color(),
        });
        paint.anti_alias = true;
        paint
    }

    fn device_transform(&self) -> Transform {
        Transform::from_scale(self.scale, self.scale)
    }

    /// RGB copy of the pixmap, alpha dropped
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut img = RgbImage::new(self.width(), self.height());
        for (i, pixel) in self.pixmap.pixels().iter().enumerate() {
            let c = pixel.demultiply();
            let x = i as u32 % self.width();
            let y = i as u32 / self.width();
            img.put_pixel(x, y, Rgb([c.red(), c.green(), c.blue()]));
        }
        img
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.to_rgb_image()
            .save(path)
            .with_context(|| format!("Failed to write PNG file {}", path.display()))
    }
}

impl Canvas for RasterCanvas {
    fn fill_disk(&mut self, center: Point, diameter: f64, style: FillStyle) {
        let Some(path) =
            PathBuilder::from_circle(center.x as f32, center.y as f32, (diameter / 2.0) as f32)
        else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &Self::paint(style),
            FillRule::Winding,
            self.device_transform(),
            None,
        );
    }

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, style: FillStyle) {
        let Some(rect) =
            Rect::from_xywh(origin.x as f32, origin.y as f32, width as f32, height as f32)
        else {
            return;
        };
        self.pixmap
            .fill_rect(rect, &Self::paint(style), self.device_transform(), None);
    }

    fn fill_rotated_rect(
        &mut self,
        pivot: Point,
        angle_deg: f64,
        length: f64,
        width: f64,
        style: FillStyle,
    ) {
        let Some(rect) = Rect::from_xywh(
            (-length / 2.0) as f32,
            (-width / 2.0) as f32,
            length as f32,
            width as f32,
        ) else {
            return;
        };
        let transform = self
            .device_transform()
            .pre_translate(pivot.x as f32, pivot.y as f32)
            .pre_concat(Transform::from_rotate(angle_deg as f32));
        self.pixmap
            .fill_rect(rect, &Self::paint(style), transform, None);
    }

    fn text(&mut self, center: Point, label: &str) {
        tracing::trace!("raster canvas skips label '{}' at {:?}", label, center);
    }
}
