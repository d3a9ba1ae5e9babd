//! SVG document assembly.
//!
//! Each feature serializes to a fragment; the document wraps them with a
//! header declaring the device size in millimetres and a closing footer.

use anyhow::{Context, Result};
use std::path::Path;

use sensorkit_core::format_mm;

use crate::params::DeviceGeometry;

#[derive(Debug, Clone)]
pub struct SvgDocument {
    width: f64,
    height: f64,
    body: String,
}

impl SvgDocument {
    pub fn new(device: &DeviceGeometry) -> Self {
        Self {
            width: device.width,
            height: device.height,
            body: String::new(),
        }
    }

    pub fn push_fragment(&mut self, fragment: &str) {
        self.body.push_str(fragment);
    }

    pub fn header(&self) -> String {
        let (w, h) = (format_mm(self.width), format_mm(self.height));
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" \
             width=\"{w}mm\" height=\"{h}mm\" viewBox=\"0 0 {w} {h}\">\n"
        )
    }

    pub fn footer(&self) -> &'static str {
        "</svg>\n"
    }

    /// Complete document text
    pub fn finish(&self) -> String {
        let mut out = self.header();
        out.push_str(&self.body);
        out.push_str(self.footer());
        out
    }

    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.finish())
            .with_context(|| format!("Failed to write SVG file {}", path.display()))
    }
}
