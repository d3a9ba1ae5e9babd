//! Unit conversion utilities
//!
//! Device geometry is expressed in micrometres. Output formats want
//! millimetres (SVG) or SI metres (physical properties).

use crate::constants::{METRES_PER_MICRON, MICRONS_PER_MM, SQUARE_METRES_PER_SQUARE_MICRON};

/// Convert an internal length to millimetres
#[inline]
pub fn um_to_mm(value: f64) -> f64 {
    value / MICRONS_PER_MM
}

/// Convert an internal length to metres
#[inline]
pub fn um_to_m(value: f64) -> f64 {
    value * METRES_PER_MICRON
}

/// Convert an internal area (µm²) to square metres
#[inline]
pub fn um2_to_m2(value: f64) -> f64 {
    value * SQUARE_METRES_PER_SQUARE_MICRON
}

/// Convert an internal area (µm²) to square millimetres
#[inline]
pub fn um2_to_mm2(value: f64) -> f64 {
    value / (MICRONS_PER_MM * MICRONS_PER_MM)
}

/// Format an internal length in millimetres with 3 decimals
pub fn format_mm(value_um: f64) -> String {
    format!("{:.3}", um_to_mm(value_um))
}
