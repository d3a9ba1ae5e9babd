//! Shared constants.

/// Micrometres per millimetre.
pub const MICRONS_PER_MM: f64 = 1000.0;
/// Metres per micrometre.
pub const METRES_PER_MICRON: f64 = 1.0e-6;
/// Square metres per square micrometre.
pub const SQUARE_METRES_PER_SQUARE_MICRON: f64 = 1.0e-12;
/// Grams per kilogram.
pub const GRAMS_PER_KILOGRAM: f64 = 1000.0;

/// Default conductor width in µm.
pub const DEFAULT_TRACE_WIDTH: f64 = 100.0;
/// Default conductor layer thickness in µm.
pub const DEFAULT_TRACE_THICKNESS: f64 = 35.0;
/// Default substrate thickness in µm.
pub const DEFAULT_SUBSTRATE_THICKNESS: f64 = 125.0;
/// Density of copper in kg/m³.
pub const COPPER_DENSITY: f64 = 8960.0;

/// Divisor applied to the detector horizontal link count.
pub const DEFAULT_HORIZONTAL_PAIR_DIVISOR: f64 = 100.0;

/// Absolute tolerance (µm) when comparing diagonal spans.
pub const DIAGONAL_SPAN_TOLERANCE: f64 = 1.0e-6;
