//! # SensorKit Core
//!
//! Core types and utilities shared by the SensorKit crates: the error
//! taxonomy, unit conversions between the internal micrometre grid and
//! SI / millimetre outputs, and default physical constants.

pub mod constants;
pub mod error;
pub mod units;

pub use error::{AccumulatorError, Error, GeometryError, LayoutError, Result};
pub use units::{format_mm, um2_to_m2, um2_to_mm2, um_to_m, um_to_mm};
