//! Error handling for SensorKit
//!
//! Provides error types for the layers of the generator:
//! - Layout errors (device specification wiring)
//! - Geometry errors (feature parameters)
//! - Accumulator errors (double registration of physical quantities)
//!
//! Malformed diagonal traces and traces without a previous feature are not
//! errors; they are handled locally by the feature model. All error types use
//! `thiserror`.

use thiserror::Error;

/// Layout error type
///
/// Raised while turning a device specification into a linked feature list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A record references a feature name that does not exist
    #[error("Feature {index} references unknown previous feature '{name}'")]
    UnknownReference {
        /// Index of the referencing record.
        index: usize,
        /// The unresolved name.
        name: String,
    },

    /// Two records share the same name
    #[error("Duplicate feature name '{name}'")]
    DuplicateName {
        /// The duplicated name.
        name: String,
    },

    /// A record names itself as its previous feature
    #[error("Feature '{name}' references itself as previous feature")]
    SelfReference {
        /// The offending name.
        name: String,
    },

    /// A feature id is outside the feature list
    #[error("Feature id {index} out of range (len {len})")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// Number of features in the layout.
        len: usize,
    },
}

/// Geometry error type
///
/// Represents feature parameters that cannot describe any conductor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A dimension that must be strictly positive is not
    #[error("Invalid dimension '{name}': {value} must be > 0")]
    NonPositive {
        /// Parameter name.
        name: String,
        /// Offending value.
        value: f64,
    },

    /// A coordinate or dimension is NaN or infinite
    #[error("Non-finite value for '{name}'")]
    NonFinite {
        /// Parameter name.
        name: String,
    },
}

/// Accumulator error type
///
/// Each feature contributes its area and its mass exactly once per run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccumulatorError {
    /// Area was already registered for this feature
    #[error("Area already registered for feature {feature}")]
    AreaAlreadyRegistered {
        /// Index of the feature.
        feature: usize,
    },

    /// Mass and moment were already registered for this feature
    #[error("Mass already registered for feature {feature}")]
    MassAlreadyRegistered {
        /// Index of the feature.
        feature: usize,
    },
}

/// Main error type for SensorKit
#[derive(Error, Debug)]
pub enum Error {
    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Accumulator error
    #[error(transparent)]
    Accumulator(#[from] AccumulatorError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a layout error
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Error::Layout(_))
    }

    /// Check if this is a double registration
    pub fn is_double_registration(&self) -> bool {
        matches!(self, Error::Accumulator(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
