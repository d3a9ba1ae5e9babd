//! Device specification input and two-phase layout construction.
//!
//! A device specification is an ordered list of feature records loaded from
//! TOML or JSON. Building a [`Layout`] happens in two phases: every feature is
//! constructed first, then previous-feature references are resolved by name.
//! References may therefore point forward in the list.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use sensorkit_core::LayoutError;

use crate::model::{Detector, DeviceFeature, Feature, FeatureId, Pin, Point, Trace, TraceKind};
use crate::params::{finite, positive, DesignParameters};

/// One feature construction in a device specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureRecord {
    Pin {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        x: f64,
        y: f64,
        diameter: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        previous: Option<String>,
        #[serde(default)]
        labels: Vec<String>,
    },
    Trace {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        orientation: TraceKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        previous: Option<String>,
    },
    Detector {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        x: f64,
        y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        previous: Option<String>,
    },
}

impl FeatureRecord {
    pub fn name(&self) -> Option<&str> {
        match self {
            FeatureRecord::Pin { name, .. }
            | FeatureRecord::Trace { name, .. }
            | FeatureRecord::Detector { name, .. } => name.as_deref(),
        }
    }

    pub fn previous(&self) -> Option<&str> {
        match self {
            FeatureRecord::Pin { previous, .. }
            | FeatureRecord::Trace { previous, .. }
            | FeatureRecord::Detector { previous, .. } => previous.as_deref(),
        }
    }
}

/// Ordered feature records describing one device topology
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "feature", alias = "features")]
    pub features: Vec<FeatureRecord>,
}

impl DeviceSpec {
    /// Load a device specification from a `.toml` or `.json` file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read device specification {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&content)
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            Self::from_toml(&content)
        } else {
            anyhow::bail!("Device specification must be .json or .toml")
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Invalid JSON device specification")
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid TOML device specification")
    }

    /// Build a linked layout from the records
    pub fn build(&self, params: &DesignParameters) -> sensorkit_core::Result<Layout> {
        params.validate()?;
        let mut builder = LayoutBuilder::new(*params);
        let mut pending = Vec::new();

        for record in &self.features {
            let id = match record {
                FeatureRecord::Pin {
                    x,
                    y,
                    diameter,
                    labels,
                    ..
                } => {
                    let pin = Pin::new(Point::new(*x, *y), *diameter).with_labels(labels.clone());
                    builder.add_pin(pin)?
                }
                FeatureRecord::Trace {
                    x,
                    y,
                    width,
                    height,
                    orientation,
                    ..
                } => builder.add_trace(Point::new(*x, *y), *width, *height, *orientation)?,
                FeatureRecord::Detector { x, y, .. } => builder.add_detector(Point::new(*x, *y))?,
            };
            if let Some(name) = record.name() {
                builder.name(id, name)?;
            }
            if let Some(previous) = record.previous() {
                pending.push((id, previous.to_string()));
            }
        }

        for (id, previous) in pending {
            builder.link_named(id, &previous)?;
        }

        Ok(builder.build())
    }
}

/// Collects features, then links them
#[derive(Debug)]
pub struct LayoutBuilder {
    params: DesignParameters,
    features: Vec<Feature>,
    names: HashMap<String, FeatureId>,
}

impl LayoutBuilder {
    pub fn new(params: DesignParameters) -> Self {
        Self {
            params,
            features: Vec::new(),
            names: HashMap::new(),
        }
    }

    fn push(&mut self, feature: Feature) -> FeatureId {
        let id = FeatureId(self.features.len());
        self.features.push(feature);
        id
    }

    pub fn add_pin(&mut self, pin: Pin) -> sensorkit_core::Result<FeatureId> {
        finite("pin.x", pin.position.x)?;
        finite("pin.y", pin.position.y)?;
        positive("pin.diameter", pin.diameter)?;
        Ok(self.push(Feature::Pin(pin)))
    }

    /// Add a trace using the run's conductor width
    pub fn add_trace(
        &mut self,
        start: Point,
        width: f64,
        height: f64,
        kind: TraceKind,
    ) -> sensorkit_core::Result<FeatureId> {
        for (name, value) in [
            ("trace.x", start.x),
            ("trace.y", start.y),
            ("trace.width", width),
            ("trace.height", height),
        ] {
            finite(name, value)?;
        }
        let trace = Trace::new(start, width, height, kind, self.params.trace.trace_width);
        Ok(self.push(Feature::Trace(trace)))
    }

    /// Add a detector comb sized from the run parameters
    pub fn add_detector(&mut self, origin: Point) -> sensorkit_core::Result<FeatureId> {
        finite("detector.x", origin.x)?;
        finite("detector.y", origin.y)?;
        let detector = Detector::from_params(origin, &self.params);
        detector.validate()?;
        Ok(self.push(Feature::Detector(detector)))
    }

    pub fn name(&mut self, id: FeatureId, name: &str) -> Result<(), LayoutError> {
        if self.names.contains_key(name) {
            return Err(LayoutError::DuplicateName {
                name: name.to_string(),
            });
        }
        self.names.insert(name.to_string(), id);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<FeatureId> {
        self.names.get(name).copied()
    }

    /// Set or replace the back-reference of `id`
    pub fn link(&mut self, id: FeatureId, previous: FeatureId) -> Result<(), LayoutError> {
        let len = self.features.len();
        for index in [id.index(), previous.index()] {
            if index >= len {
                return Err(LayoutError::OutOfRange { index, len });
            }
        }
        if id == previous {
            return Err(LayoutError::SelfReference {
                name: id.to_string(),
            });
        }
        self.features[id.index()].set_previous(Some(previous));
        Ok(())
    }

    pub fn link_named(&mut self, id: FeatureId, previous: &str) -> Result<(), LayoutError> {
        let target = self
            .lookup(previous)
            .ok_or_else(|| LayoutError::UnknownReference {
                index: id.index(),
                name: previous.to_string(),
            })?;
        if target == id {
            return Err(LayoutError::SelfReference {
                name: previous.to_string(),
            });
        }
        self.link(id, target)
    }

    pub fn build(self) -> Layout {
        let mut names: Vec<Option<String>> = vec![None; self.features.len()];
        for (name, id) in self.names {
            names[id.index()] = Some(name);
        }
        Layout {
            features: self.features,
            names,
        }
    }
}

/// Immutable, linked feature list in construction order
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    features: Vec<Feature>,
    names: Vec<Option<String>>,
}

impl Layout {
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features.get(id.index())
    }

    pub fn name_of(&self, id: FeatureId) -> Option<&str> {
        self.names.get(id.index()).and_then(|n| n.as_deref())
    }

    /// Resolved previous feature of `id`
    pub fn previous_of(&self, id: FeatureId) -> Option<&Feature> {
        self.get(id)
            .and_then(|f| f.previous())
            .and_then(|prev| self.get(prev))
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, &Feature)> {
        self.features
            .iter()
            .enumerate()
            .map(|(i, f)| (FeatureId(i), f))
    }
}
