use sensorkit_designer::{
    DesignParameters, DeviceFeature, DeviceSpec, Feature, FeatureId, FeatureRecord, TraceKind,
};
use tempfile::TempDir;

const JSON_SPEC: &str = r#"{
  "name": "json-sample",
  "features": [
    { "kind": "trace", "name": "lead", "x": 1000.0, "y": 1000.0,
      "width": 0.0, "height": 3000.0, "orientation": "vertical", "previous": "pad" },
    { "kind": "pin", "name": "pad", "x": 1000.0, "y": 1000.0, "diameter": 400.0 },
    { "kind": "detector", "name": "comb", "x": 1350.0, "y": 1350.0, "previous": "lead" }
  ]
}"#;

#[test]
fn test_json_spec_with_forward_reference() {
    let spec = DeviceSpec::from_json(JSON_SPEC).unwrap();
    assert_eq!(spec.name, "json-sample");
    let layout = spec.build(&DesignParameters::default()).unwrap();

    assert_eq!(layout.len(), 3);
    assert_eq!(layout.get(FeatureId(0)).unwrap().previous(), Some(FeatureId(1)));
    assert!(matches!(layout.previous_of(FeatureId(0)), Some(Feature::Pin(_))));
    assert!(matches!(layout.get(FeatureId(2)), Some(Feature::Detector(_))));
}

#[test]
fn test_spec_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("device.toml");

    let spec = DeviceSpec::from_json(JSON_SPEC).unwrap();
    std::fs::write(&path, toml::to_string(&spec).unwrap()).unwrap();

    let loaded = DeviceSpec::load_from_file(&path).unwrap();
    assert_eq!(loaded, spec);
    assert!(matches!(
        loaded.features[0],
        FeatureRecord::Trace {
            orientation: TraceKind::Vertical,
            ..
        }
    ));
}

#[test]
fn test_json_file_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("device.json");
    std::fs::write(&path, JSON_SPEC).unwrap();
    let loaded = DeviceSpec::load_from_file(&path).unwrap();
    assert_eq!(loaded.features.len(), 3);
}

#[test]
fn test_unknown_extension_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("device.yaml");
    std::fs::write(&path, "name: nope").unwrap();
    assert!(DeviceSpec::load_from_file(&path).is_err());
}

#[test]
fn test_missing_file_reports_path() {
    let err = DeviceSpec::load_from_file(std::path::Path::new("/nonexistent/device.toml"))
        .unwrap_err();
    assert!(format!("{:#}", err).contains("/nonexistent/device.toml"));
}
