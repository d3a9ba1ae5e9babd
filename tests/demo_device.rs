use std::path::PathBuf;

use sensorkit::{Config, DeviceGenerator, DeviceSpec, RasterCanvas, RecordingCanvas};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn test_demo_device_generates() {
    let config = Config::load_from_file(&demo("config.toml")).unwrap();
    assert_eq!(config, Config::default());

    let params = config.design_parameters();
    let spec = DeviceSpec::load_from_file(&demo("sensor.toml")).unwrap();
    let layout = spec.build(&params).unwrap();
    assert_eq!(layout.len(), 7);

    let output = DeviceGenerator::new(params)
        .with_name(spec.name.clone())
        .generate(&layout, &mut RecordingCanvas::new())
        .unwrap();

    let report = &output.report;
    assert_eq!(report.device_name, "humidity-sensor");
    assert!(report.diagnostics.is_empty());
    assert!((report.detector_area_mm2() - 27.3676).abs() < 1e-6);
    assert!(report.summary.mass_g > 0.0);
    assert!(report.summary.center_offset.is_some());

    let svg = output.svg.finish();
    assert!(svg.contains("<g id=\"detector\">"));
    assert!(svg.contains("width=\"10.000mm\""));
}

#[test]
fn test_demo_outputs_written_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("sensorkit.toml");
    Config::default().save_to_file(&config_path).unwrap();
    let config = Config::load_from_file(&config_path).unwrap();

    let params = config.design_parameters();
    let spec = DeviceSpec::load_from_file(&demo("sensor.toml")).unwrap();
    let layout = spec.build(&params).unwrap();

    let mut canvas = RasterCanvas::new(&params.device, config.output.raster_scale).unwrap();
    let output = DeviceGenerator::new(params)
        .with_name(spec.name.clone())
        .generate(&layout, &mut canvas)
        .unwrap();

    let svg_path = dir.path().join("sensor.svg");
    let png_path = dir.path().join("sensor.png");
    let report_path = dir.path().join("report.json");
    output.svg.write_to_file(&svg_path).unwrap();
    canvas.save_png(&png_path).unwrap();
    std::fs::write(&report_path, output.report.to_json().unwrap()).unwrap();

    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(png_path.metadata().unwrap().len() > 0);
    let report = std::fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("\"device_name\": \"humidity-sensor\""));
}
