use sensorkit_designer::{
    DesignParameters, DeviceGenerator, FeatureId, Layout, LayoutBuilder, Pin, Point,
    RecordingCanvas, TraceKind,
};

const EPS: f64 = 1e-6;

fn pin_and_two_verticals() -> (DesignParameters, Layout) {
    let params = DesignParameters::default();
    let mut builder = LayoutBuilder::new(params);
    let pin = builder
        .add_pin(Pin::new(Point::new(1000.0, 1000.0), 400.0).with_labels(["SIG"]))
        .unwrap();
    let t1 = builder
        .add_trace(Point::new(1000.0, 1000.0), 0.0, 3000.0, TraceKind::Vertical)
        .unwrap();
    let t2 = builder
        .add_trace(Point::new(1000.0, 3000.0), 0.0, 5000.0, TraceKind::Vertical)
        .unwrap();
    builder.link(t1, pin).unwrap();
    builder.link(t2, t1).unwrap();
    (params, builder.build())
}

#[test]
fn test_pin_overlap_and_collinear_traces() {
    let (params, layout) = pin_and_two_verticals();
    let out = DeviceGenerator::new(params)
        .generate(&layout, &mut RecordingCanvas::new())
        .unwrap();

    let pin_area = std::f64::consts::PI * 200.0 * 200.0;
    // 100 * 2000 minus a pin radius of trace width
    let t1_area = 180_000.0;
    // 100 * 2000 minus half a trace width
    let t2_area = 199_950.0;

    let features = &out.report.features;
    assert!((features[0].area_um2 - pin_area).abs() < EPS);
    assert!((features[1].area_um2 - t1_area).abs() < EPS);
    assert!((features[2].area_um2 - t2_area).abs() < EPS);
    assert!((out.accumulator.total_area - (pin_area + t1_area + t2_area)).abs() < EPS);
    assert_eq!(features[0].description, "pin SIG");
    assert_eq!(features[1].description, "vertical trace");
}

#[test]
fn test_horizontal_trace_after_pin() {
    let params = DesignParameters::default();
    let mut builder = LayoutBuilder::new(params);
    let pin = builder
        .add_pin(Pin::new(Point::new(2000.0, 6000.0), 500.0))
        .unwrap();
    let lead = builder
        .add_trace(Point::new(2000.0, 6000.0), 7000.0, 0.0, TraceKind::Horizontal)
        .unwrap();
    builder.link(lead, pin).unwrap();
    let out = DeviceGenerator::new(params)
        .generate(&builder.build(), &mut RecordingCanvas::new())
        .unwrap();

    // 100 * 5000 minus a pin radius (250) of trace width
    let lead_area = 475_000.0;
    assert!((out.report.features[1].area_um2 - lead_area).abs() < EPS);
    assert_eq!(out.report.features[1].description, "horizontal trace");
    let pin_area = std::f64::consts::PI * 250.0 * 250.0;
    assert!((out.accumulator.total_area - (pin_area + lead_area)).abs() < EPS);
}

#[test]
fn test_mass_sums_over_features() {
    let (params, layout) = pin_and_two_verticals();
    let out = DeviceGenerator::new(params)
        .generate(&layout, &mut RecordingCanvas::new())
        .unwrap();

    let expected_mass = params.material.mass_grams(out.accumulator.total_area);
    assert!((out.accumulator.overall_mass - expected_mass).abs() < 1e-12);
    let per_feature: f64 = out.report.features.iter().map(|f| f.mass_g).sum();
    assert!((per_feature - out.accumulator.overall_mass).abs() < 1e-15);
}

#[test]
fn test_moments_measured_from_device_center() {
    let params = DesignParameters::default();
    let mut builder = LayoutBuilder::new(params);
    builder
        .add_pin(Pin::new(Point::new(2000.0, 9000.0), 400.0))
        .unwrap();
    let layout = builder.build();

    let out = DeviceGenerator::new(params)
        .generate(&layout, &mut RecordingCanvas::new())
        .unwrap();
    let acc = &out.accumulator;
    assert!((acc.moment_x - 3.0e-3 * acc.overall_mass).abs() < 1e-15);
    assert!((acc.moment_y - 4.0e-3 * acc.overall_mass).abs() < 1e-15);

    let offsets = acc.center_offset().unwrap();
    assert!((offsets.x - 3.0e-3).abs() < 1e-12);
    assert!((offsets.y - 4.0e-3).abs() < 1e-12);
    assert!((offsets.z - params.material.z_offset_m()).abs() < 1e-12);
}

#[test]
fn test_runs_are_idempotent() {
    let (params, layout) = pin_and_two_verticals();
    let generator = DeviceGenerator::new(params);
    let first = generator.generate(&layout, &mut RecordingCanvas::new()).unwrap();
    let second = generator.generate(&layout, &mut RecordingCanvas::new()).unwrap();

    assert_eq!(first.accumulator.total_area, second.accumulator.total_area);
    assert_eq!(first.accumulator.overall_mass, second.accumulator.overall_mass);
    assert_eq!(first.report.summary, second.report.summary);
    assert_eq!(first.svg.finish(), second.svg.finish());
}

#[test]
fn test_unlinked_trace_contributes_nothing() {
    let params = DesignParameters::default();
    let mut builder = LayoutBuilder::new(params);
    let t = builder
        .add_trace(Point::new(0.0, 0.0), 4000.0, 100.0, TraceKind::Horizontal)
        .unwrap();
    let layout = builder.build();

    let out = DeviceGenerator::new(params)
        .generate(&layout, &mut RecordingCanvas::new())
        .unwrap();
    assert_eq!(out.accumulator.total_area, 0.0);
    assert!(!out.accumulator.has_area(t));
    assert_eq!(out.report.summary.legacy_center_offset, None);
    assert_eq!(out.report.summary.center_offset, None);
}

#[test]
fn test_malformed_diagonal_does_not_stop_the_run() {
    let params = DesignParameters::default();
    let mut builder = LayoutBuilder::new(params);
    let pin = builder
        .add_pin(Pin::new(Point::new(1000.0, 1000.0), 400.0))
        .unwrap();
    let bad = builder
        .add_trace(Point::new(1000.0, 1000.0), 1500.0, 1300.0, TraceKind::DiagonalDown)
        .unwrap();
    let good = builder
        .add_trace(Point::new(1500.0, 1300.0), 2000.0, 800.0, TraceKind::DiagonalUp)
        .unwrap();
    builder.link(bad, pin).unwrap();
    builder.link(good, bad).unwrap();
    let layout = builder.build();

    let mut canvas = RecordingCanvas::new();
    let out = DeviceGenerator::new(params).generate(&layout, &mut canvas).unwrap();

    assert_eq!(out.report.diagnostics.len(), 1);
    assert_eq!(out.report.diagnostics[0].feature, FeatureId(1));
    assert_eq!(out.report.features[1].area_um2, 0.0);
    assert!((out.report.features[2].area_um2 - 250_000.0).abs() < EPS);
    assert_eq!(canvas.count_style(sensorkit_designer::FillStyle::Error), 1);
}
