use sensorkit_designer::{
    DesignParameters, Detector, DeviceFeature, DeviceGenerator, FillStyle, LayoutBuilder, Point,
    Primitive, RecordingCanvas,
};

#[test]
fn test_reference_detector_area() {
    let params = DesignParameters::default();
    let mut builder = LayoutBuilder::new(params);
    builder.add_detector(Point::new(1350.0, 1350.0)).unwrap();
    let layout = builder.build();

    let out = DeviceGenerator::new(params)
        .generate(&layout, &mut RecordingCanvas::new())
        .unwrap();

    assert!((out.accumulator.detector_trace_area - 27_367_600.0).abs() < 1e-6);
    assert!((out.accumulator.total_area - 27_367_600.0).abs() < 1e-6);
    assert!((out.report.detector_area_mm2() - 27.3676).abs() < 1e-6);
    assert_eq!(out.report.features[0].description, "detector");
}

#[test]
fn test_detector_mass_at_its_center() {
    let params = DesignParameters::default();
    let mut builder = LayoutBuilder::new(params);
    // Centered on the device: only the Z moment remains
    builder.add_detector(Point::new(1350.0, 1350.0)).unwrap();
    let layout = builder.build();

    let out = DeviceGenerator::new(params)
        .generate(&layout, &mut RecordingCanvas::new())
        .unwrap();
    let acc = &out.accumulator;
    assert!(acc.overall_mass > 0.0);
    assert!(acc.moment_x.abs() < 1e-18);
    assert!(acc.moment_y.abs() < 1e-18);
}

#[test]
fn test_comb_drawn_without_caps_and_with_highlight() {
    let mut params = DesignParameters::default();
    params.render.highlight_detector = true;
    params.trace.end_caps = true;
    let mut builder = LayoutBuilder::new(params);
    builder.add_detector(Point::new(1350.0, 1350.0)).unwrap();
    let layout = builder.build();

    let mut canvas = RecordingCanvas::new();
    DeviceGenerator::new(params).generate(&layout, &mut canvas).unwrap();

    assert_eq!(canvas.count_style(FillStyle::Highlight), 1);
    assert!(!canvas
        .primitives()
        .iter()
        .any(|p| matches!(p, Primitive::Disk { .. })));
    // 19 link pairs and 37 teeth
    assert_eq!(canvas.count_style(FillStyle::Conductor), 38 + 37);
}

#[test]
fn test_teeth_alternate_and_advance_by_pitch() {
    let d = Detector::from_params(Point::new(0.0, 0.0), &DesignParameters::default());
    let teeth = d.vertical_traces();
    for pair in teeth.windows(2) {
        assert_eq!(pair[1].start.x - pair[0].start.x, d.pitch());
        assert_ne!(pair[0].start.y, pair[1].start.y);
    }
    let center = d.center(&DesignParameters::default());
    assert_eq!(center, Point::new(3650.0, 3650.0));
}

#[test]
fn test_custom_detector_size() {
    let mut params = DesignParameters::default();
    params.detector.width = 2000.0;
    params.detector.height = 1000.0;
    params.detector.spacing = 200.0;
    params.detector.trace_width = Some(50.0);
    let d = Detector::from_params(Point::new(0.0, 0.0), &params);
    // ceil((2000 / 200) / 2)
    assert_eq!(d.vertical_count(), 5);
    // floor(2000 / 4) / 100
    assert_eq!(d.horizontal_pair_count(), 5.0);
    // 5 * (50 * 1000) + 10 * (200 * 50) - 5 * 100
    assert!((d.aggregate_area() - 349_500.0).abs() < 1e-9);
}
