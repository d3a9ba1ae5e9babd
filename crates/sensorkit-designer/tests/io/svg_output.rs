use sensorkit_designer::{
    DesignParameters, DeviceGenerator, DeviceGeometry, LayoutBuilder, Pin, Point,
    RecordingCanvas, SvgDocument, TraceKind,
};
use tempfile::TempDir;

fn small_device() -> (DesignParameters, sensorkit_designer::Layout) {
    let mut params = DesignParameters::default();
    params.device = DeviceGeometry::new(8000.0, 6000.0);
    params.render.show_labels = true;
    let mut builder = LayoutBuilder::new(params);
    let pin = builder
        .add_pin(Pin::new(Point::new(1000.0, 1000.0), 400.0).with_labels(["A&B"]))
        .unwrap();
    let trace = builder
        .add_trace(Point::new(1000.0, 1000.0), 3000.0, 100.0, TraceKind::Horizontal)
        .unwrap();
    let diag = builder
        .add_trace(Point::new(3000.0, 1000.0), 4000.0, 2000.0, TraceKind::DiagonalDown)
        .unwrap();
    builder.link(trace, pin).unwrap();
    builder.link(diag, trace).unwrap();
    (params, builder.build())
}

#[test]
fn test_svg_document_structure() {
    let (params, layout) = small_device();
    let out = DeviceGenerator::new(params)
        .generate(&layout, &mut RecordingCanvas::new())
        .unwrap();
    let text = out.svg.finish();

    assert!(text.contains("width=\"8.000mm\""));
    assert!(text.contains("height=\"6.000mm\""));
    assert!(text.contains("viewBox=\"0 0 8.000 6.000\""));
    // Pad plus the end caps of both traces
    assert_eq!(text.matches("<circle").count(), 3);
    assert_eq!(text.matches("<rect").count(), 2);
    assert!(text.contains("rotate(45.000)"));
    // Labels are drawn on the canvas only
    assert!(!text.contains("<text"));
}

#[test]
fn test_labels_reach_the_canvas() {
    let (params, layout) = small_device();
    let mut canvas = RecordingCanvas::new();
    DeviceGenerator::new(params).generate(&layout, &mut canvas).unwrap();
    assert!(canvas
        .primitives()
        .iter()
        .any(|p| matches!(p, sensorkit_designer::Primitive::Label { text, .. } if text == "A&B")));
}

#[test]
fn test_svg_written_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("device.svg");
    let mut doc = SvgDocument::new(&DeviceGeometry::default());
    doc.push_fragment("<circle cx=\"5.000\" cy=\"5.000\" r=\"0.200\"/>\n");
    doc.write_to_file(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("<?xml"));
    assert!(content.contains("width=\"10.000mm\""));
    assert!(content.trim_end().ends_with("</svg>"));
}
