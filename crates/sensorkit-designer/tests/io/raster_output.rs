use sensorkit_designer::{
    DesignParameters, DeviceGenerator, LayoutBuilder, Pin, Point, RasterCanvas,
};
use tempfile::TempDir;

#[test]
fn test_generation_onto_raster_canvas() {
    let params = DesignParameters::default();
    let mut builder = LayoutBuilder::new(params);
    builder
        .add_pin(Pin::new(Point::new(5000.0, 5000.0), 2000.0).with_labels(["GND"]))
        .unwrap();
    let layout = builder.build();

    let mut canvas = RasterCanvas::new(&params.device, 10.0).unwrap();
    DeviceGenerator::new(params).generate(&layout, &mut canvas).unwrap();

    let img = canvas.to_rgb_image();
    assert_eq!(img.dimensions(), (100, 100));
    assert_ne!(img.get_pixel(50, 50), img.get_pixel(1, 1));
}

#[test]
fn test_png_export() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("device.png");
    let canvas = RasterCanvas::new(&DesignParameters::default().device, 5.0).unwrap();
    canvas.save_png(&path).unwrap();

    let img = image::open(&path).unwrap();
    assert_eq!(img.width(), 50);
    assert_eq!(img.height(), 50);
}
