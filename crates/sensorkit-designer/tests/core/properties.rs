use proptest::prelude::*;
use sensorkit_designer::{
    AreaContribution, DesignParameters, DeviceFeature, Feature, Pin, Point, Primitive, Trace,
    TraceKind,
};

proptest! {
    #[test]
    fn pin_area_is_circle_area(
        diameter in 1.0f64..10_000.0,
        x in 0.0f64..10_000.0,
        y in 0.0f64..10_000.0
    ) {
        let pin = Pin::new(Point::new(x, y), diameter);
        let expected = std::f64::consts::PI * (diameter / 2.0).powi(2);
        let area = pin.area_contribution(None, &DesignParameters::default()).value();
        prop_assert!((area - expected).abs() <= 1e-9 * expected.max(1.0));
    }

    #[test]
    fn true_diagonal_area_and_length(
        s in 1.0f64..5_000.0,
        x in 0.0f64..5_000.0,
        y in 5_000.0f64..10_000.0
    ) {
        let params = DesignParameters::default();
        let trace = Trace::new(Point::new(x, y), x + s, y - s, TraceKind::DiagonalUp, 100.0);
        let area = trace.area_contribution(None, &params);
        let AreaContribution::Registered(area) = area else {
            return Err(TestCaseError::fail("diagonal not accepted"));
        };
        prop_assert!((area - s * s).abs() <= 1e-6 * (s * s));

        let length = trace
            .primitives(&params)
            .into_iter()
            .find_map(|p| match p {
                Primitive::RotatedRect { length, .. } => Some(length),
                _ => None,
            });
        prop_assert!(length.is_some());
        let length = length.unwrap_or_default();
        prop_assert!((length - s * std::f64::consts::SQRT_2).abs() <= 1e-6 * s);
    }

    #[test]
    fn straight_area_never_negative(span in 0.0f64..500.0, diameter in 1.0f64..2_000.0) {
        let params = DesignParameters::default();
        let pin = Feature::Pin(Pin::new(Point::new(0.0, 0.0), diameter));
        let trace = Trace::vertical(Point::new(0.0, 0.0), span, 100.0);
        let area = trace.area_contribution(Some(&pin), &params).value();
        prop_assert!(area >= 0.0);
    }
}
