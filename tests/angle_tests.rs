use dialkit::{AngleMapper, AngleMapping, Breakpoint, GaugeConfig, GaugeType, LinearMapping, PiecewiseMapping};
use proptest::prelude::*;

fn three_point_map() -> PiecewiseMapping {
    PiecewiseMapping::new([
        Breakpoint::new(0.0, -45.0),
        Breakpoint::new(50.0, 0.0),
        Breakpoint::new(100.0, 45.0),
    ])
    .unwrap()
}

#[test]
fn test_circular_midpoint_bisects_sweep() {
    let config = GaugeConfig::builder().gauge_type(GaugeType::Circular).build();
    assert_eq!(config.mapping().calculate_angle(50.0), 450.0);
}

#[test]
fn test_semicircular_full_turn_quarter() {
    let config = GaugeConfig::builder().max_value(360.0).build();
    let mapping = config.mapping();
    assert_eq!(mapping.calculate_angle(0.0), 180.0);
    assert_eq!(mapping.calculate_angle(90.0), 135.0);
    assert_eq!(mapping.calculate_angle(180.0), 90.0);
    assert_eq!(mapping.calculate_angle(360.0), 0.0);
}

#[test]
fn test_piecewise_interpolation() {
    assert_eq!(three_point_map().calculate_angle(75.0), 22.5);
    assert_eq!(three_point_map().calculate_angle(25.0), -22.5);
}

#[test]
fn test_piecewise_extrapolates_outer_slopes() {
    let map = three_point_map();
    assert_eq!(map.calculate_angle(150.0), 90.0);
    assert_eq!(map.calculate_angle(-50.0), -90.0);
}

#[test]
fn test_unsorted_breakpoints_are_sorted() {
    let map = PiecewiseMapping::new([
        Breakpoint::new(100.0, 45.0),
        Breakpoint::new(0.0, -45.0),
        Breakpoint::new(50.0, 0.0),
    ])
    .unwrap();
    assert_eq!(map, three_point_map());
}

#[test]
fn test_zero_width_range_is_deterministic() {
    let linear = LinearMapping::new(0.0, 0.0, 270.0, 360.0);
    assert_eq!(linear.calculate_angle(0.0), 270.0);
    assert_eq!(linear.calculate_angle(42.0), 270.0);

    let config = GaugeConfig::builder().min_value(0.0).max_value(0.0).build();
    let angle = config.mapping().calculate_angle(0.0);
    assert_eq!(angle, 180.0);
    assert!(config.validate().is_err());
}

#[test]
fn test_duplicate_breakpoint_values_do_not_produce_nan() {
    let map = PiecewiseMapping::new([
        Breakpoint::new(10.0, 0.0),
        Breakpoint::new(10.0, 90.0),
    ])
    .unwrap();
    for v in [0.0, 10.0, 20.0] {
        assert!(map.calculate_angle(v).is_finite());
    }
}

#[test]
fn test_empty_map_selects_linear() {
    let config = GaugeConfig::builder().build();
    assert!(matches!(config.mapping(), AngleMapping::Linear(_)));
    assert!(config.mapping().breakpoints().is_empty());
}

fn gauge_type() -> impl Strategy<Value = GaugeType> {
    prop_oneof![Just(GaugeType::Circular), Just(GaugeType::Semicircular)]
}

proptest! {
    #[test]
    fn linear_angles_stay_within_sweep(
        gauge_type in gauge_type(),
        counter_clockwise in any::<bool>(),
        min in -1000.0f64..1000.0,
        span in 1.0f64..1000.0,
        t in 0.0f64..=1.0,
    ) {
        let max = min + span;
        let mapping = LinearMapping::for_gauge(gauge_type, min, max, counter_clockwise);
        let angle = mapping.calculate_angle(min + t * span);
        let (lo, hi) = if mapping.angle_range() >= 0.0 {
            (mapping.start_angle(), mapping.end_angle())
        } else {
            (mapping.end_angle(), mapping.start_angle())
        };
        prop_assert!(angle >= lo - 1e-9 && angle <= hi + 1e-9, "{angle} outside {lo}..{hi}");
    }

    #[test]
    fn linear_angles_are_monotonic(
        gauge_type in gauge_type(),
        counter_clockwise in any::<bool>(),
        min in -1000.0f64..1000.0,
        span in 1.0f64..1000.0,
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
    ) {
        let mapping = LinearMapping::for_gauge(gauge_type, min, min + span, counter_clockwise);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let angle_lo = mapping.calculate_angle(min + lo * span);
        let angle_hi = mapping.calculate_angle(min + hi * span);
        if mapping.angle_range() >= 0.0 {
            prop_assert!(angle_lo <= angle_hi);
        } else {
            prop_assert!(angle_lo >= angle_hi);
        }
    }

    #[test]
    fn breakpoints_map_to_their_own_angle(
        points in prop::collection::btree_map(-500i32..500, -720.0f64..720.0, 1..12),
    ) {
        let breakpoints: Vec<Breakpoint> = points
            .iter()
            .map(|(&value, &angle)| Breakpoint::new(value as f64, angle))
            .collect();
        let map = PiecewiseMapping::new(breakpoints.iter().rev().copied()).unwrap();
        for point in &breakpoints {
            prop_assert_eq!(map.calculate_angle(point.value), point.angle);
        }
    }
}
