use dialkit::ticks::label_step;
use dialkit::{plan_ticks, Breakpoint, GaugeConfig, GaugeType, TickPolicy};

fn ticks_for(config: &GaugeConfig) -> Vec<dialkit::Tick> {
    plan_ticks(config, &config.mapping())
}

#[test]
fn test_full_turn_has_thirteen_labeled_ticks() {
    for gauge_type in [GaugeType::Semicircular, GaugeType::Circular] {
        let config = GaugeConfig::builder()
            .gauge_type(gauge_type)
            .max_value(360.0)
            .build();
        assert_eq!(TickPolicy::for_config(&config), TickPolicy::FullTurn);
        let ticks = ticks_for(&config);
        assert_eq!(ticks.len(), 13);
        assert!(ticks.iter().all(|t| t.labeled && t.is_major));
        let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
        let expected: Vec<f64> = (0..=12).map(|i| i as f64 * 30.0).collect();
        assert_eq!(values, expected);
    }
}

#[test]
fn test_full_turn_follows_offset_minimum() {
    let config = GaugeConfig::builder()
        .min_value(-180.0)
        .max_value(180.0)
        .build();
    let ticks = ticks_for(&config);
    assert_eq!(ticks.first().map(|t| t.value), Some(-180.0));
    assert_eq!(ticks.last().map(|t| t.value), Some(180.0));
}

#[test]
fn test_uniform_uses_default_tick_count() {
    let semi = GaugeConfig::builder().build();
    let ticks = ticks_for(&semi);
    assert_eq!(ticks.len(), 13);
    assert_eq!(ticks[6].angle, 90.0);

    let circ = GaugeConfig::builder().gauge_type(GaugeType::Circular).build();
    let ticks = ticks_for(&circ);
    assert_eq!(ticks.len(), 11);
    assert_eq!(ticks[5].angle, 450.0);
}

#[test]
fn test_label_step_targets_twelve_labels() {
    assert_eq!(label_step(0), 1);
    assert_eq!(label_step(5), 1);
    assert_eq!(label_step(12), 1);
    assert_eq!(label_step(24), 2);
    assert_eq!(label_step(18), 2);
    assert_eq!(label_step(30), 2);
    assert_eq!(label_step(42), 4);
}

#[test]
fn test_dense_faces_are_thinned_but_keep_ends() {
    let config = GaugeConfig::builder().tick_count(42).build();
    let ticks = ticks_for(&config);
    assert_eq!(ticks.len(), 43);
    let labeled: Vec<usize> = ticks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.labeled)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(labeled.first(), Some(&0));
    assert_eq!(labeled.last(), Some(&42));
    assert!(labeled.contains(&40));
    assert!(!labeled.contains(&2));
}

#[test]
fn test_labels_round_to_integers() {
    let config = GaugeConfig::builder().tick_count(3).build();
    let labels: Vec<String> = ticks_for(&config).iter().map(|t| t.label()).collect();
    assert_eq!(labels, vec!["0", "33", "67", "100"]);
}

#[test]
fn test_breakpoints_anchor_majors_with_nine_minors() {
    let config = GaugeConfig::builder()
        .angle_map(vec![
            Breakpoint::new(0.0, -90.0),
            Breakpoint::new(50.0, 0.0),
            Breakpoint::new(100.0, 90.0),
            Breakpoint::new(150.0, 120.0),
        ])
        .build();
    let ticks = ticks_for(&config);
    assert_eq!(ticks.len(), 3 + 2 * 9);
    let majors: Vec<f64> = ticks.iter().filter(|t| t.is_major).map(|t| t.value).collect();
    assert_eq!(majors, vec![0.0, 50.0, 100.0]);
    assert!(ticks.iter().filter(|t| !t.is_major).all(|t| !t.labeled));
    assert!(ticks.iter().filter(|t| t.is_major).all(|t| t.labeled));
    assert!((ticks[1].value - 5.0).abs() < 1e-12);
}

#[test]
fn test_out_of_range_breakpoints_draw_nothing() {
    let config = GaugeConfig::builder()
        .angle_map(vec![Breakpoint::new(200.0, 0.0), Breakpoint::new(300.0, 90.0)])
        .build();
    assert!(ticks_for(&config).is_empty());
}

#[test]
fn test_coincident_angles_are_drawn_once() {
    let config = GaugeConfig::builder()
        .angle_map(vec![
            Breakpoint::new(0.0, 0.0),
            Breakpoint::new(50.0, 0.0),
            Breakpoint::new(100.0, 90.0),
        ])
        .build();
    let ticks = ticks_for(&config);
    assert_eq!(ticks.len(), 11);
    assert_eq!(ticks.iter().filter(|t| t.angle == 0.0).count(), 1);
    assert_eq!(ticks[0].value, 0.0);
}
