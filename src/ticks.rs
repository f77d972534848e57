//! Tick planning: which marks a dial face carries and which get labels.

use std::collections::HashSet;

use crate::angle::AngleMapper;
use crate::config::GaugeConfig;

/// Interpolated marks between two calibrated breakpoints.
pub const MINOR_TICKS_PER_SEGMENT: usize = 9;
/// Value step of the full-turn (heading) tick set.
pub const FULL_TURN_STEP: f64 = 30.0;
const FULL_TURN_DIVISIONS: usize = 12;
/// Roughly how many labels a face should carry.
const TARGET_LABELS: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub angle: f64,
    pub value: f64,
    pub is_major: bool,
    pub labeled: bool,
}

impl Tick {
    /// Label text: the value rounded to an integer.
    pub fn label(&self) -> String {
        format!("{:.0}", self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPolicy {
    /// Majors at each in-range breakpoint, minors between them.
    BreakpointAnchored,
    /// Thirteen ticks every 30 units across a 360-unit span.
    FullTurn,
    /// `tick_count + 1` evenly spaced ticks.
    Uniform,
}

impl TickPolicy {
    pub fn for_config(config: &GaugeConfig) -> Self {
        if !config.angle_map.is_empty() {
            TickPolicy::BreakpointAnchored
        } else if config.is_full_turn() {
            TickPolicy::FullTurn
        } else {
            TickPolicy::Uniform
        }
    }
}

/// Labels every `label_step`-th tick so a face keeps about twelve labels.
/// `round` is ties-to-even; small division counts can still space unevenly.
pub fn label_step(total_divisions: usize) -> usize {
    ((total_divisions as f64 / TARGET_LABELS).round_ties_even() as usize).max(1)
}

pub fn is_labeled(index: usize, total_divisions: usize, step: usize) -> bool {
    index % step == 0 || index == 0 || index == total_divisions
}

/// Plans the ordered tick set for `config`, with angles from `mapper`.
/// Ticks landing on the same angle (to 6 decimals) are drawn once.
pub fn plan_ticks(config: &GaugeConfig, mapper: &impl AngleMapper) -> Vec<Tick> {
    let planned = match TickPolicy::for_config(config) {
        TickPolicy::BreakpointAnchored => breakpoint_ticks(config, mapper),
        TickPolicy::FullTurn => full_turn_ticks(config, mapper),
        TickPolicy::Uniform => uniform_ticks(config, mapper),
    };
    dedup_by_angle(planned)
}

fn breakpoint_ticks(config: &GaugeConfig, mapper: &impl AngleMapper) -> Vec<Tick> {
    let majors = config.in_range_breakpoints();
    let divisions = majors.len().saturating_sub(1);
    let step = label_step(divisions);

    let mut ticks = Vec::with_capacity(majors.len() * (MINOR_TICKS_PER_SEGMENT + 1));
    for (i, &value) in majors.iter().enumerate() {
        ticks.push(Tick {
            angle: mapper.calculate_angle(value),
            value,
            is_major: true,
            labeled: is_labeled(i, divisions, step),
        });
        if let Some(&next) = majors.get(i + 1) {
            let width = next - value;
            ticks.extend((1..=MINOR_TICKS_PER_SEGMENT).map(|k| {
                let minor = value + width * k as f64 / (MINOR_TICKS_PER_SEGMENT + 1) as f64;
                Tick {
                    angle: mapper.calculate_angle(minor),
                    value: minor,
                    is_major: false,
                    labeled: false,
                }
            }));
        }
    }
    ticks
}

fn full_turn_ticks(config: &GaugeConfig, mapper: &impl AngleMapper) -> Vec<Tick> {
    (0..=FULL_TURN_DIVISIONS)
        .map(|i| {
            let value = config.min_value + i as f64 * FULL_TURN_STEP;
            Tick {
                angle: mapper.calculate_angle(value),
                value,
                is_major: true,
                labeled: true,
            }
        })
        .collect()
}

fn uniform_ticks(config: &GaugeConfig, mapper: &impl AngleMapper) -> Vec<Tick> {
    let divisions = config.tick_count().max(1);
    let step = label_step(divisions);
    (0..=divisions)
        .map(|i| {
            let value = config.min_value + (i as f64 / divisions as f64) * config.span();
            Tick {
                angle: mapper.calculate_angle(value),
                value,
                is_major: true,
                labeled: is_labeled(i, divisions, step),
            }
        })
        .collect()
}

fn dedup_by_angle(ticks: Vec<Tick>) -> Vec<Tick> {
    let mut seen = HashSet::with_capacity(ticks.len());
    ticks
        .into_iter()
        .filter(|t| seen.insert((t.angle * 1e6).round() as i64))
        .collect()
}
