//! Value-to-angle mapping.
//!
//! Angles are in degrees. Both strategies are total over all real inputs:
//! out-of-range values extrapolate rather than clamp, and degenerate
//! calibrations resolve to a defined angle instead of NaN.

use log::debug;

use crate::config::{Breakpoint, GaugeType};

pub trait AngleMapper {
    fn calculate_angle(&self, value: f64) -> f64;
}

/// Uniform sweep from `start_angle` across `angle_range` degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMapping {
    min: f64,
    max: f64,
    start_angle: f64,
    angle_range: f64,
}

impl LinearMapping {
    pub fn new(min: f64, max: f64, start_angle: f64, angle_range: f64) -> Self {
        Self {
            min,
            max,
            start_angle,
            angle_range,
        }
    }

    pub fn for_gauge(gauge_type: GaugeType, min: f64, max: f64, counter_clockwise: bool) -> Self {
        let (start_angle, angle_range) = gauge_type.sweep();
        let direction = if counter_clockwise { -1.0 } else { 1.0 };
        Self::new(min, max, start_angle, angle_range * direction)
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Signed sweep, already flipped for counterclockwise dials.
    pub fn angle_range(&self) -> f64 {
        self.angle_range
    }

    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.angle_range
    }
}

impl AngleMapper for LinearMapping {
    fn calculate_angle(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 || !span.is_finite() {
            debug!(
                "degenerate range {}..{}, pinning needle to start angle {}",
                self.min, self.max, self.start_angle
            );
            return self.start_angle;
        }
        let normalized = (value - self.min) / span;
        self.start_angle + normalized * self.angle_range
    }
}

/// Piecewise-linear calibration through sorted breakpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseMapping {
    points: Vec<Breakpoint>,
}

impl PiecewiseMapping {
    /// Sorts the breakpoints by value. Returns `None` for an empty map,
    /// which callers treat as linear mode.
    pub fn new(points: impl IntoIterator<Item = Breakpoint>) -> Option<Self> {
        let mut points: Vec<Breakpoint> = points.into_iter().collect();
        if points.is_empty() {
            return None;
        }
        points.sort_by(|a, b| a.value.total_cmp(&b.value));
        Some(Self { points })
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.points
    }
}

impl AngleMapper for PiecewiseMapping {
    fn calculate_angle(&self, value: f64) -> f64 {
        match self.points.as_slice() {
            [] => 0.0,
            [only] => {
                debug!("single breakpoint map, every value maps to {}", only.angle);
                only.angle
            }
            [first, second, ..] if value <= first.value => along_segment(first, second, first, value),
            [.., prev, last] if value >= last.value => along_segment(prev, last, last, value),
            points => {
                // first.value < value < last.value, so the bracket is interior
                // and has non-zero width.
                let upper = points.partition_point(|p| p.value <= value);
                along_segment(&points[upper - 1], &points[upper], &points[upper - 1], value)
            }
        }
    }
}

/// Follows the slope of segment `a`-`b`, measured from `anchor` (one of the
/// two ends) so the anchor's own value maps to its angle exactly.
fn along_segment(a: &Breakpoint, b: &Breakpoint, anchor: &Breakpoint, value: f64) -> f64 {
    let dx = b.value - a.value;
    if dx == 0.0 {
        debug!("zero-width segment at value {}, using angle {}", a.value, a.angle);
        return a.angle;
    }
    anchor.angle + (value - anchor.value) / dx * (b.angle - a.angle)
}

/// The two mapping strategies behind one `calculate_angle` contract.
#[derive(Debug, Clone, PartialEq)]
pub enum AngleMapping {
    Linear(LinearMapping),
    Piecewise(PiecewiseMapping),
}

impl AngleMapping {
    pub fn breakpoints(&self) -> &[Breakpoint] {
        match self {
            Self::Linear(_) => &[],
            Self::Piecewise(p) => p.breakpoints(),
        }
    }
}

impl AngleMapper for AngleMapping {
    fn calculate_angle(&self, value: f64) -> f64 {
        match self {
            Self::Linear(m) => m.calculate_angle(value),
            Self::Piecewise(m) => m.calculate_angle(value),
        }
    }
}
