use log::debug;
use serde::Serialize;

use crate::angle::AngleMapper;
use crate::config::{ColoredZone, GaugeConfig, GaugeType};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// How a mapped angle is turned into screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// 0° points right and angles grow counterclockwise. Used by heading
    /// dials (semicircular, one full turn of value).
    StandardPolar,
    /// 0° points up and angles grow clockwise.
    TopRelative,
}

impl Convention {
    pub fn for_gauge(gauge_type: GaugeType, full_turn: bool) -> Self {
        if gauge_type == GaugeType::Semicircular && full_turn {
            Convention::StandardPolar
        } else {
            Convention::TopRelative
        }
    }

    /// Point at `radius` from `center` along `angle` degrees. Screen Y grows
    /// downward.
    pub fn point_at(self, center: Point, radius: f64, angle: f64) -> Point {
        match self {
            Convention::StandardPolar => {
                let rad = angle.to_radians();
                Point::new(center.x + radius * rad.cos(), center.y - radius * rad.sin())
            }
            Convention::TopRelative => {
                let rad = (angle - 90.0).to_radians();
                Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
            }
        }
    }

    /// SVG sweep flag for travelling from `a0` to `a1`. SVG's positive
    /// direction is clockwise on screen, which is the top-relative direction
    /// and the reverse of standard polar.
    pub fn sweep_flag(self, a0: f64, a1: f64) -> bool {
        match self {
            Convention::TopRelative => a1 - a0 > 0.0,
            Convention::StandardPolar => a1 - a0 < 0.0,
        }
    }
}

/// Center, radius and output size of a gauge face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dial {
    pub center: Point,
    pub radius: f64,
    pub width: f64,
    pub height: f64,
    pub gauge_type: GaugeType,
    pub convention: Convention,
}

impl Dial {
    pub fn new(config: &GaugeConfig) -> Self {
        let half = (config.size / 2) as f64;
        let height = match config.gauge_type {
            GaugeType::Circular => config.size as f64,
            GaugeType::Semicircular => half,
        };
        Self {
            center: Point::new(half, half),
            radius: config.radius(),
            width: config.size as f64,
            height,
            gauge_type: config.gauge_type,
            convention: Convention::for_gauge(config.gauge_type, config.is_full_turn()),
        }
    }

    pub fn point_at(&self, radius: f64, angle: f64) -> Point {
        self.convention.point_at(self.center, radius, angle)
    }
}

// ============================================================================
// NEEDLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedleGeometry {
    pub angle: f64,
    pub hub: Point,
    pub length: f64,
    /// Where the needle actually points on screen.
    pub tip: Point,
    pub convention: Convention,
}

impl NeedleGeometry {
    pub fn new(dial: &Dial, angle: f64, length_fraction: f64) -> Self {
        let length = dial.radius * length_fraction;
        Self {
            angle,
            hub: dial.center,
            length,
            tip: dial.point_at(length, angle),
            convention: dial.convention,
        }
    }

    /// The endpoint of the drawn line. Top-relative needles are drawn
    /// pointing straight up and rotated as a group.
    pub fn line_end(&self) -> Point {
        match self.convention {
            Convention::StandardPolar => self.tip,
            Convention::TopRelative => Point::new(self.hub.x, self.hub.y - self.length),
        }
    }

    /// Group transform, present only for top-relative needles.
    pub fn rotation(&self) -> Option<(f64, Point)> {
        match self.convention {
            Convention::StandardPolar => None,
            Convention::TopRelative => Some((self.angle, self.hub)),
        }
    }
}

// ============================================================================
// ARCS: ZONES AND FRAME
// ============================================================================

/// One SVG elliptical-arc segment on a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub start: Point,
    pub end: Point,
    pub radius: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

impl ArcPath {
    /// Arc from angle `a0` to `a1` under `convention`. The sweep is capped at
    /// one full turn, and a full turn is emitted as two half arcs so start and
    /// end never coincide. Non-finite angles yield no arc.
    pub fn between(
        convention: Convention,
        center: Point,
        radius: f64,
        a0: f64,
        a1: f64,
    ) -> Vec<ArcPath> {
        if !a0.is_finite() || !a1.is_finite() {
            debug!("skipping arc with non-finite angles {a0}..{a1}");
            return Vec::new();
        }
        let delta = a1 - a0;
        if delta.abs() < 360.0 {
            return vec![Self::segment(convention, center, radius, a0, a1)];
        }
        let half = 180.0_f64.copysign(delta);
        vec![
            Self::segment(convention, center, radius, a0, a0 + half),
            Self::segment(convention, center, radius, a0 + half, a0 + 2.0 * half),
        ]
    }

    fn segment(convention: Convention, center: Point, radius: f64, a0: f64, a1: f64) -> ArcPath {
        ArcPath {
            start: convention.point_at(center, radius, a0),
            end: convention.point_at(center, radius, a1),
            radius,
            large_arc: (a1 - a0).abs() > 180.0,
            sweep: convention.sweep_flag(a0, a1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneArc {
    pub zone: ColoredZone,
    pub start_angle: f64,
    pub end_angle: f64,
    pub segments: Vec<ArcPath>,
}

/// Colored bands along the tick ring. Zones follow the active mapping, so a
/// custom angle map bends them too; they are always laid out top-relative.
pub fn zone_arcs(config: &GaugeConfig, mapper: &impl AngleMapper, dial: &Dial) -> Vec<ZoneArc> {
    if !config.zones_enabled() {
        return Vec::new();
    }
    let radius = dial.radius - config.theme.zones.inset;
    config
        .colored_zones
        .iter()
        .map(|zone| {
            let clamp = |v: f64| v.clamp(config.min_value, config.max_value);
            let a0 = mapper.calculate_angle(clamp(zone.start));
            let a1 = mapper.calculate_angle(clamp(zone.end));
            ZoneArc {
                zone: *zone,
                start_angle: a0,
                end_angle: a1,
                segments: ArcPath::between(Convention::TopRelative, dial.center, radius, a0, a1),
            }
        })
        .collect()
}

/// Arc framing the calibrated region, from the first to the last breakpoint
/// inside `[min, max]`. Needs at least two such breakpoints.
pub fn frame_arc(config: &GaugeConfig, mapper: &impl AngleMapper, dial: &Dial) -> Option<Vec<ArcPath>> {
    let (first, last) = match config.in_range_breakpoints().as_slice() {
        [first, .., last] => (*first, *last),
        _ => return None,
    };
    let radius = dial.radius + config.theme.frame.offset;
    Some(ArcPath::between(
        dial.convention,
        dial.center,
        radius,
        mapper.calculate_angle(first),
        mapper.calculate_angle(last),
    ))
}
