use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::angle::{AngleMapping, LinearMapping, PiecewiseMapping};
use crate::background::BackgroundProvider;
use crate::error::GaugeError;

// ============================================================================
// COLOR CONFIGURATION
// ============================================================================

/// Color representation for gauge elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = GaugeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GaugeError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                // #abc is shorthand for #aabbcc
                let widen = |i: usize| channel(&hex[i..=i].repeat(2));
                Ok(Color::new(widen(0)?, widen(1)?, widen(2)?))
            }
            6 => Ok(Color::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = GaugeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

// ============================================================================
// GAUGE TOPOLOGY & CALIBRATION
// ============================================================================

/// The two supported dial topologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeType {
    /// Full 360° sweep starting at the top, clockwise.
    Circular,
    /// 180° sweep starting at the left, passing over the top.
    #[default]
    Semicircular,
}

impl GaugeType {
    /// `(start_angle, angle_range)` in degrees for the linear mapping.
    pub const fn sweep(self) -> (f64, f64) {
        match self {
            GaugeType::Circular => (270.0, 360.0),
            GaugeType::Semicircular => (180.0, -180.0),
        }
    }

    pub const fn default_tick_count(self) -> usize {
        match self {
            GaugeType::Circular => 10,
            GaugeType::Semicircular => 12,
        }
    }
}

/// A calibration pair for the piecewise value-to-angle mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub value: f64,
    pub angle: f64,
}

impl Breakpoint {
    pub const fn new(value: f64, angle: f64) -> Self {
        Self { value, angle }
    }
}

impl From<(f64, f64)> for Breakpoint {
    fn from((value, angle): (f64, f64)) -> Self {
        Self::new(value, angle)
    }
}

/// A colored band over a sub-range of the value domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColoredZone {
    pub start: f64,
    pub end: f64,
    pub color: Color,
}

impl ColoredZone {
    pub const fn new(start: f64, end: f64, color: Color) -> Self {
        Self { start, end, color }
    }

    /// Illustrative speed-dial banding for a 0..100 gauge. Opt-in only;
    /// the thresholds carry no meaning beyond the look of a speedometer.
    pub fn speed_bands() -> Vec<ColoredZone> {
        vec![
            ColoredZone::new(0.9, 30.0, Color::new(0x4c, 0xaf, 0x50)),
            ColoredZone::new(31.0, 50.0, Color::new(0xcd, 0xdc, 0x39)),
            ColoredZone::new(51.0, 90.0, Color::new(0xff, 0x98, 0x00)),
            ColoredZone::new(91.0, 99.0, Color::new(0xf4, 0x43, 0x36)),
        ]
    }
}

// ============================================================================
// STYLE CONFIGURATION
// ============================================================================

/// Tick marks and their value labels
#[derive(Debug, Clone)]
pub struct TickStyle {
    pub major_length: f64,
    pub minor_length: f64,
    pub color: Color,
    pub width: f64,
    pub label_inset: f64,
    pub label_font_size: f64,
    /// Heading dials put their labels outside the ring instead.
    pub outer_label_offset: f64,
    pub outer_label_font_size: f64,
}

impl Default for TickStyle {
    fn default() -> Self {
        Self {
            major_length: 10.0,
            minor_length: 6.0,
            color: Color::new(0x33, 0x33, 0x33),
            width: 1.0,
            label_inset: 25.0,
            label_font_size: 10.0,
            outer_label_offset: 12.0,
            outer_label_font_size: 11.0,
        }
    }
}

/// Needle stroke and hub
#[derive(Debug, Clone)]
pub struct NeedleStyle {
    pub width: f64,
    pub hub_radius: f64,
}

impl Default for NeedleStyle {
    fn default() -> Self {
        Self {
            width: 4.0,
            hub_radius: 6.0,
        }
    }
}

/// Colored range bands
#[derive(Debug, Clone)]
pub struct ZoneStyle {
    pub width: f64,
    /// Distance from the dial radius to the band's centerline.
    pub inset: f64,
}

impl Default for ZoneStyle {
    fn default() -> Self {
        Self {
            width: 10.0,
            inset: 5.0,
        }
    }
}

/// Arc framing the calibrated region of an angle-mapped dial
#[derive(Debug, Clone)]
pub struct FrameStyle {
    pub offset: f64,
    pub width: f64,
    pub color: Color,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            offset: 6.0,
            width: 2.0,
            color: Color::new(0x66, 0x66, 0x66),
        }
    }
}

/// Numeric value readout
#[derive(Debug, Clone)]
pub struct ReadoutStyle {
    pub font_size: f64,
    pub color: Color,
    /// Distance from the bottom edge on semicircular dials.
    pub bottom_offset: f64,
}

impl Default for ReadoutStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            color: Color::new(0x33, 0x33, 0x33),
            bottom_offset: 15.0,
        }
    }
}

/// Vector fallback background
#[derive(Debug, Clone)]
pub struct BackgroundStyle {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            fill: Color::new(0xf0, 0xf0, 0xf0),
            stroke: Color::new(0xcc, 0xcc, 0xcc),
            stroke_width: 2.0,
        }
    }
}

/// All visual constants of a gauge face
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub ticks: TickStyle,
    pub needle: NeedleStyle,
    pub zones: ZoneStyle,
    pub frame: FrameStyle,
    pub readout: ReadoutStyle,
    pub background: BackgroundStyle,
    pub font_family: FontFamily,
}

#[derive(Debug, Clone)]
pub struct FontFamily(pub String);

impl Default for FontFamily {
    fn default() -> Self {
        Self("Arial, sans-serif".to_string())
    }
}

// ============================================================================
// GAUGE CONFIGURATION
// ============================================================================

/// Immutable description of a gauge. Build it with `GaugeConfig::builder()`.
#[derive(Debug, Clone, Builder)]
pub struct GaugeConfig {
    #[builder(default = 0.0)]
    pub min_value: f64,
    #[builder(default = 100.0)]
    pub max_value: f64,
    #[builder(default)]
    pub gauge_type: GaugeType,

    /// Edge length in pixels.
    #[builder(default = 220)]
    pub size: u32,
    #[builder(default = 20)]
    pub margin: u32,
    #[builder(default = "Gauge".to_string(), into)]
    pub label: String,
    /// Element id prefix; generated when absent.
    #[builder(into)]
    pub id: Option<String>,

    #[builder(default = Color::BLACK)]
    pub needle_color: Color,
    /// Fraction of the radius, 0.0..=1.0.
    #[builder(default = 0.75)]
    pub needle_length: f64,
    #[builder(default = true)]
    pub show_value: bool,
    #[builder(default = true)]
    pub show_ticks: bool,
    pub tick_count: Option<usize>,

    /// Piecewise calibration. An empty map means linear mode.
    #[builder(default)]
    pub angle_map: Vec<Breakpoint>,
    /// Flips the linear sweep; ignored when an angle map is present.
    #[builder(default = false)]
    pub counter_clockwise: bool,

    #[builder(default)]
    pub colored_zones: Vec<ColoredZone>,
    /// `None` enables zones automatically on a 0..100 gauge.
    pub show_zones: Option<bool>,

    /// Falls back to the vector background when absent.
    pub background: Option<Arc<dyn BackgroundProvider>>,
    #[builder(default)]
    pub theme: Theme,
}

impl GaugeConfig {
    pub fn span(&self) -> f64 {
        self.max_value - self.min_value
    }

    /// Heading-style dials cover exactly one turn of value.
    pub fn is_full_turn(&self) -> bool {
        self.span() == 360.0
    }

    pub fn tick_count(&self) -> usize {
        self.tick_count
            .unwrap_or_else(|| self.gauge_type.default_tick_count())
    }

    pub fn zones_enabled(&self) -> bool {
        self.show_zones
            .unwrap_or(self.min_value == 0.0 && self.max_value == 100.0)
    }

    pub fn radius(&self) -> f64 {
        (self.size / 2) as f64 - self.margin as f64
    }

    /// Breakpoint values inside `[min, max]`, ascending.
    pub fn in_range_breakpoints(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self
            .angle_map
            .iter()
            .map(|p| p.value)
            .filter(|v| (self.min_value..=self.max_value).contains(v))
            .collect();
        values.sort_by(f64::total_cmp);
        values
    }

    /// Selects the mapping strategy: piecewise when breakpoints exist,
    /// linear for the gauge type otherwise.
    pub fn mapping(&self) -> AngleMapping {
        match PiecewiseMapping::new(self.angle_map.iter().copied()) {
            Some(piecewise) => AngleMapping::Piecewise(piecewise),
            None => AngleMapping::Linear(LinearMapping::for_gauge(
                self.gauge_type,
                self.min_value,
                self.max_value,
                self.counter_clockwise,
            )),
        }
    }

    pub fn validate(&self) -> Result<(), GaugeError> {
        let (min, max) = (self.min_value, self.max_value);
        if !min.is_finite() || !max.is_finite() {
            return Err(GaugeError::NonFiniteBound { min, max });
        }
        if min >= max {
            return Err(GaugeError::InvalidRange { min, max });
        }
        if !(0.0..=1.0).contains(&self.needle_length) {
            return Err(GaugeError::NeedleLength(self.needle_length));
        }
        if self.radius() <= 0.0 {
            return Err(GaugeError::Size {
                size: self.size,
                margin: self.margin,
            });
        }
        if self.tick_count == Some(0) {
            return Err(GaugeError::ZeroTickCount);
        }
        if let Some(bad) = self
            .angle_map
            .iter()
            .find(|p| !p.value.is_finite() || !p.angle.is_finite())
        {
            return Err(GaugeError::InvalidBreakpoint {
                value: bad.value,
                angle: bad.angle,
            });
        }
        if let Some(bad) = self
            .colored_zones
            .iter()
            .find(|z| !z.start.is_finite() || !z.end.is_finite())
        {
            return Err(GaugeError::InvalidZone {
                start: bad.start,
                end: bad.end,
            });
        }
        Ok(())
    }
}
