use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::background;
use crate::config::{Breakpoint, Color, ColoredZone, GaugeConfig, GaugeType};
use crate::error::GaugeError;

/// Environment variables with this prefix override file settings,
/// e.g. `DIALKIT_MAX_VALUE=360`.
pub const ENV_PREFIX: &str = "DIALKIT";

/// File-level description of a gauge, as written in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GaugeSettings {
    pub id: Option<String>,
    pub label: String,
    pub min_value: f64,
    pub max_value: f64,
    pub initial_value: f64,
    pub gauge_type: GaugeType,
    pub size: u32,
    pub margin: u32,
    pub needle_color: Color,
    pub needle_length: f64,
    pub show_value: bool,
    pub show_ticks: bool,
    pub tick_count: Option<usize>,
    pub angle_map: Vec<Breakpoint>,
    pub counter_clockwise: bool,
    pub colored_zones: Vec<ColoredZone>,
    pub show_zones: Option<bool>,
    /// Raster image read once when the gauge is built.
    pub background_image: Option<PathBuf>,
}

impl Default for GaugeSettings {
    fn default() -> Self {
        Self {
            id: None,
            label: "Gauge".to_string(),
            min_value: 0.0,
            max_value: 100.0,
            initial_value: 0.0,
            gauge_type: GaugeType::default(),
            size: 220,
            margin: 20,
            needle_color: Color::BLACK,
            needle_length: 0.75,
            show_value: true,
            show_ticks: true,
            tick_count: None,
            angle_map: Vec::new(),
            counter_clockwise: false,
            colored_zones: Vec::new(),
            show_zones: None,
            background_image: None,
        }
    }
}

impl GaugeSettings {
    /// Reads `path` (format picked from its extension) layered under
    /// `DIALKIT_*` environment variables.
    pub fn load(path: &Path) -> Result<Self, GaugeError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Parses TOML text directly, without environment overrides.
    pub fn from_toml(text: &str) -> Result<Self, GaugeError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from_str(text, ::config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Builds the immutable gauge configuration, loading the background
    /// image if one is named. An unreadable image falls back to the vector
    /// background.
    pub fn to_config(&self) -> GaugeConfig {
        let background = self
            .background_image
            .as_ref()
            .map(background::load_or_vector);
        GaugeConfig::builder()
            .maybe_id(self.id.clone())
            .label(self.label.clone())
            .min_value(self.min_value)
            .max_value(self.max_value)
            .gauge_type(self.gauge_type)
            .size(self.size)
            .margin(self.margin)
            .needle_color(self.needle_color)
            .needle_length(self.needle_length)
            .show_value(self.show_value)
            .show_ticks(self.show_ticks)
            .maybe_tick_count(self.tick_count)
            .angle_map(self.angle_map.clone())
            .counter_clockwise(self.counter_clockwise)
            .colored_zones(self.colored_zones.clone())
            .maybe_show_zones(self.show_zones)
            .maybe_background(background)
            .build()
    }
}
