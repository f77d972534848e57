use std::path::PathBuf;

use thiserror::Error;

/// Faults a host can see. Only construction and settings loading return
/// these; the render and patch paths resolve every degenerate input locally.
#[derive(Debug, Error)]
pub enum GaugeError {
    #[error("invalid range: min ({min}) must be less than max ({max})")]
    InvalidRange { min: f64, max: f64 },
    #[error("gauge bounds must be finite (got min {min}, max {max})")]
    NonFiniteBound { min: f64, max: f64 },
    #[error("needle length {0} is outside 0.0..=1.0 of the radius")]
    NeedleLength(f64),
    #[error("gauge size {size} leaves no radius after a margin of {margin}")]
    Size { size: u32, margin: u32 },
    #[error("tick count must be at least 1")]
    ZeroTickCount,
    #[error("breakpoint ({value}, {angle}) is not finite")]
    InvalidBreakpoint { value: f64, angle: f64 },
    #[error("colored zone ({start}, {end}) is not finite")]
    InvalidZone { start: f64, end: f64 },
    #[error("invalid color '{0}', expected #rgb or #rrggbb")]
    InvalidColor(String),
    #[error("background asset {0} is empty")]
    EmptyAsset(PathBuf),
    #[error("Asset error: {0}")]
    Asset(#[from] std::io::Error),
    #[error("Settings error: {0}")]
    Settings(#[from] ::config::ConfigError),
}
