// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

//! Circular and semicircular instrument gauges rendered as SVG documents.
//!
//! A [`Gauge`] is built once from an immutable [`GaugeConfig`]. Construction
//! maps values to angles, plans ticks, lays out the static layers and emits a
//! full document. After that, [`Gauge::set_value`] only returns a
//! [`GaugePatch`] touching the needle and the readout.
//!
//! ```no_run
//! use dialkit::{Gauge, GaugeConfig, GaugeType};
//!
//! let config = GaugeConfig::builder()
//!     .id("speed")
//!     .label("Speed")
//!     .gauge_type(GaugeType::Circular)
//!     .tick_count(12)
//!     .build();
//! let mut gauge = Gauge::new(config, 0.0)?;
//! let svg = gauge.document().to_string();
//! let patch = gauge.set_value(50.0);
//! # let _ = (svg, patch);
//! # Ok::<(), dialkit::GaugeError>(())
//! ```

pub mod angle;
pub mod background;
pub mod config;
pub mod error;
pub mod gauge;
pub mod geometry;
pub mod scene;
pub mod settings;
pub mod svg;
pub mod ticks;

pub use angle::{AngleMapper, AngleMapping, LinearMapping, PiecewiseMapping};
pub use background::{
    load_or_vector, AssetEncoder, BackgroundProvider, DataUri, ExternalHref, RasterAsset,
    RasterBackground, VectorBackground,
};
pub use config::{Breakpoint, Color, ColoredZone, GaugeConfig, GaugeType, Theme};
pub use error::GaugeError;
pub use gauge::{Gauge, GaugeCommand, GaugePatch, GaugeState, PatchOp};
pub use settings::GaugeSettings;
pub use ticks::{plan_ticks, Tick, TickPolicy};
