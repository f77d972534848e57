// ============================================================================
// GAUGE CONTROLLER
// ============================================================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Receiver;

use log::{debug, trace};
use serde::Serialize;

use crate::angle::{AngleMapper, AngleMapping};
use crate::config::GaugeConfig;
use crate::error::GaugeError;
use crate::geometry::{Convention, Dial, NeedleGeometry, Point};
use crate::scene::{ElementIds, Layer, Scene};
use crate::svg::{format_value, num, render_scene, rotate_transform, SvgComposer};
use crate::ticks::{plan_ticks, Tick};

static NEXT_GAUGE_ID: AtomicU64 = AtomicU64::new(1);

/// Command enum for serialised gauge updates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GaugeCommand {
    SetValue(f64),
    /// Back to the minimum of the range.
    Reset,
}

/// A single in-place edit of the emitted document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PatchOp {
    SetAttribute {
        id: String,
        name: String,
        value: String,
    },
    SetText {
        id: String,
        text: String,
    },
}

/// Minimal update after a value change: the needle and the readout only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugePatch {
    pub value: f64,
    pub angle: f64,
    pub tip: Point,
    pub ops: Vec<PatchOp>,
}

/// The only mutable part of a gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeState {
    value: f64,
}

impl GaugeState {
    fn clamped(value: f64, config: &GaugeConfig) -> Self {
        let value = if value.is_nan() {
            config.min_value
        } else {
            value.clamp(config.min_value, config.max_value)
        };
        Self { value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

#[derive(Debug, Clone)]
pub struct Gauge {
    config: GaugeConfig,
    mapping: AngleMapping,
    dial: Dial,
    ids: ElementIds,
    ticks: Vec<Tick>,
    static_layers: Vec<Layer>,
    state: GaugeState,
    document: String,
}

impl Gauge {
    /// Validates `config`, clamps `initial_value` and composes the full
    /// document. Static layers are built here and never again.
    pub fn new(config: GaugeConfig, initial_value: f64) -> Result<Self, GaugeError> {
        config.validate()?;

        let prefix = config.id.clone().unwrap_or_else(|| {
            format!("gauge_svg_{}", NEXT_GAUGE_ID.fetch_add(1, Ordering::Relaxed))
        });
        let ids = ElementIds::new(&prefix);
        let mapping = config.mapping();
        let dial = Dial::new(&config);
        let ticks = plan_ticks(&config, &mapping);
        let static_layers =
            SvgComposer::new(&config, &dial, &ids).static_layers(&mapping, &ticks);
        let state = GaugeState::clamped(initial_value, &config);

        let mut gauge = Self {
            config,
            mapping,
            dial,
            ids,
            ticks,
            static_layers,
            state,
            document: String::new(),
        };
        gauge.document = gauge.render();
        debug!(
            "Built gauge {} ({:?}, {}..{}, {} ticks)",
            prefix,
            gauge.config.gauge_type,
            gauge.config.min_value,
            gauge.config.max_value,
            gauge.ticks.len()
        );
        Ok(gauge)
    }

    pub fn id(&self) -> &str {
        &self.ids.prefix
    }

    pub fn element_ids(&self) -> &ElementIds {
        &self.ids
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    pub fn dial(&self) -> &Dial {
        &self.dial
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    pub fn value(&self) -> f64 {
        self.state.value()
    }

    pub fn state(&self) -> GaugeState {
        self.state
    }

    pub fn calculate_angle(&self, value: f64) -> f64 {
        self.mapping.calculate_angle(value)
    }

    pub fn angle(&self) -> f64 {
        self.calculate_angle(self.value())
    }

    pub fn needle(&self) -> NeedleGeometry {
        NeedleGeometry::new(&self.dial, self.angle(), self.config.needle_length)
    }

    /// The document emitted at construction.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Layers for the current value: the cached static layers plus freshly
    /// built needle and readout.
    pub fn scene(&self) -> Scene {
        let composer = self.composer();
        let needle = composer.needle_layer(&self.needle());
        let value = composer.value_layer(self.value());
        composer.scene(self.static_layers.iter().chain(Some(&needle)).chain(value.as_ref()))
    }

    /// Full document for the current value, for hosts that need to redraw from scratch.
    pub fn render(&self) -> String {
        render_scene(&self.scene(), &self.config.theme.font_family.0)
    }

    /// Clamps `value`, recomputes the angle and returns the patch for the
    /// needle and readout. Nothing static is rebuilt.
    pub fn set_value(&mut self, value: f64) -> GaugePatch {
        self.state = GaugeState::clamped(value, &self.config);
        let patch = self.patch();
        trace!(
            "Gauge {} -> {} ({}°)",
            self.id(),
            patch.value,
            num(patch.angle)
        );
        patch
    }

    pub fn apply(&mut self, command: GaugeCommand) -> GaugePatch {
        match command {
            GaugeCommand::SetValue(value) => self.set_value(value),
            GaugeCommand::Reset => self.set_value(self.config.min_value),
        }
    }

    /// Drains every pending command without blocking and returns the patch
    /// for the final state, or `None` when nothing arrived.
    pub fn drain_commands(&mut self, receiver: &Receiver<GaugeCommand>) -> Option<GaugePatch> {
        let mut latest = None;
        while let Ok(command) = receiver.try_recv() {
            latest = Some(command);
        }
        latest.map(|command| self.apply(command))
    }

    /// Patch describing the current state.
    pub fn patch(&self) -> GaugePatch {
        let needle = self.needle();
        let mut ops = match needle.convention {
            Convention::TopRelative => vec![PatchOp::SetAttribute {
                id: self.ids.needle.clone(),
                name: "transform".to_string(),
                value: rotate_transform(needle.angle, needle.hub),
            }],
            Convention::StandardPolar => {
                let end = needle.line_end();
                vec![
                    PatchOp::SetAttribute {
                        id: self.ids.needle_line.clone(),
                        name: "x2".to_string(),
                        value: num(end.x),
                    },
                    PatchOp::SetAttribute {
                        id: self.ids.needle_line.clone(),
                        name: "y2".to_string(),
                        value: num(end.y),
                    },
                ]
            }
        };
        if self.config.show_value {
            ops.push(PatchOp::SetText {
                id: self.ids.value.clone(),
                text: format_value(self.value()),
            });
        }
        GaugePatch {
            value: self.value(),
            angle: needle.angle,
            tip: needle.tip,
            ops,
        }
    }

    fn composer(&self) -> SvgComposer<'_> {
        SvgComposer::new(&self.config, &self.dial, &self.ids)
    }
}
