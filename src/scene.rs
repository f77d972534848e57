// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use crate::config::Color;
use crate::geometry::{ArcPath, Point};

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub round_cap: bool,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            round_cap: false,
        }
    }

    pub fn round(mut self) -> Self {
        self.round_cap = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Point,
        radius: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Arc {
        path: ArcPath,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Line {
        id: Option<String>,
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Text {
        id: Option<String>,
        at: Point,
        text: String,
        font_size: f64,
        bold: bool,
        color: Color,
    },
    Image {
        origin: Point,
        width: f64,
        height: f64,
        href: String,
    },
}

/// Fixed paint order of a gauge document, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerRole {
    Background,
    Zones,
    Frame,
    Ticks,
    Needle,
    Value,
}

/// Element ids that let a host find the patchable nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    pub prefix: String,
    pub root: String,
    pub background: String,
    pub zones: String,
    pub frame: String,
    pub ticks: String,
    pub needle: String,
    pub needle_line: String,
    pub value: String,
}

impl ElementIds {
    pub fn new(prefix: &str) -> Self {
        let id = |suffix: &str| format!("{prefix}_{suffix}");
        Self {
            prefix: prefix.to_string(),
            root: id("svg"),
            background: id("background"),
            zones: id("zones"),
            frame: id("frame"),
            ticks: id("ticks"),
            needle: id("needle"),
            needle_line: id("needle_line"),
            value: id("value"),
        }
    }

    /// Group id for a layer; the value text carries its own id instead.
    pub fn group(&self, role: LayerRole) -> Option<&str> {
        match role {
            LayerRole::Background => Some(&self.background),
            LayerRole::Zones => Some(&self.zones),
            LayerRole::Frame => Some(&self.frame),
            LayerRole::Ticks => Some(&self.ticks),
            LayerRole::Needle => Some(&self.needle),
            LayerRole::Value => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub role: LayerRole,
    pub id: Option<String>,
    pub transform: Option<String>,
    pub commands: Vec<DrawCommand>,
}

impl Layer {
    pub fn new(role: LayerRole, id: Option<&str>) -> Self {
        Self {
            role,
            id: id.map(str::to_string),
            transform: None,
            commands: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Option<String>) -> Self {
        self.transform = transform;
        self
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// One full document: canvas size plus layers in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub id: String,
    pub title: String,
    pub width: f64,
    pub height: f64,
    layers: Vec<Layer>,
}

impl Scene {
    pub fn new(id: &str, title: &str, width: f64, height: f64) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            width,
            height,
            layers: Vec::new(),
        }
    }

    /// Inserts `layer` behind every layer of a later role, keeping insertion
    /// order within a role.
    pub fn add_layer(&mut self, layer: Layer) {
        let at = self.layers.partition_point(|l| l.role <= layer.role);
        self.layers.insert(at, layer);
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}
