//! SVG composition.
//!
//! [`SvgComposer`] turns configuration-derived geometry into layers and
//! serialises a [`Scene`] into one standalone document. Static layers are
//! built once per gauge; the needle and value layers are cheap to rebuild.

use std::fmt::Write;

use crate::angle::AngleMapper;
use crate::background::{BackgroundProvider, VectorBackground};
use crate::config::{Color, GaugeConfig, GaugeType};
use crate::geometry::{frame_arc, zone_arcs, ArcPath, Convention, Dial, NeedleGeometry, Point};
use crate::scene::{DrawCommand, ElementIds, Layer, LayerRole, Scene, Stroke};
use crate::ticks::Tick;

pub struct SvgComposer<'a> {
    config: &'a GaugeConfig,
    dial: &'a Dial,
    ids: &'a ElementIds,
}

impl<'a> SvgComposer<'a> {
    pub fn new(config: &'a GaugeConfig, dial: &'a Dial, ids: &'a ElementIds) -> Self {
        Self { config, dial, ids }
    }

    // ------------------------------------------------------------------------
    // Static layers
    // ------------------------------------------------------------------------

    /// Background, zones, frame and ticks, in paint order. Empty layers are
    /// left out.
    pub fn static_layers(&self, mapper: &impl AngleMapper, ticks: &[Tick]) -> Vec<Layer> {
        [
            Some(self.background_layer()),
            self.zone_layer(mapper),
            self.frame_layer(mapper),
            self.tick_layer(ticks),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn background_layer(&self) -> Layer {
        let mut layer = Layer::new(LayerRole::Background, self.ids.group(LayerRole::Background));
        let style = &self.config.theme.background;
        let commands = match &self.config.background {
            Some(provider) => provider.commands(self.dial, style),
            None => VectorBackground.commands(self.dial, style),
        };
        commands.into_iter().for_each(|c| layer.add_command(c));
        layer
    }

    fn zone_layer(&self, mapper: &impl AngleMapper) -> Option<Layer> {
        let arcs = zone_arcs(self.config, mapper, self.dial);
        if arcs.is_empty() {
            return None;
        }
        let mut layer = Layer::new(LayerRole::Zones, self.ids.group(LayerRole::Zones));
        let width = self.config.theme.zones.width;
        for arc in arcs {
            for path in arc.segments {
                layer.add_command(DrawCommand::Arc {
                    path,
                    fill: None,
                    stroke: Some(Stroke::new(arc.zone.color, width)),
                });
            }
        }
        Some(layer)
    }

    fn frame_layer(&self, mapper: &impl AngleMapper) -> Option<Layer> {
        let segments = frame_arc(self.config, mapper, self.dial)?;
        let style = &self.config.theme.frame;
        let mut layer = Layer::new(LayerRole::Frame, self.ids.group(LayerRole::Frame));
        for path in segments {
            layer.add_command(DrawCommand::Arc {
                path,
                fill: None,
                stroke: Some(Stroke::new(style.color, style.width)),
            });
        }
        Some(layer)
    }

    fn tick_layer(&self, ticks: &[Tick]) -> Option<Layer> {
        if !self.config.show_ticks {
            return None;
        }
        let style = &self.config.theme.ticks;
        let radius = self.dial.radius;
        // Heading dials label outside the ring.
        let (label_radius, font_size) = match self.dial.convention {
            Convention::StandardPolar => (radius + style.outer_label_offset, style.outer_label_font_size),
            Convention::TopRelative => (radius - style.label_inset, style.label_font_size),
        };

        let mut layer = Layer::new(LayerRole::Ticks, self.ids.group(LayerRole::Ticks));
        for tick in ticks {
            let length = if tick.is_major {
                style.major_length
            } else {
                style.minor_length
            };
            layer.add_command(DrawCommand::Line {
                id: None,
                from: self.dial.point_at(radius - length, tick.angle),
                to: self.dial.point_at(radius, tick.angle),
                stroke: Stroke::new(style.color, style.width),
            });
            if tick.labeled {
                layer.add_command(DrawCommand::Text {
                    id: None,
                    at: self.dial.point_at(label_radius, tick.angle),
                    text: tick.label(),
                    font_size,
                    bold: false,
                    color: style.color,
                });
            }
        }
        Some(layer)
    }

    // ------------------------------------------------------------------------
    // Dynamic layers
    // ------------------------------------------------------------------------

    pub fn needle_layer(&self, needle: &NeedleGeometry) -> Layer {
        let style = &self.config.theme.needle;
        let color = self.config.needle_color;
        let transform = needle
            .rotation()
            .map(|(angle, about)| rotate_transform(angle, about));
        let mut layer =
            Layer::new(LayerRole::Needle, self.ids.group(LayerRole::Needle)).with_transform(transform);
        layer.add_command(DrawCommand::Line {
            id: Some(self.ids.needle_line.clone()),
            from: needle.hub,
            to: needle.line_end(),
            stroke: Stroke::new(color, style.width).round(),
        });
        layer.add_command(DrawCommand::Circle {
            center: needle.hub,
            radius: style.hub_radius,
            fill: Some(color),
            stroke: None,
        });
        layer
    }

    pub fn value_layer(&self, value: f64) -> Option<Layer> {
        if !self.config.show_value {
            return None;
        }
        let style = &self.config.theme.readout;
        let y = match self.config.gauge_type {
            GaugeType::Semicircular => self.dial.height - style.bottom_offset,
            GaugeType::Circular => self.dial.center.y,
        };
        let mut layer = Layer::new(LayerRole::Value, None);
        layer.add_command(DrawCommand::Text {
            id: Some(self.ids.value.clone()),
            at: Point::new(self.dial.center.x, y),
            text: format_value(value),
            font_size: style.font_size,
            bold: true,
            color: style.color,
        });
        Some(layer)
    }

    // ------------------------------------------------------------------------
    // Serialisation
    // ------------------------------------------------------------------------

    pub fn scene<'l>(&self, layers: impl IntoIterator<Item = &'l Layer>) -> Scene {
        let mut scene = Scene::new(
            &self.ids.root,
            &self.config.label,
            self.dial.width,
            self.dial.height,
        );
        layers.into_iter().cloned().for_each(|l| scene.add_layer(l));
        scene
    }
}

/// Value readout text, one decimal place.
pub fn format_value(value: f64) -> String {
    format!("{value:.1}")
}

pub fn rotate_transform(angle: f64, about: Point) -> String {
    format!("rotate({}, {}, {})", num(angle), num(about.x), num(about.y))
}

/// Shortest decimal form with at most three fractional digits.
pub fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" => "0".to_string(),
        _ => s.to_string(),
    }
}

pub fn arc_path_data(path: &ArcPath) -> String {
    format!(
        "M {} {} A {r} {r} 0 {} {} {} {}",
        num(path.start.x),
        num(path.start.y),
        u8::from(path.large_arc),
        u8::from(path.sweep),
        num(path.end.x),
        num(path.end.y),
        r = num(path.radius),
    )
}

/// Escape the five XML special characters for text and attribute values.
pub fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        r#"stroke="{}" stroke-width="{}""#,
        stroke.color,
        num(stroke.width)
    );
    if stroke.round_cap {
        attrs.push_str(r#" stroke-linecap="round""#);
    }
    attrs
}

fn paint(fill: Option<Color>, stroke: Option<&Stroke>) -> String {
    let fill = match fill {
        Some(color) => format!(r#"fill="{color}""#),
        None => r#"fill="none""#.to_string(),
    };
    match stroke {
        Some(stroke) => format!("{fill} {}", stroke_attrs(stroke)),
        None => fill,
    }
}

fn id_attr(id: Option<&str>) -> String {
    id.map(|id| format!(r#" id="{}""#, xml_escape(id)))
        .unwrap_or_default()
}

fn write_command(out: &mut String, command: &DrawCommand, font_family: &str) {
    // Writing into a String cannot fail.
    let _ = match command {
        DrawCommand::Circle {
            center,
            radius,
            fill,
            stroke,
        } => writeln!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" {}/>"#,
            num(center.x),
            num(center.y),
            num(*radius),
            paint(*fill, stroke.as_ref())
        ),
        DrawCommand::Arc { path, fill, stroke } => writeln!(
            out,
            r#"<path d="{}" {}/>"#,
            arc_path_data(path),
            paint(*fill, stroke.as_ref())
        ),
        DrawCommand::Line {
            id,
            from,
            to,
            stroke,
        } => writeln!(
            out,
            r#"<line{} x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
            id_attr(id.as_deref()),
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            stroke_attrs(stroke)
        ),
        DrawCommand::Text {
            id,
            at,
            text,
            font_size,
            bold,
            color,
        } => writeln!(
            out,
            r#"<text{} x="{}" y="{}" text-anchor="middle" dominant-baseline="middle" font-size="{}"{} fill="{}" font-family="{}">{}</text>"#,
            id_attr(id.as_deref()),
            num(at.x),
            num(at.y),
            num(*font_size),
            if *bold { r#" font-weight="bold""# } else { "" },
            color,
            xml_escape(font_family),
            xml_escape(text)
        ),
        DrawCommand::Image {
            origin,
            width,
            height,
            href,
        } => writeln!(
            out,
            r#"<image x="{}" y="{}" width="{}" height="{}" href="{}" preserveAspectRatio="xMidYMid meet"/>"#,
            num(origin.x),
            num(origin.y),
            num(*width),
            num(*height),
            xml_escape(href)
        ),
    };
}

/// Serialises `scene` as a standalone SVG document.
pub fn render_scene(scene: &Scene, font_family: &str) -> String {
    let mut out = String::new();
    let (w, h) = (num(scene.width), num(scene.height));
    let _ = writeln!(
        out,
        r#"<svg id="{}" width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg" style="display: block;">"#,
        xml_escape(&scene.id)
    );
    if !scene.title.is_empty() {
        let _ = writeln!(out, "<title>{}</title>", xml_escape(&scene.title));
    }
    for layer in scene.layers() {
        let grouped = layer.id.is_some() || layer.transform.is_some();
        if grouped {
            let transform = layer
                .transform
                .as_deref()
                .map(|t| format!(r#" transform="{t}""#))
                .unwrap_or_default();
            let _ = writeln!(out, "<g{}{}>", id_attr(layer.id.as_deref()), transform);
        }
        for command in &layer.commands {
            write_command(&mut out, command, font_family);
        }
        if grouped {
            out.push_str("</g>\n");
        }
    }
    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Breakpoint, ColoredZone};
    use crate::ticks::plan_ticks;

    fn compose_all(config: &GaugeConfig, value: f64) -> String {
        let dial = Dial::new(config);
        let ids = ElementIds::new("t");
        let mapping = config.mapping();
        let composer = SvgComposer::new(config, &dial, &ids);
        let ticks = plan_ticks(config, &mapping);
        let mut layers = composer.static_layers(&mapping, &ticks);
        let needle = NeedleGeometry::new(&dial, mapping.calculate_angle(value), config.needle_length);
        layers.push(composer.needle_layer(&needle));
        layers.extend(composer.value_layer(value));
        render_scene(&composer.scene(&layers), &config.theme.font_family.0)
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(num(110.0), "110");
        assert_eq!(num(42.5), "42.5");
        assert_eq!(num(1.0 / 3.0), "0.333");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(-12.25), "-12.25");
    }

    #[test]
    fn value_text_has_one_decimal() {
        assert_eq!(format_value(50.0), "50.0");
        assert_eq!(format_value(12.345), "12.3");
    }

    #[test]
    fn escape_covers_markup() {
        assert_eq!(xml_escape(r#"<a & 'b'>"#), "&lt;a &amp; &apos;b&apos;&gt;");
    }

    #[test]
    fn arc_data_uses_flags() {
        let path = ArcPath {
            start: Point::new(20.0, 110.0),
            end: Point::new(200.0, 110.0),
            radius: 90.0,
            large_arc: false,
            sweep: true,
        };
        assert_eq!(arc_path_data(&path), "M 20 110 A 90 90 0 0 1 200 110");
    }

    #[test]
    fn document_orders_layers_back_to_front() {
        let config = GaugeConfig::builder()
            .label("Speed <km/h>")
            .colored_zones(ColoredZone::speed_bands())
            .angle_map(vec![Breakpoint::new(0.0, -90.0), Breakpoint::new(100.0, 90.0)])
            .build();
        let svg = compose_all(&config, 50.0);
        let at = |needle: &str| svg.find(needle).unwrap_or_else(|| panic!("missing {needle}"));
        assert!(svg.starts_with(r#"<svg id="t_svg" width="220" height="110" viewBox="0 0 220 110""#));
        assert!(svg.contains("<title>Speed &lt;km/h&gt;</title>"));
        assert!(at(r#"id="t_background""#) < at(r#"id="t_zones""#));
        assert!(at(r#"id="t_zones""#) < at(r#"id="t_frame""#));
        assert!(at(r#"id="t_frame""#) < at(r#"id="t_ticks""#));
        assert!(at(r#"id="t_ticks""#) < at(r#"id="t_needle""#));
        assert!(at(r#"id="t_needle""#) < at(r#"id="t_value""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn top_relative_needle_is_a_rotated_group() {
        let config = GaugeConfig::builder().gauge_type(GaugeType::Circular).build();
        let svg = compose_all(&config, 50.0);
        assert!(svg.contains(r#"<g id="t_needle" transform="rotate(450, 110, 110)">"#));
        assert!(svg.contains(
            r##"<line id="t_needle_line" x1="110" y1="110" x2="110" y2="42.5" stroke="#000000" stroke-width="4" stroke-linecap="round"/>"##
        ));
        assert!(svg.contains(r##"<circle cx="110" cy="110" r="6" fill="#000000"/>"##));
        assert!(svg.contains(r#"id="t_value" x="110" y="110""#));
    }

    #[test]
    fn polar_needle_has_no_transform() {
        let config = GaugeConfig::builder().max_value(360.0).build();
        let svg = compose_all(&config, 90.0);
        assert!(svg.contains("<g id=\"t_needle\">\n"));
        assert!(svg.contains(r#"id="t_value" x="110" y="95""#));
        // labels sit outside the ring on heading dials
        assert!(svg.contains(r#"font-size="11""#));
    }

    #[test]
    fn heading_ticks_label_outside_the_ring() {
        let config = GaugeConfig::builder().max_value(360.0).build();
        let svg = compose_all(&config, 0.0);
        assert!(svg.contains(
            r##"<line x1="30" y1="110" x2="20" y2="110" stroke="#333333" stroke-width="1"/>"##
        ));
        assert!(svg.contains(
            r##"<text x="8" y="110" text-anchor="middle" dominant-baseline="middle" font-size="11" fill="#333333" font-family="Arial, sans-serif">0</text>"##
        ));
    }

    #[test]
    fn mapped_ticks_label_inside_the_ring() {
        let config = GaugeConfig::builder()
            .angle_map(vec![Breakpoint::new(0.0, -90.0), Breakpoint::new(100.0, 90.0)])
            .build();
        let svg = compose_all(&config, 0.0);
        assert!(svg.contains(
            r##"<line x1="30" y1="110" x2="20" y2="110" stroke="#333333" stroke-width="1"/>"##
        ));
        assert!(svg.contains(
            r##"<text x="45" y="110" text-anchor="middle" dominant-baseline="middle" font-size="10" fill="#333333" font-family="Arial, sans-serif">0</text>"##
        ));

        let minor = plan_ticks(&config, &config.mapping())[1];
        assert_eq!(minor.value, 10.0);
        assert!(!minor.is_major && !minor.labeled);
        assert!((minor.angle + 72.0).abs() < 1e-9);
        let dial = Dial::new(&config);
        let (from, to) = (dial.point_at(84.0, minor.angle), dial.point_at(90.0, minor.angle));
        let line = format!(
            r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#333333" stroke-width="1"/>"##,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y)
        );
        assert!(svg.contains(&line), "missing {line}");
    }

    #[test]
    fn hidden_ticks_and_value_are_omitted() {
        let config = GaugeConfig::builder()
            .show_ticks(false)
            .show_value(false)
            .show_zones(false)
            .build();
        let svg = compose_all(&config, 10.0);
        assert!(!svg.contains("t_ticks"));
        assert!(!svg.contains("t_value"));
        assert!(!svg.contains("t_zones"));
        assert!(!svg.contains("t_frame"));
    }
}
