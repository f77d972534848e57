//! Background sources for the gauge face.
//!
//! A background is whatever sits behind the zones and ticks: either a plain
//! vector disc or a raster image. Raster payloads are loaded once and turned
//! into an `href` by a pluggable [`AssetEncoder`], so hosts can choose
//! between inline `data:` URIs and serving the file themselves.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::warn;

use crate::config::{BackgroundStyle, GaugeType};
use crate::error::GaugeError;
use crate::geometry::{ArcPath, Dial, Point};
use crate::scene::{DrawCommand, Stroke};

pub trait BackgroundProvider: fmt::Debug + Send + Sync {
    fn commands(&self, dial: &Dial, style: &BackgroundStyle) -> Vec<DrawCommand>;
}

/// Plain disc for circular dials, upper half-disc for semicircular ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorBackground;

impl BackgroundProvider for VectorBackground {
    fn commands(&self, dial: &Dial, style: &BackgroundStyle) -> Vec<DrawCommand> {
        let stroke = Some(Stroke::new(style.stroke, style.stroke_width));
        let fill = Some(style.fill);
        let command = match dial.gauge_type {
            GaugeType::Circular => DrawCommand::Circle {
                center: dial.center,
                radius: dial.radius,
                fill,
                stroke,
            },
            GaugeType::Semicircular => DrawCommand::Arc {
                path: ArcPath {
                    start: Point::new(dial.center.x - dial.radius, dial.center.y),
                    end: Point::new(dial.center.x + dial.radius, dial.center.y),
                    radius: dial.radius,
                    large_arc: false,
                    sweep: true,
                },
                fill,
                stroke,
            },
        };
        vec![command]
    }
}

/// A raster image held in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterAsset {
    bytes: Arc<[u8]>,
    mime: &'static str,
}

impl fmt::Debug for RasterAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterAsset")
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl RasterAsset {
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        let mime = sniff_mime(&bytes);
        Self { bytes, mime }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GaugeError> {
        let path = path.as_ref();
        let bytes = fs_err::read(path)?;
        if bytes.is_empty() {
            return Err(GaugeError::EmptyAsset(path.to_path_buf()));
        }
        Ok(Self::from_bytes(bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> &'static str {
        self.mime
    }
}

fn sniff_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xff, 0xd8, 0xff, ..] => "image/jpeg",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "image/png",
    }
}

/// Turns a raster payload into something an `<image href>` can point at.
pub trait AssetEncoder: fmt::Debug + Send + Sync {
    fn href(&self, asset: &RasterAsset) -> String;
}

/// Inline base64 `data:` URI.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUri;

impl AssetEncoder for DataUri {
    fn href(&self, asset: &RasterAsset) -> String {
        format!("data:{};base64,{}", asset.mime(), STANDARD.encode(asset.bytes()))
    }
}

/// A URL the host serves the asset from; the payload is not embedded.
#[derive(Debug, Clone)]
pub struct ExternalHref(pub String);

impl AssetEncoder for ExternalHref {
    fn href(&self, _asset: &RasterAsset) -> String {
        self.0.clone()
    }
}

#[derive(Debug, Clone)]
pub struct RasterBackground {
    asset: RasterAsset,
    encoder: Arc<dyn AssetEncoder>,
}

impl RasterBackground {
    pub fn new(asset: RasterAsset) -> Self {
        Self::with_encoder(asset, Arc::new(DataUri))
    }

    pub fn with_encoder(asset: RasterAsset, encoder: Arc<dyn AssetEncoder>) -> Self {
        Self { asset, encoder }
    }

    pub fn asset(&self) -> &RasterAsset {
        &self.asset
    }
}

impl BackgroundProvider for RasterBackground {
    fn commands(&self, dial: &Dial, _style: &BackgroundStyle) -> Vec<DrawCommand> {
        vec![DrawCommand::Image {
            origin: Point::default(),
            width: dial.width,
            height: dial.height,
            href: self.encoder.href(&self.asset),
        }]
    }
}

/// Loads a raster background from `path`, falling back to the vector
/// background when the file is missing, empty or unreadable.
pub fn load_or_vector(path: impl AsRef<Path>) -> Arc<dyn BackgroundProvider> {
    match RasterAsset::load(path.as_ref()) {
        Ok(asset) => Arc::new(RasterBackground::new(asset)),
        Err(e) => {
            warn!("Using vector background: {}", e);
            Arc::new(VectorBackground)
        }
    }
}
