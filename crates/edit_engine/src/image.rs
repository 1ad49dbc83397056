//! Asynchronous image loading
//!
//! The editor never decodes images itself. It queues an [`ImageLoadRequest`]
//! per image object, the host decodes it through an [`ImageDecoder`], and the
//! [`ImageLoadResult`] comes back to the editor, which patches only the object
//! that requested it. A result whose ticket was cancelled is discarded.

use crate::ObjectHandle;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

/// Why an image could not be shown
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("Image source unreachable: {0}")]
    Unreachable(String),

    #[error("Invalid image format: {0}")]
    InvalidFormat(String),

    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Image too large: {size} bytes (max: {max} bytes)")]
    TooLarge { size: usize, max: usize },
}

/// Identifies one outstanding decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadTicket(pub(crate) u64);

/// A decode the host should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLoadRequest {
    pub ticket: LoadTicket,
    pub source: String,
}

/// A finished decode, successful or not
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLoadResult {
    pub ticket: LoadTicket,
    pub source: String,
    pub outcome: Result<DecodedImage, ResourceError>,
}

/// What the editor did with a finished decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The decoded image now shows in the object's footprint
    Applied(ObjectHandle),
    /// The object keeps its placeholder
    Failed(ObjectHandle),
    /// The requesting object is gone or asked for a different image since
    Discarded,
}

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Svg,
    Bmp,
    Unknown,
}

impl ImageFormat {
    /// Detect format from magic bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        if data.len() < 4 {
            return Self::Unknown;
        }

        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Self::Png;
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }
        if data.starts_with(b"GIF8") {
            return Self::Gif;
        }
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Self::WebP;
        }
        if data.starts_with(b"BM") {
            return Self::Bmp;
        }

        let head = &data[..data.len().min(256)];
        let text = String::from_utf8_lossy(head).to_lowercase();
        if text.contains("<svg") || text.contains("<?xml") {
            return Self::Svg;
        }

        Self::Unknown
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
            Self::Svg => "image/svg+xml",
            Self::Bmp => "image/bmp",
            Self::Unknown => "application/octet-stream",
        }
    }
}

/// Metadata of a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedImage {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl DecodedImage {
    /// Sniff format and natural size from raw bytes
    pub fn sniff(data: &[u8]) -> Result<Self, ResourceError> {
        let format = ImageFormat::from_bytes(data);
        let dimensions = match format {
            ImageFormat::Png => png_dimensions(data),
            ImageFormat::Jpeg => jpeg_dimensions(data),
            ImageFormat::Gif => gif_dimensions(data),
            ImageFormat::Bmp => bmp_dimensions(data),
            ImageFormat::WebP => webp_dimensions(data),
            ImageFormat::Svg => Some(svg_dimensions(data)),
            ImageFormat::Unknown => {
                return Err(ResourceError::InvalidFormat(
                    "Unknown or unsupported image format".into(),
                ))
            }
        };

        let (width, height) = dimensions
            .ok_or_else(|| ResourceError::Decode(format!("truncated {:?} header", format)))?;
        Ok(Self {
            format,
            width,
            height,
        })
    }
}

/// Turns an image source into a decoded image.
///
/// Implementations may fetch over the network; the editor only sees the
/// result.
pub trait ImageDecoder: Send + Sync {
    fn decode(
        &self,
        source: &str,
    ) -> impl Future<Output = Result<DecodedImage, ResourceError>> + Send;
}

/// Decoder for `data:` URIs with base64 payloads.
///
/// Any other scheme is reported as unreachable.
#[derive(Debug, Clone)]
pub struct DataUriDecoder {
    /// Maximum decoded payload size in bytes
    pub max_bytes: usize,
}

impl Default for DataUriDecoder {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

impl DataUriDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the payload of a `data:` URI
    pub fn payload(&self, source: &str) -> Result<Vec<u8>, ResourceError> {
        let rest = source
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| ResourceError::Unreachable(source.to_string()))?;
        let (meta, data) = rest
            .split_once(',')
            .ok_or_else(|| ResourceError::Decode("data URI has no payload".into()))?;

        if !meta.ends_with(";base64") {
            return Err(ResourceError::Decode("only base64 data URIs are supported".into()));
        }

        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| ResourceError::Decode(e.to_string()))?;
        if bytes.len() > self.max_bytes {
            return Err(ResourceError::TooLarge {
                size: bytes.len(),
                max: self.max_bytes,
            });
        }
        Ok(bytes)
    }
}

impl ImageDecoder for DataUriDecoder {
    async fn decode(&self, source: &str) -> Result<DecodedImage, ResourceError> {
        let bytes = self.payload(source)?;
        DecodedImage::sniff(&bytes)
    }
}

/// Run one queued request through a decoder
pub async fn decode_request<D: ImageDecoder>(
    decoder: &D,
    request: ImageLoadRequest,
) -> ImageLoadResult {
    let outcome = decoder.decode(&request.source).await;
    ImageLoadResult {
        ticket: request.ticket,
        source: request.source,
        outcome,
    }
}

fn be_u32(data: &[u8], at: usize) -> Option<u32> {
    let bytes = data.get(at..at + 4)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn be_u16(data: &[u8], at: usize) -> Option<u16> {
    let bytes = data.get(at..at + 2)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

fn le_u16(data: &[u8], at: usize) -> Option<u16> {
    let bytes = data.get(at..at + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn le_i32(data: &[u8], at: usize) -> Option<i32> {
    let bytes = data.get(at..at + 4)?;
    Some(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

// IHDR width and height follow the 8 byte signature and the chunk header
fn png_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    Some((be_u32(data, 16)?, be_u32(data, 20)?))
}

fn jpeg_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    let mut i = 2;
    while i + 9 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        // SOF0, SOF1, SOF2
        if matches!(marker, 0xC0..=0xC2) {
            let height = be_u16(data, i + 5)? as u32;
            let width = be_u16(data, i + 7)? as u32;
            return Some((width, height));
        }
        let length = be_u16(data, i + 2)? as usize;
        i += 2 + length;
    }
    None
}

fn gif_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    Some((le_u16(data, 6)? as u32, le_u16(data, 8)? as u32))
}

// Height is negative for top-down bitmaps
fn bmp_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    let width = le_i32(data, 18)?;
    let height = le_i32(data, 22)?;
    Some((width.unsigned_abs(), height.unsigned_abs()))
}

fn webp_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    match data.get(12..16)? {
        b"VP8 " => Some((
            (le_u16(data, 26)? & 0x3FFF) as u32,
            (le_u16(data, 28)? & 0x3FFF) as u32,
        )),
        b"VP8L" => {
            let b = data.get(21..25)?;
            let bits = u32::from_le_bytes([b[0], b[1], b[2], b[3]]);
            Some(((bits & 0x3FFF) + 1, ((bits >> 14) & 0x3FFF) + 1))
        }
        b"VP8X" => {
            let w = data.get(24..27)?;
            let h = data.get(27..30)?;
            let width = u32::from_le_bytes([w[0], w[1], w[2], 0]) + 1;
            let height = u32::from_le_bytes([h[0], h[1], h[2], 0]) + 1;
            Some((width, height))
        }
        _ => None,
    }
}

fn svg_dimensions(data: &[u8]) -> (u32, u32) {
    let text = String::from_utf8_lossy(data);
    match (svg_attr(&text, "width"), svg_attr(&text, "height")) {
        (Some(w), Some(h)) => (w, h),
        // Browser default for an unsized SVG
        _ => (300, 150),
    }
}

fn svg_attr(text: &str, attr: &str) -> Option<u32> {
    let pattern = format!(" {}=\"", attr);
    let start = text.find(&pattern)? + pattern.len();
    let end = text[start..].find('"')?;
    let numeric: String = text[start..start + end]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    numeric.parse().ok()
}
