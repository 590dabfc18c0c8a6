//! Document export to a static image.
//!
//! Export flattens the background and every committed stroke into one raster
//! frame. Vector formats have no native encoder here; requests for them
//! degrade to PNG, with a warning and a visible `requested`/`format`
//! mismatch on the result rather than a silent substitution.

use crate::error::ExportError;
use crate::scene::{create_surface, render_document};
use inkstone_core::history::DocumentHistory;
use inkstone_core::stroke::Color;
use inkstone_core::viewport::ViewportState;
use tiny_skia::Pixmap;

/// Requested export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Svg,
    Pdf,
}

impl ExportFormat {
    /// File extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Whether the format can be encoded natively from a raster frame.
    pub fn is_raster(self) -> bool {
        matches!(self, ExportFormat::Png | ExportFormat::Jpeg)
    }
}

/// A finished export.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// Format actually encoded.
    pub format: ExportFormat,
    /// Format the caller asked for.
    pub requested: ExportFormat,
}

impl ExportedImage {
    /// True when the requested format was degraded to a raster equivalent.
    pub fn is_fallback(&self) -> bool {
        self.format != self.requested
    }
}

/// Flatten the document into one encoded image.
pub fn export_document(
    history: &DocumentHistory,
    viewport: &ViewportState,
    width: u32,
    height: u32,
    background: Color,
    format: ExportFormat,
) -> Result<ExportedImage, ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::InvalidDimensions);
    }

    let mut pixmap = create_surface(width, height)?;
    render_document(&mut pixmap, history, viewport, background);

    let (actual, bytes) = match format {
        ExportFormat::Png => (ExportFormat::Png, encode_png(&pixmap)?),
        ExportFormat::Jpeg => (ExportFormat::Jpeg, encode_jpeg(&pixmap)?),
        ExportFormat::Svg | ExportFormat::Pdf => {
            log::warn!(
                "no native {} encoder available; exporting a png raster instead",
                format.extension()
            );
            (ExportFormat::Png, encode_png(&pixmap)?)
        }
    };

    Ok(ExportedImage {
        bytes,
        format: actual,
        requested: format,
    })
}

fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, png::EncodingError> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;

        let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
        for pixel in pixmap.pixels() {
            let c = pixel.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        writer.write_image_data(&rgba)?;
    }
    Ok(bytes)
}

fn encode_jpeg(pixmap: &Pixmap) -> Result<Vec<u8>, image::ImageError> {
    // JPEG carries no alpha; the flatten has already composited onto the
    // background color.
    let mut rgb = Vec::with_capacity(pixmap.pixels().len() * 3);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgb.extend_from_slice(&[c.red(), c.green(), c.blue()]);
    }

    let mut bytes = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, 90);
    encoder.encode(
        &rgb,
        pixmap.width(),
        pixmap.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(bytes)
}
