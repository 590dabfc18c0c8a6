//! Renderer and export errors.

use thiserror::Error;

/// Errors raised while acquiring or drawing on a raster surface.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not acquire a {width}x{height} raster surface")]
    SurfaceUnavailable { width: u32, height: u32 },
}

/// Errors raised while exporting the document to an image.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export target has zero dimensions")]
    InvalidDimensions,
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("png encoding failed: {0}")]
    PngEncoding(#[from] png::EncodingError),
    #[error("jpeg encoding failed: {0}")]
    JpegEncoding(#[from] image::ImageError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
