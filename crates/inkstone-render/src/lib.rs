//! Inkstone Render Library
//!
//! Raster brush engine for the Inkstone drawing surface: ten stylized brush
//! algorithms, a live preview renderer, full-document redraw and raster
//! export, all on a tiny-skia pixmap.

pub mod brush;
pub mod error;
pub mod export;
pub mod jitter;
pub mod preview;
pub mod scene;

pub use brush::render_stroke;
pub use error::{ExportError, RenderError, RenderResult};
pub use export::{export_document, ExportFormat, ExportedImage};
pub use jitter::Jitter;
pub use preview::{render_eraser_cursor, render_preview, PreviewStyle};
pub use scene::{create_surface, render_document, render_document_seeded, viewport_transform};
