//! Full-document redraw.

use crate::brush::{render_stroke, skia_color};
use crate::error::{RenderError, RenderResult};
use crate::jitter::Jitter;
use inkstone_core::history::DocumentHistory;
use inkstone_core::stroke::Color;
use inkstone_core::viewport::ViewportState;
use tiny_skia::{Pixmap, Transform};

/// Acquire a raster surface of the given size.
pub fn create_surface(width: u32, height: u32) -> RenderResult<Pixmap> {
    Pixmap::new(width, height).ok_or(RenderError::SurfaceUnavailable { width, height })
}

/// Document-to-screen transform for the current pan offset.
pub fn viewport_transform(viewport: &ViewportState) -> Transform {
    Transform::from_translate(
        viewport.pan_offset.x as f32,
        viewport.pan_offset.y as f32,
    )
}

/// Redraw the whole document: background fill, then every committed stroke
/// oldest-first. Eraser strokes cut into what was drawn before them, so the
/// order is the document.
pub fn render_document(
    pixmap: &mut Pixmap,
    history: &DocumentHistory,
    viewport: &ViewportState,
    background: Color,
) {
    render_document_seeded(pixmap, history, viewport, background, &mut Jitter::from_entropy());
}

/// [`render_document`] with a caller-supplied jitter stream, for
/// deterministic pixels in tests.
pub fn render_document_seeded(
    pixmap: &mut Pixmap,
    history: &DocumentHistory,
    viewport: &ViewportState,
    background: Color,
    jitter: &mut Jitter,
) {
    pixmap.fill(skia_color(background, 1.0));
    let transform = viewport_transform(viewport);
    for stroke in history.strokes() {
        render_stroke(pixmap, stroke, transform, jitter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkstone_core::stroke::{BrushVariant, Point, Stroke, StrokeStyle, ToolKind};
    use kurbo::Vec2;

    fn line_stroke(tool: ToolKind, y: f64) -> Stroke {
        let style = StrokeStyle {
            tool,
            brush: BrushVariant::InkPen,
            base_size: 10.0,
            ..StrokeStyle::default()
        };
        Stroke::from_capture(
            &style,
            vec![Point::new(8.0, y, 1.0, 0), Point::new(56.0, y, 1.0, 16)],
        )
    }

    #[test]
    fn test_surface_acquisition() {
        assert!(create_surface(64, 64).is_ok());
        assert!(matches!(
            create_surface(0, 64),
            Err(RenderError::SurfaceUnavailable { .. })
        ));
    }

    #[test]
    fn test_redraw_paints_background_and_strokes() {
        let mut pixmap = create_surface(64, 64).unwrap();
        let mut history = DocumentHistory::new();
        history.append(line_stroke(ToolKind::Ink, 32.0));

        let viewport = ViewportState::new();
        render_document(&mut pixmap, &history, &viewport, Color::white());

        // Background is opaque white away from the stroke.
        let corner = pixmap.pixel(2, 2).unwrap();
        assert_eq!(corner.alpha(), 255);
        assert_eq!(corner.red(), 255);

        // The stroke is black over it.
        assert_eq!(pixmap.pixel(32, 32).unwrap().red(), 0);
    }

    #[test]
    fn test_eraser_cuts_to_background_transparency() {
        // On a transparent surface the eraser leaves holes, not paint.
        let mut pixmap = create_surface(64, 64).unwrap();
        let mut history = DocumentHistory::new();
        history.append(line_stroke(ToolKind::Ink, 32.0));
        history.append(line_stroke(ToolKind::Eraser, 32.0));

        let viewport = ViewportState::new();
        render_document_seeded(
            &mut pixmap,
            &history,
            &viewport,
            Color::new(0, 0, 0, 0),
            &mut Jitter::new(1),
        );
        assert_eq!(pixmap.pixel(32, 32).unwrap().alpha(), 0);
    }

    #[test]
    fn test_pan_offset_shifts_the_drawing() {
        let mut pixmap = create_surface(64, 64).unwrap();
        let mut history = DocumentHistory::new();
        history.append(line_stroke(ToolKind::Ink, 32.0));

        let mut viewport = ViewportState::new();
        viewport.pan_by(Vec2::new(0.0, 16.0));
        render_document(&mut pixmap, &history, &viewport, Color::white());

        // Stroke at document y=32 lands at screen y=48.
        assert_eq!(pixmap.pixel(32, 48).unwrap().red(), 0);
        assert_eq!(pixmap.pixel(32, 32).unwrap().red(), 255);
    }

    #[test]
    fn test_undo_changes_next_redraw() {
        let mut history = DocumentHistory::new();
        history.append(line_stroke(ToolKind::Ink, 32.0));
        let viewport = ViewportState::new();

        let mut before = create_surface(64, 64).unwrap();
        render_document(&mut before, &history, &viewport, Color::white());
        assert_eq!(before.pixel(32, 32).unwrap().red(), 0);

        history.undo();
        let mut after = create_surface(64, 64).unwrap();
        render_document(&mut after, &history, &viewport, Color::white());
        assert_eq!(after.pixel(32, 32).unwrap().red(), 255);
    }
}
