//! Live preview rendering for the in-progress gesture.
//!
//! Runs on every move sample, so the variants that scale width per segment
//! in the committed render are allowed to draw a cheaper constant-width
//! approximation here. The committed render reproduces the true algorithm.

use crate::brush::{self, BrushParams};
use crate::jitter::Jitter;
use inkstone_core::stroke::{BrushVariant, Color, Point, StrokeStyle};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Transform};
use tiny_skia::Stroke as SkStroke;

/// Style of the gesture being previewed.
#[derive(Debug, Clone, Copy)]
pub struct PreviewStyle {
    pub brush: BrushVariant,
    pub color: Color,
    pub size: f32,
    pub opacity: f32,
}

impl From<&StrokeStyle> for PreviewStyle {
    fn from(style: &StrokeStyle) -> Self {
        Self {
            brush: style.brush,
            color: style.color,
            size: style.base_size,
            opacity: style.opacity,
        }
    }
}

/// Draw the live draft onto the preview surface.
///
/// The caller clears the preview surface between moves and when the gesture
/// ends. Fewer than two points draw nothing.
pub fn render_preview(
    pixmap: &mut Pixmap,
    points: &[Point],
    style: &PreviewStyle,
    transform: Transform,
    jitter: &mut Jitter,
) {
    if points.len() < 2 {
        return;
    }

    let params = BrushParams::ink(style.color, style.size, style.opacity);
    match style.brush {
        // Constant-width approximations of the pressure-scaled curves.
        BrushVariant::Smooth => {
            quad_path(pixmap, points, style.size, style.opacity, &params, transform);
        }
        BrushVariant::Watercolor => {
            quad_path(
                pixmap,
                points,
                style.size * 2.0,
                style.opacity * 0.4,
                &params,
                transform,
            );
        }
        BrushVariant::Airbrush => airbrush_flat(pixmap, points, &params, transform, jitter),
        // The rest are cheap enough to run the committed algorithm as-is.
        variant => brush::draw_variant(pixmap, variant, points, &params, transform, jitter),
    }
}

/// Ring cursor shown while the eraser tool is over the surface.
pub fn render_eraser_cursor(
    pixmap: &mut Pixmap,
    center: kurbo::Point,
    size: f32,
    color: Color,
    transform: Transform,
) {
    let Some(ring) = PathBuilder::from_circle(center.x as f32, center.y as f32, size / 2.0) else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color(brush::skia_color(color, 1.0));
    paint.anti_alias = true;
    pixmap.stroke_path(&ring, &paint, &SkStroke::default(), transform, None);
}

/// Single quadratic-midpoint path at a constant width.
fn quad_path(
    pixmap: &mut Pixmap,
    points: &[Point],
    width: f32,
    alpha: f32,
    params: &BrushParams,
    transform: Transform,
) {
    let mut pb = PathBuilder::new();
    pb.move_to(points[0].x as f32, points[0].y as f32);
    for pair in points.windows(2) {
        let (p1, p2) = (&pair[0], &pair[1]);
        pb.quad_to(
            p1.x as f32,
            p1.y as f32,
            ((p1.x + p2.x) / 2.0) as f32,
            ((p1.y + p2.y) / 2.0) as f32,
        );
    }

    let Some(path) = pb.finish() else { return };
    let mut paint = Paint::default();
    paint.set_color(brush::skia_color(params.color, alpha));
    paint.anti_alias = true;
    let stroke = SkStroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..SkStroke::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, transform, None);
}

/// Airbrush cloud at a constant radius, skipping the per-point pressure.
fn airbrush_flat(
    pixmap: &mut Pixmap,
    points: &[Point],
    params: &BrushParams,
    transform: Transform,
    jitter: &mut Jitter,
) {
    // Treat every point as full pressure and reuse the committed algorithm.
    let flattened: Vec<Point> = points
        .iter()
        .map(|p| Point::new(p.x, p.y, 1.0, p.timestamp_ms))
        .collect();
    brush::draw_variant(
        pixmap,
        BrushVariant::Airbrush,
        &flattened,
        params,
        transform,
        jitter,
    );
}
