//! Brush rendering engine.
//!
//! Turns a committed stroke's point sequence into drawn pixels on a
//! [`Pixmap`] under ten stylized algorithms. Ink strokes composite normally;
//! eraser strokes use a destructive blend that removes existing pixels along
//! their path. Points are in document space and the caller supplies the
//! document-to-screen transform.

use crate::jitter::Jitter;
use inkstone_core::stroke::{BrushVariant, Color, Point, Stroke, ToolKind};
use tiny_skia::{
    BlendMode, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Transform,
};
use tiny_skia::Stroke as SkStroke;

/// Dots scattered around each point by the spray brush.
const SPRAY_DENSITY: usize = 15;

/// Dots scattered around each point by the airbrush.
const AIRBRUSH_DENSITY: usize = 20;

/// Style scalars shared by every brush pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BrushParams {
    pub color: Color,
    pub size: f32,
    pub opacity: f32,
    pub blend: BlendMode,
}

impl BrushParams {
    pub(crate) fn ink(color: Color, size: f32, opacity: f32) -> Self {
        Self {
            color,
            size,
            opacity,
            blend: BlendMode::SourceOver,
        }
    }
}

/// Convert a model color plus an alpha multiplier to a paint color.
pub(crate) fn skia_color(color: Color, alpha: f32) -> tiny_skia::Color {
    let a = f32::from(color.a) / 255.0 * alpha.clamp(0.0, 1.0);
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, (a * 255.0).round() as u8)
}

fn solid_paint(color: Color, alpha: f32, blend: BlendMode) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color, alpha));
    paint.anti_alias = true;
    paint.blend_mode = blend;
    paint
}

fn pen(width: f32, cap: LineCap, join: LineJoin) -> SkStroke {
    SkStroke {
        width,
        line_cap: cap,
        line_join: join,
        ..SkStroke::default()
    }
}

/// Render a committed stroke onto the surface.
///
/// A stroke with fewer than two points draws nothing. Randomized variants
/// consume the caller's jitter stream; pass a fixed-seed [`Jitter`] for
/// reproducible pixels.
pub fn render_stroke(
    pixmap: &mut Pixmap,
    stroke: &Stroke,
    transform: Transform,
    jitter: &mut Jitter,
) {
    if stroke.points.len() < 2 {
        return;
    }

    let params = BrushParams {
        color: stroke.color,
        size: stroke.base_size,
        opacity: stroke.opacity,
        blend: match stroke.tool {
            ToolKind::Ink => BlendMode::SourceOver,
            ToolKind::Eraser => BlendMode::DestinationOut,
        },
    };

    draw_variant(pixmap, stroke.brush, &stroke.points, &params, transform, jitter);
}

pub(crate) fn draw_variant(
    pixmap: &mut Pixmap,
    variant: BrushVariant,
    points: &[Point],
    params: &BrushParams,
    transform: Transform,
    jitter: &mut Jitter,
) {
    match variant {
        BrushVariant::Smooth => draw_smooth(pixmap, points, params, transform),
        BrushVariant::Pencil => draw_pencil(pixmap, points, params, transform, jitter),
        BrushVariant::Marker => draw_marker(pixmap, points, params, transform),
        BrushVariant::Spray => draw_spray(pixmap, points, params, transform, jitter),
        BrushVariant::Calligraphy => draw_calligraphy(pixmap, points, params, transform),
        BrushVariant::Charcoal => draw_charcoal(pixmap, points, params, transform, jitter),
        BrushVariant::Watercolor => draw_watercolor(pixmap, points, params, transform),
        BrushVariant::Oil => draw_oil(pixmap, points, params, transform, jitter),
        BrushVariant::InkPen => draw_ink_pen(pixmap, points, params, transform),
        BrushVariant::Airbrush => draw_airbrush(pixmap, points, params, transform, jitter),
    }
}

/// Quadratic curves through the midpoints of consecutive point pairs, each
/// segment stroked at its own pressure-scaled width.
fn draw_pressure_curve(
    pixmap: &mut Pixmap,
    points: &[Point],
    base_width: f32,
    alpha: f32,
    params: &BrushParams,
    transform: Transform,
) {
    let paint = solid_paint(params.color, alpha, params.blend);
    let mut start = (points[0].x as f32, points[0].y as f32);

    for pair in points.windows(2) {
        let (p1, p2) = (&pair[0], &pair[1]);
        let mid = (
            ((p1.x + p2.x) / 2.0) as f32,
            ((p1.y + p2.y) / 2.0) as f32,
        );

        let mut pb = PathBuilder::new();
        pb.move_to(start.0, start.1);
        pb.quad_to(p1.x as f32, p1.y as f32, mid.0, mid.1);
        if let Some(path) = pb.finish() {
            let width = base_width * p2.pressure_or_full();
            pixmap.stroke_path(
                &path,
                &paint,
                &pen(width, LineCap::Round, LineJoin::Round),
                transform,
                None,
            );
        }
        start = mid;
    }
}

/// Plain polyline through every point.
fn polyline(points: &[Point]) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for (i, point) in points.iter().enumerate() {
        if i == 0 {
            pb.move_to(point.x as f32, point.y as f32);
        } else {
            pb.line_to(point.x as f32, point.y as f32);
        }
    }
    pb.finish()
}

/// Polyline with a per-point jitter offset applied to both axes.
fn jittered_polyline(
    points: &[Point],
    amplitude: f32,
    jitter: &mut Jitter,
) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for (i, point) in points.iter().enumerate() {
        let offset = if amplitude > 0.0 {
            jitter.amplitude(amplitude)
        } else {
            0.0
        };
        let x = point.x as f32 + offset;
        let y = point.y as f32 + offset;
        if i == 0 {
            pb.move_to(x, y);
        } else {
            pb.line_to(x, y);
        }
    }
    pb.finish()
}

fn stamp_dot(pixmap: &mut Pixmap, x: f32, y: f32, radius: f32, paint: &Paint, transform: Transform) {
    if let Some(circle) = PathBuilder::from_circle(x, y, radius) {
        pixmap.fill_path(&circle, paint, FillRule::Winding, transform, None);
    }
}

fn draw_smooth(pixmap: &mut Pixmap, points: &[Point], params: &BrushParams, transform: Transform) {
    draw_pressure_curve(pixmap, points, params.size, params.opacity, params, transform);
}

/// Soft, translucent and wide; otherwise the smooth technique.
fn draw_watercolor(pixmap: &mut Pixmap, points: &[Point], params: &BrushParams, transform: Transform) {
    draw_pressure_curve(
        pixmap,
        points,
        params.size * 2.0,
        params.opacity * 0.4,
        params,
        transform,
    );
}

/// Three overlapping thin passes, each independently perturbed.
fn draw_pencil(
    pixmap: &mut Pixmap,
    points: &[Point],
    params: &BrushParams,
    transform: Transform,
    jitter: &mut Jitter,
) {
    let paint = solid_paint(params.color, params.opacity * 0.7, params.blend);
    let stroke = pen(params.size * 0.4, LineCap::Round, LineJoin::Round);

    for _ in 0..3 {
        if let Some(path) = jittered_polyline(points, 0.5, jitter) {
            pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }
    }
}

fn draw_marker(pixmap: &mut Pixmap, points: &[Point], params: &BrushParams, transform: Transform) {
    let paint = solid_paint(params.color, params.opacity * 0.6, params.blend);
    let stroke = pen(params.size * 1.5, LineCap::Square, LineJoin::Bevel);

    if let Some(path) = polyline(points) {
        pixmap.stroke_path(&path, &paint, &stroke, transform, None);
    }
}

fn draw_ink_pen(pixmap: &mut Pixmap, points: &[Point], params: &BrushParams, transform: Transform) {
    let paint = solid_paint(params.color, params.opacity, params.blend);
    let stroke = pen(params.size * 0.8, LineCap::Square, LineJoin::Miter);

    if let Some(path) = polyline(points) {
        pixmap.stroke_path(&path, &paint, &stroke, transform, None);
    }
}

/// Particle scatter around every original point.
fn draw_spray(
    pixmap: &mut Pixmap,
    points: &[Point],
    params: &BrushParams,
    transform: Transform,
    jitter: &mut Jitter,
) {
    let paint = solid_paint(params.color, params.opacity * 0.3, params.blend);
    let radius = params.size * 2.0;

    for point in points {
        for _ in 0..SPRAY_DENSITY {
            let angle = jitter.angle();
            let distance = jitter.next_f32() * radius;
            let x = point.x as f32 + angle.cos() * distance;
            let y = point.y as f32 + angle.sin() * distance;
            stamp_dot(pixmap, x, y, 0.5, &paint, transform);
        }
    }
}

/// Flat-nib line: segment width follows the segment angle, widest when
/// moving horizontally.
fn draw_calligraphy(
    pixmap: &mut Pixmap,
    points: &[Point],
    params: &BrushParams,
    transform: Transform,
) {
    let paint = solid_paint(params.color, params.opacity, params.blend);

    for pair in points.windows(2) {
        let (p1, p2) = (&pair[0], &pair[1]);
        let angle = ((p2.y - p1.y) as f32).atan2((p2.x - p1.x) as f32);
        let width_multiplier = angle.cos().abs() * 2.0 + 0.5;
        let width = params.size * width_multiplier * p2.pressure_or_full();

        let mut pb = PathBuilder::new();
        pb.move_to(p1.x as f32, p1.y as f32);
        pb.line_to(p2.x as f32, p2.y as f32);
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(
                &path,
                &paint,
                &pen(width, LineCap::Butt, LineJoin::Miter),
                transform,
                None,
            );
        }
    }
}

/// Four soft layers with decreasing opacity, growing width and growing
/// per-point jitter.
fn draw_charcoal(
    pixmap: &mut Pixmap,
    points: &[Point],
    params: &BrushParams,
    transform: Transform,
    jitter: &mut Jitter,
) {
    for layer in 0..4u32 {
        let layer_f = layer as f32;
        let alpha = params.opacity * (0.2 - layer_f * 0.04);
        let width = params.size * (1.0 + layer_f * 0.3);
        let paint = solid_paint(params.color, alpha, params.blend);

        if let Some(path) = jittered_polyline(points, layer_f, jitter) {
            pixmap.stroke_path(
                &path,
                &paint,
                &pen(width, LineCap::Round, LineJoin::Round),
                transform,
                None,
            );
        }
    }
}

/// Three quadratic-midpoint passes with small independent per-segment
/// jitter, at full opacity and pressure-scaled width.
fn draw_oil(
    pixmap: &mut Pixmap,
    points: &[Point],
    params: &BrushParams,
    transform: Transform,
    jitter: &mut Jitter,
) {
    let paint = solid_paint(params.color, params.opacity, params.blend);

    for _ in 0..3 {
        let mut start = (points[0].x as f32, points[0].y as f32);

        for pair in points.windows(2) {
            let (p1, p2) = (&pair[0], &pair[1]);
            let jx = jitter.amplitude(0.5);
            let jy = jitter.amplitude(0.5);
            let mid = (
                ((p1.x + p2.x) / 2.0) as f32 + jx,
                ((p1.y + p2.y) / 2.0) as f32 + jy,
            );

            let mut pb = PathBuilder::new();
            pb.move_to(start.0, start.1);
            pb.quad_to(p1.x as f32 + jx, p1.y as f32 + jy, mid.0, mid.1);
            if let Some(path) = pb.finish() {
                let width = params.size * p2.pressure_or_full();
                pixmap.stroke_path(
                    &path,
                    &paint,
                    &pen(width, LineCap::Round, LineJoin::Round),
                    transform,
                    None,
                );
            }
            start = mid;
        }
    }
}

/// Dot cloud around every point with linear opacity falloff from the
/// center, for a soft radial-gradient look.
fn draw_airbrush(
    pixmap: &mut Pixmap,
    points: &[Point],
    params: &BrushParams,
    transform: Transform,
    jitter: &mut Jitter,
) {
    for point in points {
        let radius = params.size * point.pressure_or_full() * 2.0;
        if radius <= f32::EPSILON {
            continue;
        }

        for _ in 0..AIRBRUSH_DENSITY {
            let angle = jitter.angle();
            let distance = jitter.next_f32() * radius;
            let falloff = 1.0 - distance / radius;
            let paint = solid_paint(params.color, params.opacity * 0.3 * falloff, params.blend);

            let x = point.x as f32 + angle.cos() * distance;
            let y = point.y as f32 + angle.sin() * distance;
            stamp_dot(pixmap, x, y, 1.0, &paint, transform);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkstone_core::stroke::{Stroke, StrokeStyle};

    fn diagonal_stroke(brush: BrushVariant, tool: ToolKind, pressure: f32) -> Stroke {
        let style = StrokeStyle {
            tool,
            brush,
            base_size: 8.0,
            ..StrokeStyle::default()
        };
        Stroke::from_capture(
            &style,
            vec![
                Point::new(16.0, 16.0, pressure, 0),
                Point::new(32.0, 32.0, pressure, 16),
                Point::new(48.0, 48.0, pressure, 32),
            ],
        )
    }

    fn inked_pixels(pixmap: &Pixmap) -> usize {
        pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    #[test]
    fn test_every_variant_draws_on_a_two_point_stroke() {
        for variant in BrushVariant::ALL {
            let mut pixmap = Pixmap::new(64, 64).unwrap();
            let style = StrokeStyle {
                brush: variant,
                base_size: 8.0,
                ..StrokeStyle::default()
            };
            let stroke = Stroke::from_capture(
                &style,
                vec![Point::new(20.0, 20.0, 0.8, 0), Point::new(44.0, 40.0, 0.6, 16)],
            );

            let mut jitter = Jitter::new(7);
            render_stroke(&mut pixmap, &stroke, Transform::identity(), &mut jitter);
            assert!(
                inked_pixels(&pixmap) > 0,
                "{} drew no pixels",
                variant.name()
            );
        }
    }

    #[test]
    fn test_single_point_stroke_draws_nothing() {
        let mut pixmap = Pixmap::new(64, 64).unwrap();
        let stroke = Stroke::from_capture(
            &StrokeStyle::default(),
            vec![Point::new(32.0, 32.0, 1.0, 0)],
        );

        let mut jitter = Jitter::new(1);
        render_stroke(&mut pixmap, &stroke, Transform::identity(), &mut jitter);
        assert_eq!(inked_pixels(&pixmap), 0);
    }

    #[test]
    fn test_zero_pressure_draws_at_full_width() {
        // Missing pressure data must never produce an invisible stroke.
        for variant in BrushVariant::ALL {
            let mut pixmap = Pixmap::new(64, 64).unwrap();
            let stroke = diagonal_stroke(variant, ToolKind::Ink, 0.0);

            let mut jitter = Jitter::new(3);
            render_stroke(&mut pixmap, &stroke, Transform::identity(), &mut jitter);
            assert!(
                inked_pixels(&pixmap) > 0,
                "{} vanished at zero pressure",
                variant.name()
            );
        }
    }

    #[test]
    fn test_eraser_clears_previously_drawn_pixels() {
        let mut pixmap = Pixmap::new(64, 64).unwrap();

        // Opaque ink pass straight through the middle.
        let ink_style = StrokeStyle {
            brush: BrushVariant::InkPen,
            base_size: 12.0,
            ..StrokeStyle::default()
        };
        let ink = Stroke::from_capture(
            &ink_style,
            vec![Point::new(8.0, 32.0, 1.0, 0), Point::new(56.0, 32.0, 1.0, 16)],
        );
        let mut jitter = Jitter::new(1);
        render_stroke(&mut pixmap, &ink, Transform::identity(), &mut jitter);
        assert_eq!(pixmap.pixel(32, 32).unwrap().alpha(), 255);

        // Full-opacity eraser pass over the same path removes it.
        let eraser_style = StrokeStyle {
            tool: ToolKind::Eraser,
            brush: BrushVariant::InkPen,
            base_size: 12.0,
            ..StrokeStyle::default()
        };
        let eraser = Stroke::from_capture(
            &eraser_style,
            vec![Point::new(8.0, 32.0, 1.0, 32), Point::new(56.0, 32.0, 1.0, 48)],
        );
        render_stroke(&mut pixmap, &eraser, Transform::identity(), &mut jitter);

        // Transparent again, not recolored.
        assert_eq!(pixmap.pixel(32, 32).unwrap().alpha(), 0);
    }

    #[test]
    fn test_eraser_on_empty_surface_leaves_it_empty() {
        let mut pixmap = Pixmap::new(64, 64).unwrap();
        let eraser = diagonal_stroke(BrushVariant::Smooth, ToolKind::Eraser, 1.0);

        let mut jitter = Jitter::new(1);
        render_stroke(&mut pixmap, &eraser, Transform::identity(), &mut jitter);
        assert_eq!(inked_pixels(&pixmap), 0);
    }

    #[test]
    fn test_transform_repositions_the_stroke() {
        let mut at_origin = Pixmap::new(64, 64).unwrap();
        let mut panned = Pixmap::new(64, 64).unwrap();
        let stroke = diagonal_stroke(BrushVariant::Marker, ToolKind::Ink, 1.0);

        let mut jitter = Jitter::new(5);
        render_stroke(&mut at_origin, &stroke, Transform::identity(), &mut jitter);
        render_stroke(
            &mut panned,
            &stroke,
            Transform::from_translate(-16.0, -16.0),
            &mut jitter,
        );

        assert!(at_origin.pixel(32, 32).unwrap().alpha() > 0);
        assert!(panned.pixel(16, 16).unwrap().alpha() > 0);
    }

    #[test]
    fn test_fixed_seed_reproduces_exact_pixels() {
        let stroke = diagonal_stroke(BrushVariant::Spray, ToolKind::Ink, 1.0);

        let mut first = Pixmap::new(64, 64).unwrap();
        let mut second = Pixmap::new(64, 64).unwrap();
        render_stroke(&mut first, &stroke, Transform::identity(), &mut Jitter::new(99));
        render_stroke(&mut second, &stroke, Transform::identity(), &mut Jitter::new(99));

        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn test_marker_is_translucent() {
        let mut pixmap = Pixmap::new(64, 64).unwrap();
        let stroke = diagonal_stroke(BrushVariant::Marker, ToolKind::Ink, 1.0);

        let mut jitter = Jitter::new(1);
        render_stroke(&mut pixmap, &stroke, Transform::identity(), &mut jitter);

        // Opacity x0.6 keeps the marker below full alpha.
        let alpha = pixmap.pixel(32, 32).unwrap().alpha();
        assert!(alpha > 0 && alpha < 255);
    }
}
