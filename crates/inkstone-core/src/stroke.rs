//! Stroke data model.

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a committed stroke.
pub type StrokeId = Uuid;

/// One captured point in document space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Pressure in [0, 1]; zero means the source reported none.
    pub pressure: f32,
    /// Capture timestamp in milliseconds.
    pub timestamp_ms: u64,
}

impl Point {
    pub fn new(x: f64, y: f64, pressure: f32, timestamp_ms: u64) -> Self {
        Self {
            x,
            y,
            pressure,
            timestamp_ms,
        }
    }

    /// Pressure for rendering: a missing or zero reading draws at full
    /// weight, never as an invisible segment.
    pub fn pressure_or_full(&self) -> f32 {
        if self.pressure > 0.0 { self.pressure } else { 1.0 }
    }
}

/// RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Kind of mark a committed stroke makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    /// Normal painting.
    #[default]
    Ink,
    /// Destructive composite: removes existing pixels along its path.
    Eraser,
}

/// Brush algorithm used to render an ink stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BrushVariant {
    /// Quadratic curves through segment midpoints, pressure-scaled width.
    #[default]
    Smooth,
    /// Three overlapping jittered thin passes.
    Pencil,
    /// Single wide flat-capped polyline.
    Marker,
    /// Scattered dots around every point.
    Spray,
    /// Width follows the segment angle, like a flat nib.
    Calligraphy,
    /// Four soft layers with growing width and jitter.
    Charcoal,
    /// Wide translucent quadratic curves.
    Watercolor,
    /// Three jittered quadratic passes at full opacity.
    Oil,
    /// Crisp miter-joined polyline.
    InkPen,
    /// Dot cloud with radial opacity falloff.
    Airbrush,
}

impl BrushVariant {
    /// All variants, in picker order.
    pub const ALL: [BrushVariant; 10] = [
        BrushVariant::Smooth,
        BrushVariant::Pencil,
        BrushVariant::Marker,
        BrushVariant::Spray,
        BrushVariant::Calligraphy,
        BrushVariant::Charcoal,
        BrushVariant::Watercolor,
        BrushVariant::Oil,
        BrushVariant::InkPen,
        BrushVariant::Airbrush,
    ];

    /// Display name for pickers and logs.
    pub fn name(self) -> &'static str {
        match self {
            BrushVariant::Smooth => "Smooth",
            BrushVariant::Pencil => "Pencil",
            BrushVariant::Marker => "Marker",
            BrushVariant::Spray => "Spray",
            BrushVariant::Calligraphy => "Calligraphy",
            BrushVariant::Charcoal => "Charcoal",
            BrushVariant::Watercolor => "Watercolor",
            BrushVariant::Oil => "Oil",
            BrushVariant::InkPen => "Ink Pen",
            BrushVariant::Airbrush => "Airbrush",
        }
    }
}

/// Visual style a gesture is captured with.
///
/// Snapshotted at gesture start and stamped onto the committed stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub tool: ToolKind,
    /// Only meaningful when `tool` is [`ToolKind::Ink`].
    pub brush: BrushVariant,
    pub color: Color,
    /// Base width/diameter in document units.
    pub base_size: f32,
    /// Overall opacity in [0, 1].
    pub opacity: f32,
    /// Layer the stroke belongs to. A single flat layer today.
    pub layer: String,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            tool: ToolKind::Ink,
            brush: BrushVariant::Smooth,
            color: Color::black(),
            base_size: 4.0,
            opacity: 1.0,
            layer: "base".to_string(),
        }
    }
}

/// A committed freehand stroke.
///
/// Immutable once committed; owned by the document history. Valid strokes
/// carry at least two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: StrokeId,
    pub tool: ToolKind,
    pub brush: BrushVariant,
    pub color: Color,
    pub base_size: f32,
    pub opacity: f32,
    /// Points in capture order, document space.
    pub points: Vec<Point>,
    pub layer: String,
}

impl Stroke {
    /// Build a stroke from a finished capture buffer and its style.
    pub fn from_capture(style: &StrokeStyle, points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tool: style.tool,
            brush: style.brush,
            color: style.color,
            base_size: style.base_size,
            opacity: style.opacity,
            points,
            layer: style.layer.clone(),
        }
    }

    /// A stroke needs at least two points to draw anything.
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bounding box of the point path, ignoring brush width.
    pub fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }
}
