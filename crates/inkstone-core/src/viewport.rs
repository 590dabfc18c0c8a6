//! Viewport module for the pan transform.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Viewport state for the drawing surface.
///
/// It tracks the pan offset and converts between screen coordinates (raw
/// pointer input) and document coordinates (stored stroke points). Zoom is
/// reserved for a later revision; only translation is applied today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Current translation offset (pan) in screen units.
    pub pan_offset: Vec2,
}

impl ViewportState {
    /// Create a viewport at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a screen point to document coordinates.
    pub fn screen_to_document(&self, screen_point: Point) -> Point {
        screen_point - self.pan_offset
    }

    /// Convert a document point to screen coordinates.
    pub fn document_to_screen(&self, document_point: Point) -> Point {
        document_point + self.pan_offset
    }

    /// Pan the viewport by a delta in screen coordinates.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan_offset += delta;
    }

    /// Reset the pan offset to the origin.
    pub fn reset(&mut self) {
        self.pan_offset = Vec2::ZERO;
    }
}
