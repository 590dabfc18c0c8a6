//! Stroke capture pipeline.
//!
//! Owns the transient point buffer for the in-progress gesture and turns a
//! down/move/up contact stream into committed strokes. At most one contact
//! owns input at a time; a second contact arriving mid-gesture is ignored
//! entirely, never queued.

use crate::classifier::{classify, ClassifierConfig, ContactSample, ReasonCode, RejectionEvent};
use crate::history::DocumentHistory;
use crate::stroke::{Point, Stroke, StrokeId, StrokeStyle, ToolKind};
use crate::viewport::ViewportState;

/// Rejections kept for the debug overlay.
const REJECTION_LOG_CAPACITY: usize = 6;

/// Pressure stamped onto captured points when the source reports none.
const DEFAULT_CAPTURE_PRESSURE: f32 = 0.5;

/// Tool selection driving the pipeline's mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTool {
    /// Capture points and commit an ink stroke.
    #[default]
    Ink,
    /// Capture points and commit an eraser stroke.
    Eraser,
    /// Contact motion pans the viewport; no stroke is produced.
    Pan,
}

/// Result of feeding a down sample to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownOutcome {
    /// The classifier refused the contact; nothing started.
    Rejected(ReasonCode),
    /// Another contact already owns input; this one is dropped.
    Ignored,
    /// A pan gesture started.
    PanStarted,
    /// A capture gesture started and the buffer was seeded.
    Started,
}

/// Result of feeding a move sample to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Sample did not belong to the owning contact.
    Ignored,
    /// The viewport pan offset was updated.
    Panned,
    /// A point was appended to the draft buffer; redraw the preview.
    Buffered,
}

/// Per-gesture capture state machine.
#[derive(Debug, Clone, Default)]
pub struct CapturePipeline {
    /// Contact id currently owning input, if any.
    owner: Option<u64>,
    /// Document-space points of the in-progress gesture.
    buffer: Vec<Point>,
    /// Style snapshotted at gesture start.
    style: StrokeStyle,
    /// True while the owning contact is panning instead of drawing.
    panning: bool,
    /// Last pan sample position, screen space.
    last_pan: Option<kurbo::Point>,
    /// Recent rejections, recorded only in debug mode.
    rejections: Vec<RejectionEvent>,
}

impl CapturePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a contact going down.
    ///
    /// Only the down sample is classified; once a contact is captured its
    /// later samples are trusted implicitly, since the device class cannot
    /// change mid-gesture. `style.tool` is overridden by the active tool
    /// selection.
    pub fn pointer_down(
        &mut self,
        contact_id: u64,
        sample: &ContactSample,
        tool: ActiveTool,
        style: &StrokeStyle,
        config: &ClassifierConfig,
        viewport: &ViewportState,
    ) -> DownOutcome {
        let decision = classify(sample, config);
        if !decision.accept {
            log::trace!(
                "contact {} rejected at ({:.1}, {:.1}): {:?}",
                contact_id,
                sample.position.x,
                sample.position.y,
                decision.reason
            );
            if config.debug_mode {
                self.record_rejection(RejectionEvent::new(sample, decision.reason));
            }
            return DownOutcome::Rejected(decision.reason);
        }

        if self.owner.is_some() {
            return DownOutcome::Ignored;
        }
        self.owner = Some(contact_id);

        if tool == ActiveTool::Pan {
            self.panning = true;
            self.last_pan = Some(sample.position);
            return DownOutcome::PanStarted;
        }

        self.style = StrokeStyle {
            tool: match tool {
                ActiveTool::Eraser => ToolKind::Eraser,
                _ => ToolKind::Ink,
            },
            ..style.clone()
        };
        self.buffer.clear();
        self.buffer.push(self.document_point(sample, viewport));
        DownOutcome::Started
    }

    /// Handle a move sample from any contact.
    ///
    /// Pan gestures apply the per-move screen delta to the viewport; capture
    /// gestures append a document-space point. The committed document is
    /// never touched here — callers forward [`draft_points`] to the preview
    /// renderer after a `Buffered` outcome.
    ///
    /// [`draft_points`]: CapturePipeline::draft_points
    pub fn pointer_move(
        &mut self,
        contact_id: u64,
        sample: &ContactSample,
        viewport: &mut ViewportState,
    ) -> MoveOutcome {
        if self.owner != Some(contact_id) {
            return MoveOutcome::Ignored;
        }

        if self.panning {
            if let Some(last) = self.last_pan {
                viewport.pan_by(sample.position - last);
            }
            self.last_pan = Some(sample.position);
            return MoveOutcome::Panned;
        }

        let point = self.document_point(sample, viewport);
        self.buffer.push(point);
        MoveOutcome::Buffered
    }

    /// Handle the owning contact being released.
    ///
    /// A buffer of two or more points is committed as a stroke; a tap with no
    /// drag is discarded silently. Ownership is released and the buffer
    /// cleared either way, and the caller clears the preview surface.
    pub fn pointer_up(
        &mut self,
        contact_id: u64,
        history: &mut DocumentHistory,
    ) -> Option<StrokeId> {
        if self.owner != Some(contact_id) {
            return None;
        }

        let was_panning = self.panning;
        self.owner = None;
        self.panning = false;
        self.last_pan = None;

        let points = std::mem::take(&mut self.buffer);
        if was_panning || points.len() < 2 {
            return None;
        }

        let stroke = Stroke::from_capture(&self.style, points);
        Some(history.append(stroke))
    }

    /// Handle the owning contact being cancelled.
    ///
    /// Shares the release path so a lost contact can never leave the
    /// pipeline stuck in a capturing state.
    pub fn pointer_cancel(
        &mut self,
        contact_id: u64,
        history: &mut DocumentHistory,
    ) -> Option<StrokeId> {
        self.pointer_up(contact_id, history)
    }

    /// Points of the in-progress gesture, document space.
    pub fn draft_points(&self) -> &[Point] {
        &self.buffer
    }

    /// Style of the in-progress gesture.
    pub fn draft_style(&self) -> &StrokeStyle {
        &self.style
    }

    /// True while a contact owns input and is accumulating points.
    pub fn is_capturing(&self) -> bool {
        self.owner.is_some() && !self.panning
    }

    /// True while a contact owns input and is panning.
    pub fn is_panning(&self) -> bool {
        self.owner.is_some() && self.panning
    }

    /// Recent rejections (debug mode only), oldest first.
    pub fn rejection_log(&self) -> &[RejectionEvent] {
        &self.rejections
    }

    /// Drop the recorded rejections.
    pub fn clear_rejection_log(&mut self) {
        self.rejections.clear();
    }

    fn record_rejection(&mut self, event: RejectionEvent) {
        if self.rejections.len() >= REJECTION_LOG_CAPACITY {
            self.rejections.remove(0);
        }
        self.rejections.push(event);
    }

    fn document_point(&self, sample: &ContactSample, viewport: &ViewportState) -> Point {
        let doc = viewport.screen_to_document(sample.position);
        let pressure = if sample.pressure > 0.0 {
            sample.pressure
        } else {
            DEFAULT_CAPTURE_PRESSURE
        };
        Point::new(doc.x, doc.y, pressure, sample.timestamp_ms)
    }
}
