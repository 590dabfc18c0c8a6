//! Document history: committed strokes plus the redo buffer.

use crate::stroke::{Stroke, StrokeId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from document serialization.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Ordered list of committed strokes with undo/redo.
///
/// The stroke list is the document: rendering `committed` oldest-first is the
/// current canvas state. Order is significant because an eraser stroke is a
/// destructive composite over everything drawn before it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentHistory {
    /// Committed strokes, oldest first.
    committed: Vec<Stroke>,
    /// Strokes removed by undo, most recently undone last.
    #[serde(skip)]
    redo_buffer: Vec<Stroke>,
}

impl DocumentHistory {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a stroke. Any redoable strokes are permanently discarded.
    pub fn append(&mut self, stroke: Stroke) -> StrokeId {
        let id = stroke.id;
        log::debug!(
            "committing stroke {} ({} points, {:?})",
            id,
            stroke.len(),
            stroke.tool
        );
        self.committed.push(stroke);
        self.redo_buffer.clear();
        id
    }

    /// Undo the most recent stroke.
    /// Returns true if a stroke was moved, false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if let Some(stroke) = self.committed.pop() {
            self.redo_buffer.push(stroke);
            true
        } else {
            false
        }
    }

    /// Redo the most recently undone stroke, restoring it at the tail.
    /// Returns true if a stroke was moved, false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        if let Some(stroke) = self.redo_buffer.pop() {
            self.committed.push(stroke);
            true
        } else {
            false
        }
    }

    /// Drop every stroke, committed and redoable.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.redo_buffer.clear();
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_buffer.is_empty()
    }

    /// Committed strokes in draw order (oldest first).
    pub fn strokes(&self) -> &[Stroke] {
        &self.committed
    }

    /// Number of committed strokes.
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    /// Serialize the committed document to JSON.
    pub fn to_json(&self) -> Result<String, HistoryError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a document from JSON. The redo buffer starts empty.
    pub fn from_json(json: &str) -> Result<Self, HistoryError> {
        Ok(serde_json::from_str(json)?)
    }
}
