//! Inkstone Core Library
//!
//! Platform-agnostic model and input logic for the Inkstone drawing surface:
//! viewport transform, palm-rejecting input classifier, stroke capture
//! pipeline, and the committed document history.

pub mod capture;
pub mod classifier;
pub mod history;
pub mod stroke;
pub mod viewport;

pub use capture::{ActiveTool, CapturePipeline, DownOutcome, MoveOutcome};
pub use classifier::{
    classify, Classification, ClassifierConfig, ContactSample, DeviceClass, ReasonCode,
    RejectionEvent, SensitivityLevel,
};
pub use history::DocumentHistory;
pub use stroke::{BrushVariant, Color, Point, Stroke, StrokeId, StrokeStyle, ToolKind};
pub use viewport::ViewportState;
