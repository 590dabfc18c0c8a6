//! Headless driver for the Inkstone drawing surface.
//!
//! Replays a synthetic gesture for every brush variant plus an eraser pass,
//! runs them through the classifier and capture pipeline, and exports the
//! committed document as a PNG.

use inkstone_core::{
    ActiveTool, BrushVariant, CapturePipeline, ClassifierConfig, Color, ContactSample,
    DeviceClass, DocumentHistory, StrokeStyle, ToolKind, ViewportState,
};
use inkstone_render::{export_document, ExportFormat};
use kurbo::Point;

const CANVAS_WIDTH: u32 = 800;
const CANVAS_HEIGHT: u32 = 600;

/// One palette entry per brush row.
const PALETTE: [Color; 10] = [
    Color::new(165, 216, 255, 255),
    Color::new(255, 107, 107, 255),
    Color::new(77, 171, 247, 255),
    Color::new(105, 219, 124, 255),
    Color::new(255, 212, 59, 255),
    Color::new(134, 142, 150, 255),
    Color::new(112, 72, 232, 255),
    Color::new(240, 140, 60, 255),
    Color::new(34, 34, 34, 255),
    Color::new(32, 201, 151, 255),
];

fn main() {
    env_logger::init();
    log::info!("starting inkstone driver");

    let output = std::env::args().nth(1).unwrap_or_else(|| "inkstone.png".to_string());

    let config = ClassifierConfig::default();
    let mut pipeline = CapturePipeline::new();
    let mut history = DocumentHistory::new();
    let mut viewport = ViewportState::new();

    // A palm-sized touch never reaches the document.
    let palm = ContactSample::new(Point::new(400.0, 300.0), 0.0, DeviceClass::Touch, 0)
        .with_contact_size(55.0, 48.0);
    let outcome = pipeline.pointer_down(
        0,
        &palm,
        ActiveTool::Ink,
        &StrokeStyle::default(),
        &config,
        &viewport,
    );
    log::debug!("palm contact outcome: {:?}", outcome);

    // One wavy stroke per brush variant, stacked top to bottom.
    let mut timestamp = 0u64;
    for (row, variant) in BrushVariant::ALL.into_iter().enumerate() {
        let style = StrokeStyle {
            tool: ToolKind::Ink,
            brush: variant,
            color: PALETTE[row],
            base_size: 6.0,
            opacity: 1.0,
            ..StrokeStyle::default()
        };
        let baseline = 50.0 + row as f64 * 55.0;
        let contact_id = row as u64 + 1;

        replay_wave(
            &mut pipeline,
            &mut history,
            &mut viewport,
            &config,
            contact_id,
            &style,
            baseline,
            &mut timestamp,
        );
        log::info!("committed {} stroke", variant.name());
    }

    // An eraser pass cuts a vertical slice through every row.
    let eraser = StrokeStyle {
        tool: ToolKind::Eraser,
        brush: BrushVariant::Marker,
        base_size: 24.0,
        ..StrokeStyle::default()
    };
    let contact_id = 100;
    let down = ContactSample::new(Point::new(420.0, 20.0), 0.9, DeviceClass::Stylus, timestamp);
    pipeline.pointer_down(contact_id, &down, ActiveTool::Eraser, &eraser, &config, &viewport);
    for step in 1..=20 {
        timestamp += 8;
        let sample = ContactSample::new(
            Point::new(420.0, 20.0 + step as f64 * 28.0),
            0.9,
            DeviceClass::Stylus,
            timestamp,
        );
        pipeline.pointer_move(contact_id, &sample, &mut viewport);
    }
    pipeline.pointer_up(contact_id, &mut history);
    log::info!("committed eraser stroke, document holds {} strokes", history.len());

    match export_document(
        &history,
        &viewport,
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        Color::white(),
        ExportFormat::Png,
    ) {
        Ok(image) => {
            if let Err(e) = std::fs::write(&output, &image.bytes) {
                log::error!("failed to write {}: {}", output, e);
                std::process::exit(1);
            }
            log::info!("wrote {} ({} bytes)", output, image.bytes.len());
        }
        Err(e) => {
            log::error!("export failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Replay one down/move/up gesture tracing a gentle sine wave.
#[allow(clippy::too_many_arguments)]
fn replay_wave(
    pipeline: &mut CapturePipeline,
    history: &mut DocumentHistory,
    viewport: &mut ViewportState,
    config: &ClassifierConfig,
    contact_id: u64,
    style: &StrokeStyle,
    baseline: f64,
    timestamp: &mut u64,
) {
    let down = ContactSample::new(Point::new(60.0, baseline), 0.6, DeviceClass::Stylus, *timestamp);
    pipeline.pointer_down(contact_id, &down, ActiveTool::Ink, style, config, viewport);

    for step in 1..=34 {
        *timestamp += 8;
        let x = 60.0 + step as f64 * 20.0;
        let y = baseline + (step as f64 * 0.45).sin() * 14.0;
        // Pressure swells towards the middle of the gesture.
        let pressure = 0.35 + 0.6 * (step as f32 / 34.0 * std::f32::consts::PI).sin();
        let sample = ContactSample::new(Point::new(x, y), pressure, DeviceClass::Stylus, *timestamp);
        pipeline.pointer_move(contact_id, &sample, viewport);
    }

    pipeline.pointer_up(contact_id, history);
}
