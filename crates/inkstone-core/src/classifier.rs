//! Input classification for palm rejection.
//!
//! Decides whether a contact sample should produce ink, based on the input
//! device class and the physical contact geometry reported by the sensor.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Class of input device that produced a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    /// Active stylus / pen tip.
    Stylus,
    /// Finger (or palm) on a touch sensor.
    Touch,
    /// Mouse or other pointing device.
    Mouse,
}

/// One raw pointer-contact sample in screen space.
///
/// Ephemeral: produced by the input source and consumed immediately by the
/// classifier and capture pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactSample {
    /// Position in screen coordinates.
    pub position: Point,
    /// Reported pressure in [0, 1]. Zero means the source reports none.
    pub pressure: f32,
    /// Contact patch width in logical units (0 when not reported).
    pub contact_width: f32,
    /// Contact patch height in logical units (0 when not reported).
    pub contact_height: f32,
    /// Device class of the contact.
    pub device_class: DeviceClass,
    /// Sample timestamp in milliseconds.
    pub timestamp_ms: u64,
}

impl ContactSample {
    /// Create a sample with no contact geometry (mouse-style input).
    pub fn new(position: Point, pressure: f32, device_class: DeviceClass, timestamp_ms: u64) -> Self {
        Self {
            position,
            pressure,
            contact_width: 0.0,
            contact_height: 0.0,
            device_class,
            timestamp_ms,
        }
    }

    /// Set the contact patch dimensions.
    pub fn with_contact_size(mut self, width: f32, height: f32) -> Self {
        self.contact_width = width;
        self.contact_height = height;
        self
    }
}

/// Palm rejection sensitivity level.
///
/// Named levels carry their own contact-size thresholds and take precedence
/// over the limits configured on [`ClassifierConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SensitivityLevel {
    /// Forgiving 40x40 contact limit.
    Low,
    /// Balanced 20x20 contact limit.
    #[default]
    Medium,
    /// Strict 12x12 contact limit, fingertips only.
    High,
    /// Reject every non-stylus contact.
    StylusOnly,
}

/// Classifier configuration, read fresh on every decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Active sensitivity level.
    pub level: SensitivityLevel,
    /// Fallback contact width limit, overridden by any named level.
    pub max_contact_width: f32,
    /// Fallback contact height limit, overridden by any named level.
    pub max_contact_height: f32,
    /// Reserved: require a non-zero pressure reading. Not consulted by
    /// [`classify`]; kept as configuration surface for the settings UI.
    pub require_pressure: bool,
    /// When set, callers record a [`RejectionEvent`] for every reject.
    pub debug_mode: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            level: SensitivityLevel::default(),
            max_contact_width: 20.0,
            max_contact_height: 20.0,
            require_pressure: false,
            debug_mode: false,
        }
    }
}

/// Why a sample was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReasonCode {
    /// Stylus input is always trusted.
    StylusDetected,
    /// Non-stylus contact while in stylus-only mode.
    StylusOnlyMode,
    /// Contact patch larger than the active threshold. Carries the measured
    /// dimensions, rounded for diagnostics.
    PalmSizeDetected { width: u32, height: u32 },
    /// Touch contact within the size threshold.
    ValidTouch,
}

/// Outcome of classifying one contact sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Whether the sample may produce ink.
    pub accept: bool,
    /// Reason for the decision.
    pub reason: ReasonCode,
}

impl Classification {
    fn accept(reason: ReasonCode) -> Self {
        Self { accept: true, reason }
    }

    fn reject(reason: ReasonCode) -> Self {
        Self { accept: false, reason }
    }
}

/// A rejected contact, recorded for the debug overlay.
///
/// Purely observational; never affects the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RejectionEvent {
    /// Screen x of the rejected contact.
    pub x: f64,
    /// Screen y of the rejected contact.
    pub y: f64,
    /// Why it was rejected.
    pub reason: ReasonCode,
}

impl RejectionEvent {
    /// Record a rejection at the sample's screen position.
    pub fn new(sample: &ContactSample, reason: ReasonCode) -> Self {
        Self {
            x: sample.position.x,
            y: sample.position.y,
            reason,
        }
    }
}

/// Classify a contact sample against the current configuration.
///
/// Pure and deterministic. Rules are evaluated in order:
///
/// 1. Stylus contacts are accepted unconditionally.
/// 2. In stylus-only mode every other device class is rejected.
/// 3. Contacts larger than the active size threshold are rejected as palms.
///    The threshold value itself is still accepted.
/// 4. Anything else is a valid touch.
///
/// Speed and multi-touch arbitration are deliberately not evaluated here;
/// ownership of concurrent contacts is the capture pipeline's concern.
pub fn classify(sample: &ContactSample, config: &ClassifierConfig) -> Classification {
    if sample.device_class == DeviceClass::Stylus {
        return Classification::accept(ReasonCode::StylusDetected);
    }

    if config.level == SensitivityLevel::StylusOnly {
        return Classification::reject(ReasonCode::StylusOnlyMode);
    }

    let mut width_threshold = config.max_contact_width;
    let mut height_threshold = config.max_contact_height;
    match config.level {
        SensitivityLevel::High => {
            width_threshold = 12.0;
            height_threshold = 12.0;
        }
        SensitivityLevel::Medium => {
            width_threshold = 20.0;
            height_threshold = 20.0;
        }
        SensitivityLevel::Low => {
            width_threshold = 40.0;
            height_threshold = 40.0;
        }
        SensitivityLevel::StylusOnly => {}
    }

    if sample.contact_width > width_threshold || sample.contact_height > height_threshold {
        return Classification::reject(ReasonCode::PalmSizeDetected {
            width: sample.contact_width.round() as u32,
            height: sample.contact_height.round() as u32,
        });
    }

    Classification::accept(ReasonCode::ValidTouch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(width: f32, height: f32) -> ContactSample {
        ContactSample::new(Point::new(50.0, 50.0), 0.5, DeviceClass::Touch, 0)
            .with_contact_size(width, height)
    }

    fn config(level: SensitivityLevel) -> ClassifierConfig {
        ClassifierConfig {
            level,
            ..ClassifierConfig::default()
        }
    }

    #[test]
    fn test_stylus_always_accepted() {
        // Even a palm-sized stylus contact in stylus-only mode passes.
        let sample = ContactSample::new(Point::new(0.0, 0.0), 0.0, DeviceClass::Stylus, 0)
            .with_contact_size(90.0, 90.0);

        for level in [
            SensitivityLevel::Low,
            SensitivityLevel::Medium,
            SensitivityLevel::High,
            SensitivityLevel::StylusOnly,
        ] {
            let result = classify(&sample, &config(level));
            assert!(result.accept);
            assert_eq!(result.reason, ReasonCode::StylusDetected);
        }
    }

    #[test]
    fn test_stylus_only_rejects_touch_and_mouse() {
        let cfg = config(SensitivityLevel::StylusOnly);

        let result = classify(&touch(1.0, 1.0), &cfg);
        assert!(!result.accept);
        assert_eq!(result.reason, ReasonCode::StylusOnlyMode);

        let mouse = ContactSample::new(Point::new(0.0, 0.0), 0.0, DeviceClass::Mouse, 0);
        assert!(!classify(&mouse, &cfg).accept);
    }

    #[test]
    fn test_palm_rejected_above_threshold() {
        let result = classify(&touch(13.0, 5.0), &config(SensitivityLevel::High));
        assert!(!result.accept);
        assert_eq!(
            result.reason,
            ReasonCode::PalmSizeDetected { width: 13, height: 5 }
        );
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        // Exactly at the limit is still a valid touch.
        let result = classify(&touch(12.0, 12.0), &config(SensitivityLevel::High));
        assert!(result.accept);
        assert_eq!(result.reason, ReasonCode::ValidTouch);
    }

    #[test]
    fn test_named_level_overrides_config_limits() {
        // Config claims 100x100, but Medium pins the threshold at 20x20.
        let cfg = ClassifierConfig {
            level: SensitivityLevel::Medium,
            max_contact_width: 100.0,
            max_contact_height: 100.0,
            ..ClassifierConfig::default()
        };
        assert!(!classify(&touch(25.0, 25.0), &cfg).accept);
        assert!(classify(&touch(19.0, 19.0), &cfg).accept);
    }

    #[test]
    fn test_levels_scale_thresholds() {
        let palm = touch(30.0, 30.0);
        assert!(classify(&palm, &config(SensitivityLevel::Low)).accept);
        assert!(!classify(&palm, &config(SensitivityLevel::Medium)).accept);
        assert!(!classify(&palm, &config(SensitivityLevel::High)).accept);
    }

    #[test]
    fn test_default_config_is_medium() {
        let cfg = ClassifierConfig::default();
        assert_eq!(cfg.level, SensitivityLevel::Medium);
        assert!(!cfg.debug_mode);
    }

    #[test]
    fn test_missing_contact_size_accepted() {
        // A sample with no reported geometry must not be rejected outright.
        let bare = ContactSample::new(Point::new(10.0, 10.0), 0.0, DeviceClass::Touch, 0);
        assert!(classify(&bare, &ClassifierConfig::default()).accept);
    }

    #[test]
    fn test_rejection_event_records_position() {
        let sample = touch(50.0, 50.0);
        let result = classify(&sample, &config(SensitivityLevel::High));
        let event = RejectionEvent::new(&sample, result.reason);
        assert_eq!(event.x, 50.0);
        assert_eq!(event.y, 50.0);
        assert_eq!(event.reason, result.reason);
    }
}
