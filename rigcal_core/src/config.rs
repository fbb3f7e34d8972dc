//! Runtime configuration for the classifier and session.
//!
//! These are the structs the state machines consume. They are separate from
//! the TOML-deserialized schema in `rigcal_config`; see `conversions`.

/// Which calibration flow a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationType {
    Full,
    Fast,
}

/// Thresholds and windows for the arm-binding classifier.
#[derive(Debug, Clone)]
pub struct ClassifierCfg {
    /// Minimum oscillation reversals before a shake counts.
    pub min_shake_count: u32,
    /// One side's tremble count must dominate the other by this factor.
    pub acceleration_ratio: f32,
    /// Noise floor for the squared-acceleration edge detector.
    pub acceleration_border: f32,
    /// Vertical components below this magnitude are ignored as ambiguous.
    pub angle_border: f32,
    /// One orientation bucket must dominate the other by this factor.
    pub orientation_ratio: f32,
    /// Gravity magnitude used for vertical compensation (m/s²).
    pub gravity: f32,
    /// Division guard for dominance ratios.
    pub epsilon: f32,
    /// Two-node shake gesture window (seconds).
    pub shake_window_s: f32,
    /// One-node arms-down gesture window (seconds).
    pub arms_down_window_s: f32,
    /// Trailing corrective-prompt window (seconds).
    pub warn_window_s: f32,
}

impl Default for ClassifierCfg {
    fn default() -> Self {
        Self {
            min_shake_count: 4,
            acceleration_ratio: 5.0,
            acceleration_border: 30.0,
            angle_border: 0.3,
            orientation_ratio: 2.0,
            gravity: 9.8,
            epsilon: 0.01,
            shake_window_s: 2.5,
            arms_down_window_s: 1.5,
            warn_window_s: 2.0,
        }
    }
}

/// Session entry and feedback options.
#[derive(Debug, Clone)]
pub struct SessionCfg {
    /// Start a full calibration as soon as the session is built.
    pub calibrate_on_start: bool,
    /// Calibration type requested when a session starts.
    pub default_type: CalibrationType,
    /// Hold the designated button this long to trigger calibration (seconds).
    pub hold_to_trigger_s: f32,
    /// Haptic pulse length on calibration feedback (ms).
    pub haptic_ms: u16,
    /// Hardware takes instant per-node calibration instead of the staged flow.
    pub per_node_momentary: bool,
}

impl Default for SessionCfg {
    fn default() -> Self {
        Self {
            calibrate_on_start: true,
            default_type: CalibrationType::Fast,
            hold_to_trigger_s: 0.3,
            haptic_ms: 120,
            per_node_momentary: false,
        }
    }
}
