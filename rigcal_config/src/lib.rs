#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas for the rig calibration system.
//!
//! `Config` and sub-structs are deserialized from TOML and validated. The
//! runtime config structs live in `rigcal_core::config`; mapping between the
//! two is done by `rigcal_core::conversions`.
use serde::Deserialize;

/// Thresholds and windows for the arm-binding classifier.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
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

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalType {
    #[default]
    Fast,
    Full,
}

/// Session entry and feedback options.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionCfg {
    /// Start a full calibration as soon as the session object is built.
    pub calibrate_on_start: bool,
    /// Calibration type requested when a session starts.
    pub default_type: CalType,
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
            default_type: CalType::Fast,
            hold_to_trigger_s: 0.3,
            haptic_ms: 120,
            per_node_momentary: false,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub classifier: ClassifierCfg,
    pub session: SessionCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Classifier
        if self.classifier.min_shake_count == 0 {
            eyre::bail!("classifier.min_shake_count must be >= 1");
        }
        if self.classifier.acceleration_ratio <= 1.0 {
            eyre::bail!("classifier.acceleration_ratio must be > 1.0");
        }
        if self.classifier.orientation_ratio <= 1.0 {
            eyre::bail!("classifier.orientation_ratio must be > 1.0");
        }
        if self.classifier.acceleration_border <= 0.0 {
            eyre::bail!("classifier.acceleration_border must be > 0.0");
        }
        if !(0.0..1.0).contains(&self.classifier.angle_border) {
            eyre::bail!("classifier.angle_border must be in [0.0, 1.0)");
        }
        if self.classifier.gravity <= 0.0 {
            eyre::bail!("classifier.gravity must be > 0.0");
        }
        if self.classifier.epsilon <= 0.0 {
            eyre::bail!("classifier.epsilon must be > 0.0");
        }
        if self.classifier.shake_window_s <= 0.0 {
            eyre::bail!("classifier.shake_window_s must be > 0.0");
        }
        if self.classifier.arms_down_window_s <= 0.0 {
            eyre::bail!("classifier.arms_down_window_s must be > 0.0");
        }
        if self.classifier.warn_window_s < 0.0 {
            eyre::bail!("classifier.warn_window_s must be >= 0.0");
        }
        if self.classifier.shake_window_s > 60.0 || self.classifier.arms_down_window_s > 60.0 {
            eyre::bail!("classifier gesture windows are unreasonably large (>60s)");
        }

        // Session
        if self.session.hold_to_trigger_s < 0.0 {
            eyre::bail!("session.hold_to_trigger_s must be >= 0.0");
        }
        if self.session.hold_to_trigger_s > 10.0 {
            eyre::bail!("session.hold_to_trigger_s is unreasonably large (>10s)");
        }
        if self.session.haptic_ms == 0 {
            eyre::bail!("session.haptic_ms must be >= 1");
        }

        Ok(())
    }
}
