//! Mapping from the TOML-deserialized schema (`rigcal_config`) to the runtime
//! config structs consumed by the state machines.

use crate::config::{CalibrationType, ClassifierCfg, SessionCfg};

impl From<rigcal_config::CalType> for CalibrationType {
    fn from(ty: rigcal_config::CalType) -> Self {
        match ty {
            rigcal_config::CalType::Full => CalibrationType::Full,
            rigcal_config::CalType::Fast => CalibrationType::Fast,
        }
    }
}

impl From<&rigcal_config::ClassifierCfg> for ClassifierCfg {
    fn from(c: &rigcal_config::ClassifierCfg) -> Self {
        Self {
            min_shake_count: c.min_shake_count,
            acceleration_ratio: c.acceleration_ratio,
            acceleration_border: c.acceleration_border,
            angle_border: c.angle_border,
            orientation_ratio: c.orientation_ratio,
            gravity: c.gravity,
            epsilon: c.epsilon,
            shake_window_s: c.shake_window_s,
            arms_down_window_s: c.arms_down_window_s,
            warn_window_s: c.warn_window_s,
        }
    }
}

impl From<&rigcal_config::SessionCfg> for SessionCfg {
    fn from(c: &rigcal_config::SessionCfg) -> Self {
        Self {
            calibrate_on_start: c.calibrate_on_start,
            default_type: c.default_type.into(),
            hold_to_trigger_s: c.hold_to_trigger_s,
            haptic_ms: c.haptic_ms,
            per_node_momentary: c.per_node_momentary,
        }
    }
}
