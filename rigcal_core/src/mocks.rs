//! Test and helper mocks for rigcal_core

use rigcal_traits::{AngleGate, Chirality, InputSource, Presentation, WarnKind};

/// Presentation sink that drops every notification; useful when driving the
/// session headless.
pub struct NullPresentation;

impl Presentation for NullPresentation {
    fn session_started(&mut self) {}
    fn session_ended(&mut self) {}
    fn activate_stage(&mut self, _stage: usize) {}
    fn deactivate_all(&mut self) {}
    fn show_warning(&mut self, _kind: WarnKind) {}
    fn show_incorrect_set(&mut self) {}
    fn haptic_pulse(&mut self, _side: Chirality, _duration_ms: u16) {}
}

/// Input source with no buttons ever pressed.
pub struct NoInput;

impl InputSource for NoInput {
    fn button_down(&self, _side: Chirality) -> bool {
        false
    }
    fn button_up(&self, _side: Chirality) -> bool {
        false
    }
    fn hold_duration(&self, _side: Chirality) -> f32 {
        0.0
    }
    fn arm_bind_pressed(&self, _side: Chirality) -> bool {
        false
    }
}

/// Angle gate pinned to a fixed answer.
pub struct FixedAngleGate(pub bool);

impl AngleGate for FixedAngleGate {
    fn is_angle_acceptable(&self) -> bool {
        self.0
    }
}
