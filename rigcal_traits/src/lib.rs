pub mod types;

pub use types::{BindScope, Chirality, NodeSample, NodeType, WarnKind};

/// Per-frame sensor state for the rig's nodes.
///
/// Implementations own the driver-side pose pipeline; samples are expected to
/// be world-frame and already fused upstream.
pub trait SensorSource {
    fn is_connected(&self, node: NodeType) -> bool;

    /// Latest sample for a node, `None` while the node is disconnected.
    fn sample(&mut self, node: NodeType) -> Option<NodeSample>;

    /// Capacitive left/right hint for a controller slot, when the sensor
    /// reports one.
    fn capacitive_hint(&self, side: Chirality) -> Option<Chirality>;
}

/// Node-role assignment commands against the underlying driver.
pub trait RoleControl {
    fn swap_upper_arms(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    fn revert_upper_arm(
        &mut self,
        side: Chirality,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    fn is_upper_arm_reverted(&self, side: Chirality) -> bool;

    /// Commit the current ambiguous-node to role assignment.
    fn bind_upper_arms(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    fn reset_calibration(
        &mut self,
        scope: BindScope,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Instant calibration shortcut; gating is the caller's responsibility.
    fn momentary_calibrate(
        &mut self,
        scope: BindScope,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Persist the node set that completed calibration.
    fn remember_node_set(&mut self, controllers: u8, upper_arms: u8);

    fn forget_remembered_set(&mut self);
}

/// Overall device-orientation tolerance signal, refreshed by the caller once
/// per frame before the session tick consumes it.
pub trait AngleGate {
    fn is_angle_acceptable(&self) -> bool;
}

/// Calibration-flow notifications, delivered in a defined order: session-start
/// before the first stage activation, session-end after the last deactivation.
pub trait Presentation {
    fn session_started(&mut self);
    fn session_ended(&mut self);
    fn activate_stage(&mut self, stage: usize);
    fn deactivate_all(&mut self);
    fn show_warning(&mut self, kind: WarnKind);
    /// Terminal "incorrect node set" screen shown after a mid-session
    /// disconnect, until calibration is explicitly restarted.
    fn show_incorrect_set(&mut self);
    fn haptic_pulse(&mut self, side: Chirality, duration_ms: u16);
}

/// Button state for the designated calibration-trigger controls.
pub trait InputSource {
    /// Went down this frame (edge).
    fn button_down(&self, side: Chirality) -> bool;

    /// Released this frame (edge).
    fn button_up(&self, side: Chirality) -> bool;

    /// Seconds the button has been held so far.
    fn hold_duration(&self, side: Chirality) -> f32;

    /// Bind button on the upper-arm node currently assigned to this role
    /// (edge).
    fn arm_bind_pressed(&self, side: Chirality) -> bool;
}
