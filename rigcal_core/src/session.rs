//! The guided calibration session.
//!
//! Owns the stage state machine, the hold-to-trigger entry path, the
//! momentary fast path, and the wiring between the arm-binding classifier and
//! the driver's role-control commands. Everything runs inside one synchronous
//! per-frame `tick`.

use eyre::WrapErr;
use rigcal_traits::{
    AngleGate, BindScope, Chirality, InputSource, NodeType, Presentation, RoleControl, SensorSource,
};

use crate::classifier::{ArmBindingClassifier, Commit, Verdict};
use crate::config::{CalibrationType, ClassifierCfg, SessionCfg};
use crate::error::{BuildError, Report, ResetReason, Result, map_driver_error};
use crate::latch::HoldLatch;
use crate::stages::{Stage, StagePlan};

/// Where the session currently is in its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    Idle,
    Running(usize),
    Completed,
}

impl StageState {
    pub fn is_running(self) -> bool {
        matches!(self, StageState::Running(_))
    }
}

/// Builder for [`CalibrationSession`]; validates the plan and config before
/// handing out a session.
pub struct SessionBuilder<S, R, P, I, G> {
    sensors: S,
    roles: R,
    presentation: P,
    input: I,
    gate: G,
    classifier_cfg: ClassifierCfg,
    session_cfg: SessionCfg,
    plan: StagePlan,
}

impl<S, R, P, I, G> SessionBuilder<S, R, P, I, G>
where
    S: SensorSource,
    R: RoleControl,
    P: Presentation,
    I: InputSource,
    G: AngleGate,
{
    pub fn new(sensors: S, roles: R, presentation: P, input: I, gate: G) -> Self {
        Self {
            sensors,
            roles,
            presentation,
            input,
            gate,
            classifier_cfg: ClassifierCfg::default(),
            session_cfg: SessionCfg::default(),
            plan: StagePlan::default(),
        }
    }

    pub fn with_classifier_cfg(mut self, cfg: ClassifierCfg) -> Self {
        self.classifier_cfg = cfg;
        self
    }

    pub fn with_session_cfg(mut self, cfg: SessionCfg) -> Self {
        self.session_cfg = cfg;
        self
    }

    pub fn with_plan(mut self, plan: StagePlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn build(self) -> Result<CalibrationSession<S, R, P, I, G>> {
        if self.plan.full.is_empty() || self.plan.fast.is_empty() {
            return Err(Report::new(BuildError::EmptyPlan));
        }
        if self.classifier_cfg.shake_window_s <= 0.0
            || self.classifier_cfg.arms_down_window_s <= 0.0
        {
            return Err(Report::new(BuildError::InvalidConfig(
                "gesture windows must be positive",
            )));
        }
        if self.classifier_cfg.warn_window_s < 0.0 {
            return Err(Report::new(BuildError::InvalidConfig(
                "warn window must be non-negative",
            )));
        }

        let calibrate_on_start = self.session_cfg.calibrate_on_start;
        let mut session = CalibrationSession {
            sensors: self.sensors,
            roles: self.roles,
            presentation: self.presentation,
            input: self.input,
            gate: self.gate,
            cfg: self.session_cfg,
            plan: self.plan,
            classifier: ArmBindingClassifier::new(self.classifier_cfg),
            stage: StageState::Idle,
            calibration_type: CalibrationType::Full,
            left_hold: HoldLatch::default(),
            right_hold: HoldLatch::default(),
            paused: false,
            required_nodes: Vec::new(),
            last_reset: None,
        };

        if calibrate_on_start {
            session.calibrate(CalibrationType::Full)?;
        }

        Ok(session)
    }
}

/// Calibration-stage state machine over the rig's collaborator contracts.
pub struct CalibrationSession<S, R, P, I, G> {
    sensors: S,
    roles: R,
    presentation: P,
    input: I,
    gate: G,
    cfg: SessionCfg,
    plan: StagePlan,
    classifier: ArmBindingClassifier,
    stage: StageState,
    calibration_type: CalibrationType,
    left_hold: HoldLatch,
    right_hold: HoldLatch,
    paused: bool,
    // Node set captured at session start; losing any of these aborts.
    required_nodes: Vec<NodeType>,
    last_reset: Option<ResetReason>,
}

impl<S, R, P, I, G> CalibrationSession<S, R, P, I, G>
where
    S: SensorSource,
    R: RoleControl,
    P: Presentation,
    I: InputSource,
    G: AngleGate,
{
    pub fn builder(
        sensors: S,
        roles: R,
        presentation: P,
        input: I,
        gate: G,
    ) -> SessionBuilder<S, R, P, I, G> {
        SessionBuilder::new(sensors, roles, presentation, input, gate)
    }

    pub fn is_active(&self) -> bool {
        self.stage.is_running()
    }

    pub fn stage(&self) -> StageState {
        self.stage
    }

    pub fn calibration_type(&self) -> CalibrationType {
        self.calibration_type
    }

    pub fn last_reset(&self) -> Option<ResetReason> {
        self.last_reset
    }

    /// Latch an application pause; the first tick after resume forces a full
    /// recalibration.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused |= paused;
    }

    /// Start (or restart) the guided flow with the given type.
    pub fn calibrate(&mut self, ty: CalibrationType) -> Result<()> {
        if self.is_active() {
            self.last_reset = Some(ResetReason::Restarted);
        }
        self.calibration_type = ty;
        tracing::info!(?ty, "calibration requested");
        self.load_step(0)
    }

    /// Advance a host-driven guide stage. No-op unless a session is running.
    pub fn advance(&mut self) -> Result<()> {
        match self.stage {
            StageState::Running(step) => self.load_step(step + 1),
            _ => Ok(()),
        }
    }

    /// One frame of the session. `dt` is the elapsed time for this frame in
    /// seconds; skipped frames pause every countdown.
    pub fn tick(&mut self, dt: f32) -> Result<StageState> {
        if self.paused {
            self.paused = false;
            tracing::info!("resumed from pause, forcing full recalibration");
            self.calibrate(CalibrationType::Full)?;
            self.last_reset = Some(ResetReason::EnvironmentShift);
        }

        self.check_connectivity();
        self.update_hold_latches();
        self.try_calibrate()?;

        if let StageState::Running(step) = self.stage
            && self.current_plan().get(step) == Some(&Stage::BindArms)
        {
            self.drive_binding(dt)?;
        }

        Ok(self.stage)
    }

    // ── Stage transitions ────────────────────────────────────────────────

    fn current_plan(&self) -> &[Stage] {
        self.plan.stages(self.calibration_type)
    }

    fn load_step(&mut self, step: usize) -> Result<()> {
        self.presentation.deactivate_all();

        let len = self.current_plan().len();
        if step == 0 {
            self.required_nodes = self.connected_nodes();
            self.presentation.session_started();
            tracing::info!(stages = len, ty = ?self.calibration_type, "calibration started");
        }

        if step < len {
            let kind = self.current_plan()[step];
            self.stage = StageState::Running(step);
            self.presentation.activate_stage(step);
            tracing::debug!(step, ?kind, "stage activated");
            if kind == Stage::BindArms {
                self.enter_binding()?;
            }
        } else {
            self.stage = StageState::Completed;
            self.presentation.session_ended();
            tracing::info!("calibration ended");
        }

        Ok(())
    }

    fn enter_binding(&mut self) -> Result<()> {
        // Start from a clean sensor frame on both sides.
        for side in [Chirality::Left, Chirality::Right] {
            if self.roles.is_upper_arm_reverted(side) {
                self.roles
                    .revert_upper_arm(side)
                    .map_err(|e| Report::new(map_driver_error(&*e)))
                    .wrap_err("clear upper-arm revert")?;
            }
        }
        self.roles
            .reset_calibration(BindScope::Both)
            .map_err(|e| Report::new(map_driver_error(&*e)))
            .wrap_err("reset calibration")?;

        let left_ctl = self.sensors.is_connected(NodeType::LeftHand);
        let right_ctl = self.sensors.is_connected(NodeType::RightHand);
        let left_arm = self.sensors.is_connected(NodeType::LeftUpperArm);
        let right_arm = self.sensors.is_connected(NodeType::RightUpperArm);
        let arm_count = usize::from(left_arm) + usize::from(right_arm);

        // A single arm node paired with the opposite controller starts on the
        // wrong side; swap it over before classifying.
        let crossed = (right_ctl && left_arm) || (left_ctl && right_arm);
        if arm_count == 1 && crossed {
            self.roles
                .swap_upper_arms()
                .map_err(|e| Report::new(map_driver_error(&*e)))
                .wrap_err("pre-swap single upper arm")?;
        }

        self.classifier.begin(arm_count);
        Ok(())
    }

    // ── Entry path ───────────────────────────────────────────────────────

    fn update_hold_latches(&mut self) {
        let may_arm = !self.is_active();
        self.left_hold.update(
            self.input.button_down(Chirality::Left),
            self.input.button_up(Chirality::Left),
            may_arm,
        );
        self.right_hold.update(
            self.input.button_down(Chirality::Right),
            self.input.button_up(Chirality::Right),
            may_arm,
        );
    }

    fn try_calibrate(&mut self) -> Result<()> {
        let left_conn = self.sensors.is_connected(NodeType::LeftHand);
        let right_conn = self.sensors.is_connected(NodeType::RightHand);
        let left_held = self.left_hold.is_armed()
            && self.input.hold_duration(Chirality::Left) > self.cfg.hold_to_trigger_s;
        let right_held = self.right_hold.is_armed()
            && self.input.hold_duration(Chirality::Right) > self.cfg.hold_to_trigger_s;
        let left_ready = !left_conn || left_held;
        let right_ready = !right_conn || right_held;
        let all_nodes = self.all_playable_connected();
        let fast_requested = self.cfg.default_type == CalibrationType::Fast && all_nodes;

        if fast_requested && self.cfg.per_node_momentary {
            // Hardware takes instant per-node calibration; no staged session.
            if left_conn && left_held {
                self.left_hold.consume();
                self.presentation
                    .haptic_pulse(Chirality::Left, self.cfg.haptic_ms);
                self.roles
                    .momentary_calibrate(BindScope::Left)
                    .map_err(|e| Report::new(map_driver_error(&*e)))
                    .wrap_err("momentary calibrate left")?;
                tracing::info!("momentary per-node calibration applied (left)");
            }
            if right_conn && right_held {
                self.right_hold.consume();
                self.presentation
                    .haptic_pulse(Chirality::Right, self.cfg.haptic_ms);
                self.roles
                    .momentary_calibrate(BindScope::Right)
                    .map_err(|e| Report::new(map_driver_error(&*e)))
                    .wrap_err("momentary calibrate right")?;
                tracing::info!("momentary per-node calibration applied (right)");
            }
            return Ok(());
        }

        let controller_count = usize::from(left_conn) + usize::from(right_conn);
        if controller_count > 0 && left_ready && right_ready && !self.is_active() {
            self.left_hold.consume();
            self.right_hold.consume();

            self.reset_preserving_reverts()?;

            let left_cap_ok = !left_conn
                || self.sensors.capacitive_hint(Chirality::Left) == Some(Chirality::Left);
            let right_cap_ok = !right_conn
                || self.sensors.capacitive_hint(Chirality::Right) == Some(Chirality::Right);
            let momentary =
                fast_requested && left_cap_ok && right_cap_ok && self.gate.is_angle_acceptable();

            if momentary {
                self.presentation
                    .haptic_pulse(Chirality::Left, self.cfg.haptic_ms);
                self.presentation
                    .haptic_pulse(Chirality::Right, self.cfg.haptic_ms);
                self.roles
                    .momentary_calibrate(BindScope::Both)
                    .map_err(|e| Report::new(map_driver_error(&*e)))
                    .wrap_err("momentary calibrate")?;
                tracing::info!("momentary calibration applied");
            } else {
                if !all_nodes {
                    self.roles.forget_remembered_set();
                }
                let ty = if all_nodes {
                    self.cfg.default_type
                } else {
                    CalibrationType::Full
                };
                self.calibrate(ty)?;
            }
        }

        Ok(())
    }

    /// Reset driver calibration while keeping prior sensor-frame reverts.
    fn reset_preserving_reverts(&mut self) -> Result<()> {
        let left_rev = self.roles.is_upper_arm_reverted(Chirality::Left);
        let right_rev = self.roles.is_upper_arm_reverted(Chirality::Right);

        self.roles
            .reset_calibration(BindScope::Both)
            .map_err(|e| Report::new(map_driver_error(&*e)))
            .wrap_err("reset calibration")?;

        if left_rev {
            self.roles
                .revert_upper_arm(Chirality::Left)
                .map_err(|e| Report::new(map_driver_error(&*e)))
                .wrap_err("restore left revert")?;
        }
        if right_rev {
            self.roles
                .revert_upper_arm(Chirality::Right)
                .map_err(|e| Report::new(map_driver_error(&*e)))
                .wrap_err("restore right revert")?;
        }

        Ok(())
    }

    // ── Binding stage ────────────────────────────────────────────────────

    fn drive_binding(&mut self, dt: f32) -> Result<()> {
        let arms = self.upper_arm_count();
        let controllers = self.controller_count();

        // Stage not applicable: nothing to classify when the rig has fewer
        // arm nodes than controllers.
        if arms == 0 || arms < controllers {
            return self.commit_binding(Commit::accept());
        }

        for side in [Chirality::Left, Chirality::Right] {
            if self.input.arm_bind_pressed(side) {
                let swap = self.classifier.manual_bind(side);
                if swap {
                    self.roles
                        .swap_upper_arms()
                        .map_err(|e| Report::new(map_driver_error(&*e)))
                        .wrap_err("manual swap")?;
                }
                tracing::debug!(?side, swap, "manual chirality bind");
            }
        }

        let left = self.sensors.sample(NodeType::LeftUpperArm);
        let right = self.sensors.sample(NodeType::RightUpperArm);

        match self.classifier.update(left.as_ref(), right.as_ref(), dt) {
            Verdict::Collecting => {}
            Verdict::ChiralityLocked { swap } => {
                if swap {
                    self.roles
                        .swap_upper_arms()
                        .map_err(|e| Report::new(map_driver_error(&*e)))
                        .wrap_err("swap upper arms")?;
                }
            }
            Verdict::Commit(commit) => {
                self.commit_binding(commit)?;
            }
            Verdict::Warn(kind) => {
                tracing::debug!(?kind, "binding inconclusive");
                self.presentation.show_warning(kind);
            }
            Verdict::Expired => {
                tracing::debug!("binding window expired, restarting");
            }
        }

        Ok(())
    }

    fn commit_binding(&mut self, commit: Commit) -> Result<()> {
        if commit.swap_left_right {
            self.roles
                .swap_upper_arms()
                .map_err(|e| Report::new(map_driver_error(&*e)))
                .wrap_err("swap upper arms")?;
        }
        if commit.revert_left {
            self.roles
                .revert_upper_arm(Chirality::Left)
                .map_err(|e| Report::new(map_driver_error(&*e)))
                .wrap_err("revert left upper arm")?;
        }
        if commit.revert_right {
            self.roles
                .revert_upper_arm(Chirality::Right)
                .map_err(|e| Report::new(map_driver_error(&*e)))
                .wrap_err("revert right upper arm")?;
        }

        self.roles
            .bind_upper_arms()
            .map_err(|e| Report::new(map_driver_error(&*e)))
            .wrap_err("bind upper arms")?;

        let controllers = self.controller_count() as u8;
        let arms = self.upper_arm_count() as u8;
        self.roles
            .remember_node_set(controllers, if controllers > arms { 0 } else { controllers });

        tracing::info!(
            swap = commit.swap_left_right,
            revert_left = commit.revert_left,
            revert_right = commit.revert_right,
            "upper-arm binding committed"
        );
        self.advance()
    }

    // ── Connectivity ─────────────────────────────────────────────────────

    fn check_connectivity(&mut self) {
        if !self.is_active() {
            return;
        }

        let lost = self
            .required_nodes
            .iter()
            .any(|node| !self.sensors.is_connected(*node));
        if lost {
            self.stage = StageState::Idle;
            self.last_reset = Some(ResetReason::Disconnected);
            self.presentation.deactivate_all();
            self.presentation.show_incorrect_set();
            tracing::warn!("required node disconnected, calibration aborted");
        }
    }

    fn connected_nodes(&self) -> Vec<NodeType> {
        [
            NodeType::LeftHand,
            NodeType::RightHand,
            NodeType::LeftUpperArm,
            NodeType::RightUpperArm,
        ]
        .into_iter()
        .filter(|node| self.sensors.is_connected(*node))
        .collect()
    }

    fn all_playable_connected(&self) -> bool {
        self.connected_nodes().len() == 4
    }

    fn upper_arm_count(&self) -> usize {
        usize::from(self.sensors.is_connected(NodeType::LeftUpperArm))
            + usize::from(self.sensors.is_connected(NodeType::RightUpperArm))
    }

    fn controller_count(&self) -> usize {
        usize::from(self.sensors.is_connected(NodeType::LeftHand))
            + usize::from(self.sensors.is_connected(NodeType::RightHand))
    }
}
