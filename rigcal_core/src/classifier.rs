//! Arm-binding gesture classification.
//!
//! Consumes per-frame acceleration and orientation samples for the two
//! ambiguous upper-arm nodes, counts shake oscillations, accumulates resting
//! orientation, and decides which physical node is which arm and whether a
//! sensor frame is mounted reversed. Decisions converge within one gesture
//! window using one frame of data at a time; there is no lookahead.

use rigcal_traits::{Chirality, NodeSample, WarnKind};

use crate::config::ClassifierCfg;
use crate::motion::{lateral_vertical_component, vertical_deviation_sq};

/// Per-node gesture evidence, accumulated between resets.
#[derive(Debug, Clone, Default)]
pub struct ArmBindingAccumulator {
    tremble_count: u32,
    side_above_zero: f32,
    side_below_zero: f32,
    last_acceleration: f32,
    direction_up: bool,
}

impl ArmBindingAccumulator {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn tremble_count(&self) -> u32 {
        self.tremble_count
    }

    pub fn ingest(&mut self, sample: &NodeSample, side: Chirality, cfg: &ClassifierCfg) {
        self.track_tremble(sample, cfg);
        self.track_direction(sample, side, cfg);
    }

    /// Edge-triggered oscillation counter over vertical-compensated squared
    /// acceleration. Robust to slow drift, sensitive to fast reversals.
    fn track_tremble(&mut self, sample: &NodeSample, cfg: &ClassifierCfg) {
        let acceleration = vertical_deviation_sq(&sample.acceleration, cfg.gravity);

        if (acceleration - self.last_acceleration).abs() > cfg.acceleration_border {
            if ((acceleration - self.last_acceleration) > 0.0) != self.direction_up {
                self.direction_up = !self.direction_up;
                self.tremble_count += 1;
            }

            self.last_acceleration = acceleration;
        }
    }

    /// Accumulates the signed vertical component of the arm's outward vector,
    /// bucketed by sign. Near-horizontal samples are ambiguous and dropped.
    fn track_direction(&mut self, sample: &NodeSample, side: Chirality, cfg: &ClassifierCfg) {
        let y = lateral_vertical_component(&sample.orientation, side);

        if y.abs() < cfg.angle_border {
            return;
        }

        if y > 0.0 {
            self.side_above_zero += y;
        } else {
            self.side_below_zero -= y;
        }
    }

    /// True once one orientation bucket dominates the other: the arm's resting
    /// pose is unambiguous.
    pub fn direction_pass(&self, cfg: &ClassifierCfg) -> bool {
        let any = self.side_above_zero.max(self.side_below_zero) > 0.0;
        any && (dominates(
            self.side_above_zero,
            self.side_below_zero,
            cfg.orientation_ratio,
            cfg.epsilon,
        ) || dominates(
            self.side_below_zero,
            self.side_above_zero,
            cfg.orientation_ratio,
            cfg.epsilon,
        ))
    }

    /// True when the outward vector accumulated upward: the physical mount is
    /// inverted relative to the expected resting pose.
    pub fn revert_orientation(&self, cfg: &ClassifierCfg) -> bool {
        dominates(
            self.side_above_zero,
            self.side_below_zero,
            cfg.orientation_ratio,
            cfg.epsilon,
        )
    }
}

#[inline]
fn dominates(a: f32, b: f32, ratio: f32, epsilon: f32) -> bool {
    a / b.max(epsilon) > ratio
}

/// Committed binding decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    /// Swap the physical nodes' left/right roles.
    pub swap_left_right: bool,
    /// Flip the sensor-frame handedness of the node ending up in each role.
    pub revert_left: bool,
    pub revert_right: bool,
}

impl Commit {
    /// Accept the current assignment as-is.
    pub fn accept() -> Self {
        Self {
            swap_left_right: false,
            revert_left: false,
            revert_right: false,
        }
    }
}

/// Per-frame classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Still gathering evidence.
    Collecting,
    /// Shake dominance settled which node is which arm before orientation
    /// did; the swap is final, orientation keeps collecting.
    ChiralityLocked { swap: bool },
    /// Conclusive decision; accumulators are reset.
    Commit(Commit),
    /// Window is in its corrective-prompt phase; show the given prompt.
    Warn(WarnKind),
    /// Countdown ran out without a conclusion; a fresh window has begun.
    Expired,
}

/// Classifies the shake / arms-lowered gestures for one binding attempt.
///
/// Exactly one attempt is live at a time; `begin` seeds the countdown and
/// zeroes both accumulators.
#[derive(Debug, Clone)]
pub struct ArmBindingClassifier {
    cfg: ClassifierCfg,
    left: ArmBindingAccumulator,
    right: ArmBindingAccumulator,
    time_remaining: f32,
    waiting_for_result: bool,
    chirality_locked: bool,
    two_nodes: bool,
}

impl ArmBindingClassifier {
    pub fn new(cfg: ClassifierCfg) -> Self {
        let mut classifier = Self {
            cfg,
            left: ArmBindingAccumulator::default(),
            right: ArmBindingAccumulator::default(),
            time_remaining: 0.0,
            waiting_for_result: false,
            chirality_locked: false,
            two_nodes: false,
        };
        classifier.begin(2);
        classifier
    }

    /// Start a fresh binding attempt for the given number of connected
    /// ambiguous nodes. With fewer than two there is no left/right ambiguity
    /// to resolve by shaking; only the arms-down orientation check remains.
    pub fn begin(&mut self, upper_arm_count: usize) {
        self.two_nodes = upper_arm_count >= 2;
        self.chirality_locked = upper_arm_count < 2;
        self.waiting_for_result = false;
        self.left.reset();
        self.right.reset();
        self.reseed_window();
    }

    pub fn chirality_locked(&self) -> bool {
        self.chirality_locked
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn left(&self) -> &ArmBindingAccumulator {
        &self.left
    }

    pub fn right(&self) -> &ArmBindingAccumulator {
        &self.right
    }

    /// A node-local bind press forces the pressed node into the right-arm
    /// role. Returns whether the caller must swap roles to honor it. If
    /// chirality was still open, the press settles it and evidence restarts.
    pub fn manual_bind(&mut self, pressed: Chirality) -> bool {
        let swap = pressed == Chirality::Left;

        if !self.chirality_locked {
            self.chirality_locked = true;
            self.waiting_for_result = false;
            self.left.reset();
            self.right.reset();
            self.reseed_window();
        }

        swap
    }

    /// Advance the attempt by one frame. `None` samples mean the node is
    /// disconnected this frame. A non-positive `dt` is a paused frame: no
    /// accumulation, no countdown.
    pub fn update(
        &mut self,
        left: Option<&NodeSample>,
        right: Option<&NodeSample>,
        dt: f32,
    ) -> Verdict {
        if left.is_none() && right.is_none() {
            // Nothing to disambiguate.
            self.left.reset();
            self.right.reset();
            return Verdict::Commit(Commit::accept());
        }

        if dt <= 0.0 {
            return Verdict::Collecting;
        }

        self.two_nodes = left.is_some() && right.is_some();
        self.time_remaining -= dt;

        if self.time_remaining > self.cfg.warn_window_s {
            self.waiting_for_result = true;

            if let Some(sample) = left {
                self.left.ingest(sample, Chirality::Left, &self.cfg);
            }
            if let Some(sample) = right {
                self.right.ingest(sample, Chirality::Right, &self.cfg);
            }
        }

        let left_dominates = dominates(
            self.left.tremble_count() as f32,
            self.right.tremble_count() as f32,
            self.cfg.acceleration_ratio,
            self.cfg.epsilon,
        );
        let right_dominates = dominates(
            self.right.tremble_count() as f32,
            self.left.tremble_count() as f32,
            self.cfg.acceleration_ratio,
            self.cfg.epsilon,
        );
        let shake_peak = self.left.tremble_count().max(self.right.tremble_count());
        let tremble = shake_peak > self.cfg.min_shake_count && (left_dominates || right_dominates);
        let left_direction_ok = left.is_none() || self.left.direction_pass(&self.cfg);
        let right_direction_ok = right.is_none() || self.right.direction_pass(&self.cfg);

        if self.time_remaining < self.cfg.warn_window_s || (tremble && !self.chirality_locked) {
            if self.waiting_for_result {
                self.waiting_for_result = false;

                if (self.chirality_locked || tremble) && left_direction_ok && right_direction_ok {
                    let swap = left_dominates && self.two_nodes;
                    let commit = self.build_commit(swap);
                    self.left.reset();
                    self.right.reset();
                    tracing::debug!(
                        swap,
                        revert_left = commit.revert_left,
                        revert_right = commit.revert_right,
                        "binding committed"
                    );
                    return Verdict::Commit(commit);
                }

                if tremble && !self.chirality_locked {
                    let swap = left_dominates && self.two_nodes;
                    self.chirality_locked = true;
                    self.left.reset();
                    self.right.reset();
                    self.reseed_window();
                    tracing::debug!(swap, "chirality locked, still collecting orientation");
                    return Verdict::ChiralityLocked { swap };
                }

                return Verdict::Warn(self.pick_warning(tremble, shake_peak));
            }

            if self.time_remaining < 0.0 {
                self.left.reset();
                self.right.reset();
                self.reseed_window();
                return Verdict::Expired;
            }
        }

        Verdict::Collecting
    }

    fn reseed_window(&mut self) {
        let gesture = if self.two_nodes {
            self.cfg.shake_window_s
        } else {
            self.cfg.arms_down_window_s
        };
        self.time_remaining = gesture + self.cfg.warn_window_s;
    }

    fn build_commit(&self, swap: bool) -> Commit {
        let left_revert = self.left.revert_orientation(&self.cfg);
        let right_revert = self.right.revert_orientation(&self.cfg);

        // After a swap, the evidence gathered on one side applies to the node
        // that ends up in the opposite role.
        Commit {
            swap_left_right: swap,
            revert_left: if swap { right_revert } else { left_revert },
            revert_right: if swap { left_revert } else { right_revert },
        }
    }

    fn pick_warning(&self, tremble: bool, shake_peak: u32) -> WarnKind {
        if tremble || self.chirality_locked {
            // Chirality is fine; orientation stayed inconclusive.
            WarnKind::LowerArms
        } else if shake_peak > self.cfg.min_shake_count {
            WarnKind::BothArmsAmbiguous
        } else {
            WarnKind::ShakeHarder
        }
    }
}
