//! Named gesture timelines for the simulated rig.

use std::f32::consts::FRAC_PI_2;
use std::str::FromStr;

use nalgebra::{UnitQuaternion, Vector3};
use rigcal_traits::{Chirality, NodeSample, NodeType};

use crate::error::SimError;

const GRAVITY: f32 = 9.8;
const SHAKE_SPIKE: f32 = 8.0;

/// A scripted user driving the calibration flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Both arms on, the left-slot node shakes: roles must swap.
    ShakeLeft,
    /// Both arms on, the right-slot node shakes: roles already correct.
    ShakeRight,
    /// Right-slot node shakes; the left node is mounted upside down.
    ReversedLeft,
    /// One arm node paired with the right controller.
    SingleRightArm,
    /// Controllers only; the binding stage passes straight through.
    NoArms,
    /// Everything connected and resting with agreeing heuristics: the
    /// instant calibration shortcut fires instead of the staged flow.
    Momentary,
}

impl Scenario {
    pub const NAMES: [&'static str; 6] = [
        "shake-left",
        "shake-right",
        "reversed-left",
        "single-right-arm",
        "no-arms",
        "momentary",
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::ShakeLeft => "shake-left",
            Scenario::ShakeRight => "shake-right",
            Scenario::ReversedLeft => "reversed-left",
            Scenario::SingleRightArm => "single-right-arm",
            Scenario::NoArms => "no-arms",
            Scenario::Momentary => "momentary",
        }
    }

    pub fn is_connected(self, node: NodeType) -> bool {
        match self {
            Scenario::ShakeLeft
            | Scenario::ShakeRight
            | Scenario::ReversedLeft
            | Scenario::Momentary => true,
            Scenario::SingleRightArm => {
                matches!(node, NodeType::RightHand | NodeType::RightUpperArm)
            }
            Scenario::NoArms => !node.is_upper_arm(),
        }
    }

    /// Capacitive hints agree with the slots only in the momentary scenario;
    /// the gesture scenarios deliberately leave the heuristics undecided so
    /// the staged flow runs.
    pub fn capacitive_hint(self, side: Chirality) -> Option<Chirality> {
        match self {
            Scenario::Momentary => Some(side),
            _ => None,
        }
    }

    /// Sample for a node at a given frame, `None` when disconnected.
    pub fn sample_for(self, node: NodeType, frame: usize) -> Option<NodeSample> {
        if !self.is_connected(node) || !node.is_upper_arm() {
            return None;
        }

        let side = node.chirality();
        let sample = match self {
            Scenario::ShakeLeft if side == Chirality::Left => shaking(frame, lowered(side)),
            Scenario::ShakeRight | Scenario::ReversedLeft if side == Chirality::Right => {
                shaking(frame, lowered(side))
            }
            Scenario::ReversedLeft => resting(raised(side)),
            _ => resting(lowered(side)),
        };
        Some(sample)
    }
}

impl FromStr for Scenario {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shake-left" => Ok(Scenario::ShakeLeft),
            "shake-right" => Ok(Scenario::ShakeRight),
            "reversed-left" => Ok(Scenario::ReversedLeft),
            "single-right-arm" => Ok(Scenario::SingleRightArm),
            "no-arms" => Ok(Scenario::NoArms),
            "momentary" => Ok(Scenario::Momentary),
            other => Err(SimError::UnknownScenario(other.to_string())),
        }
    }
}

/// Orientation with the arm's outward vector pointing straight down.
fn lowered(side: Chirality) -> UnitQuaternion<f32> {
    let angle = match side {
        Chirality::Left => FRAC_PI_2,
        Chirality::Right => -FRAC_PI_2,
    };
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle)
}

/// Inverted mount: the outward vector accumulates upward.
fn raised(side: Chirality) -> UnitQuaternion<f32> {
    let angle = match side {
        Chirality::Left => -FRAC_PI_2,
        Chirality::Right => FRAC_PI_2,
    };
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle)
}

fn resting(orientation: UnitQuaternion<f32>) -> NodeSample {
    NodeSample::new(Vector3::new(0.0, GRAVITY, 0.0), orientation)
}

/// Acceleration alternating well past the classifier's noise floor so every
/// frame registers an oscillation reversal.
fn shaking(frame: usize, orientation: UnitQuaternion<f32>) -> NodeSample {
    let spike = if frame % 2 == 0 { SHAKE_SPIKE } else { 0.0 };
    NodeSample::new(Vector3::new(0.0, GRAVITY + spike, 0.0), orientation)
}
