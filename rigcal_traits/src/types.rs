//! Shared vocabulary types for the rig's collaborator contracts.

use nalgebra::{UnitQuaternion, Vector3};

/// Left/right role of a controller or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chirality {
    Left,
    Right,
}

impl Chirality {
    pub fn opposite(self) -> Self {
        match self {
            Chirality::Left => Chirality::Right,
            Chirality::Right => Chirality::Left,
        }
    }
}

/// Target of a calibration or reset command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindScope {
    Left,
    Right,
    Both,
}

/// Physical node slots of the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    LeftHand,
    RightHand,
    LeftUpperArm,
    RightUpperArm,
}

impl NodeType {
    pub fn controller(side: Chirality) -> Self {
        match side {
            Chirality::Left => NodeType::LeftHand,
            Chirality::Right => NodeType::RightHand,
        }
    }

    pub fn upper_arm(side: Chirality) -> Self {
        match side {
            Chirality::Left => NodeType::LeftUpperArm,
            Chirality::Right => NodeType::RightUpperArm,
        }
    }

    pub fn is_upper_arm(self) -> bool {
        matches!(self, NodeType::LeftUpperArm | NodeType::RightUpperArm)
    }

    pub fn chirality(self) -> Chirality {
        match self {
            NodeType::LeftHand | NodeType::LeftUpperArm => Chirality::Left,
            NodeType::RightHand | NodeType::RightUpperArm => Chirality::Right,
        }
    }
}

/// One world-frame sample for a node: fused acceleration and orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSample {
    /// World-frame acceleration in m/s², gravity included.
    pub acceleration: Vector3<f32>,
    /// World-frame orientation of the node's sensor frame.
    pub orientation: UnitQuaternion<f32>,
}

impl NodeSample {
    pub fn new(acceleration: Vector3<f32>, orientation: UnitQuaternion<f32>) -> Self {
        Self {
            acceleration,
            orientation,
        }
    }
}

/// Corrective prompt selected when a binding window stays inconclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarnKind {
    /// Neither arm shook hard enough to clear the minimum count.
    ShakeHarder,
    /// Both arms registered shakes; neither side dominated.
    BothArmsAmbiguous,
    /// Chirality is settled but arm orientation stayed ambiguous.
    LowerArms,
}
