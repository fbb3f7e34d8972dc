//! Stage plan model for the guided flow.

use crate::config::CalibrationType;

/// One stage of the guided flow: either a pure presentation step advanced by
/// the host, or the arm-binding step driven by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Guide,
    BindArms,
}

/// Ordered stage lists for each calibration type.
#[derive(Debug, Clone)]
pub struct StagePlan {
    pub full: Vec<Stage>,
    pub fast: Vec<Stage>,
}

impl Default for StagePlan {
    fn default() -> Self {
        Self {
            full: vec![Stage::Guide, Stage::BindArms, Stage::Guide],
            fast: vec![Stage::BindArms],
        }
    }
}

impl StagePlan {
    pub fn stages(&self, ty: CalibrationType) -> &[Stage] {
        match ty {
            CalibrationType::Full => &self.full,
            CalibrationType::Fast => &self.fast,
        }
    }
}
