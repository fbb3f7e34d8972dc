//! Simulated sensors and a virtual role map.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use rigcal_traits::{BindScope, Chirality, NodeSample, NodeType, RoleControl, SensorSource};

use crate::scenario::Scenario;

/// Sensor source replaying a scenario's gesture timeline, one frame per
/// sample call.
pub struct SimSensors {
    scenario: Scenario,
    frames: HashMap<NodeType, usize>,
}

impl SimSensors {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            frames: HashMap::new(),
        }
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }
}

impl SensorSource for SimSensors {
    fn is_connected(&self, node: NodeType) -> bool {
        self.scenario.is_connected(node)
    }

    fn sample(&mut self, node: NodeType) -> Option<NodeSample> {
        let frame = self.frames.entry(node).or_insert(0);
        let sample = self.scenario.sample_for(node, *frame);
        if sample.is_some() {
            *frame += 1;
        }
        sample
    }

    fn capacitive_hint(&self, side: Chirality) -> Option<Chirality> {
        self.scenario.capacitive_hint(side)
    }
}

/// Snapshot of the virtual rig's role assignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleMapState {
    /// Physical nodes occupy the opposite slots from where they started.
    pub swapped: bool,
    pub left_reverted: bool,
    pub right_reverted: bool,
    pub bound: bool,
    pub momentary_calibrations: u32,
    pub remembered: Option<(u8, u8)>,
}

/// In-memory role assignment standing in for the driver. Handles are cheap
/// clones over shared state so the final assignment stays observable after
/// the session takes ownership.
#[derive(Clone, Default)]
pub struct SimRoleMap(Rc<RefCell<RoleMapState>>);

impl SimRoleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RoleMapState {
        *self.0.borrow()
    }
}

impl RoleControl for SimRoleMap {
    fn swap_upper_arms(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.0.borrow_mut();
        state.swapped = !state.swapped;
        tracing::info!(swapped = state.swapped, "upper-arm roles swapped");
        Ok(())
    }

    fn revert_upper_arm(
        &mut self,
        side: Chirality,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.0.borrow_mut();
        let flag = match side {
            Chirality::Left => &mut state.left_reverted,
            Chirality::Right => &mut state.right_reverted,
        };
        *flag = !*flag;
        tracing::info!(?side, reverted = *flag, "upper-arm sensor frame reverted");
        Ok(())
    }

    fn is_upper_arm_reverted(&self, side: Chirality) -> bool {
        let state = self.0.borrow();
        match side {
            Chirality::Left => state.left_reverted,
            Chirality::Right => state.right_reverted,
        }
    }

    fn bind_upper_arms(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.0.borrow_mut().bound = true;
        tracing::info!("upper-arm roles bound");
        Ok(())
    }

    fn reset_calibration(
        &mut self,
        scope: BindScope,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.0.borrow_mut().bound = false;
        tracing::debug!(?scope, "calibration reset");
        Ok(())
    }

    fn momentary_calibrate(
        &mut self,
        scope: BindScope,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut state = self.0.borrow_mut();
        state.momentary_calibrations += 1;
        state.bound = true;
        tracing::info!(?scope, "momentary calibration applied");
        Ok(())
    }

    fn remember_node_set(&mut self, controllers: u8, upper_arms: u8) {
        self.0.borrow_mut().remembered = Some((controllers, upper_arms));
        tracing::debug!(controllers, upper_arms, "node set remembered");
    }

    fn forget_remembered_set(&mut self) {
        self.0.borrow_mut().remembered = None;
        tracing::debug!("remembered node set cleared");
    }
}
