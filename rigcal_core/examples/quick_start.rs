//! Quick Start Example
//!
//! Runs a simulated binding session: the left-slot node shakes, so the roles
//! swap and the session completes. Run with `cargo run --example quick_start`.

use rigcal_core::mocks::{FixedAngleGate, NoInput, NullPresentation};
use rigcal_core::{CalibrationSession, CalibrationType, SessionCfg, Stage, StagePlan, StageState};
use rigcal_sim::{Scenario, SimRoleMap, SimSensors};

fn main() -> Result<(), eyre::Report> {
    let roles = SimRoleMap::new();

    let mut session = CalibrationSession::builder(
        SimSensors::new(Scenario::ShakeLeft),
        roles.clone(),
        NullPresentation,
        NoInput,
        FixedAngleGate(false),
    )
    .with_session_cfg(SessionCfg {
        calibrate_on_start: false,
        ..SessionCfg::default()
    })
    .with_plan(StagePlan {
        full: vec![Stage::BindArms],
        fast: vec![Stage::BindArms],
    })
    .build()?;

    session.calibrate(CalibrationType::Fast)?;

    // 50 Hz frame loop
    let dt = 0.02;
    let mut frames = 0;
    while session.tick(dt)? != StageState::Completed {
        frames += 1;
        if frames > 1_000 {
            eyre::bail!("session did not converge");
        }
    }

    let state = roles.state();
    println!(
        "bound after {frames} frames: swapped={} left_reverted={} right_reverted={}",
        state.swapped, state.left_reverted, state.right_reverted
    );
    Ok(())
}
