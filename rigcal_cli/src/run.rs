//! Session assembly and the simulated frame loop.

use eyre::Result;
use rigcal_core::mocks::FixedAngleGate;
use rigcal_core::{
    CalibrationSession, CalibrationType, SessionCfg, Stage, StagePlan, StageState,
};
use rigcal_sim::{Scenario, SimInput, SimRoleMap, SimSensors};
use rigcal_traits::{Chirality, Presentation, WarnKind};

/// Simulated time both designated buttons go down.
const PRESS_AT_S: f32 = 0.2;
/// How long each guide stage stays on screen before the host advances it.
const GUIDE_STEP_S: f32 = 1.0;

/// Tutorial presentation that narrates through the log.
struct LogPresentation;

impl Presentation for LogPresentation {
    fn session_started(&mut self) {
        tracing::info!("tutorial: session started");
    }
    fn session_ended(&mut self) {
        tracing::info!("tutorial: session ended");
    }
    fn activate_stage(&mut self, stage: usize) {
        tracing::info!(stage, "tutorial: stage active");
    }
    fn deactivate_all(&mut self) {
        tracing::debug!("tutorial: stages hidden");
    }
    fn show_warning(&mut self, kind: WarnKind) {
        tracing::warn!(?kind, "tutorial: corrective prompt");
    }
    fn show_incorrect_set(&mut self) {
        tracing::warn!("tutorial: incorrect node set");
    }
    fn haptic_pulse(&mut self, side: Chirality, duration_ms: u16) {
        tracing::debug!(?side, duration_ms, "haptic pulse");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Completed,
    Momentary,
    TimedOut,
}

pub fn run_calibrate(
    config: &rigcal_config::Config,
    scenario: &str,
    full: bool,
    hz: u32,
    timeout_s: f32,
    json: bool,
) -> Result<()> {
    let scenario: Scenario = scenario.parse()?;

    let mut session_cfg: SessionCfg = (&config.session).into();
    // The simulated user always enters through the hold-to-trigger path.
    session_cfg.calibrate_on_start = false;
    if full {
        session_cfg.default_type = CalibrationType::Full;
    }

    let plan = StagePlan::default();
    let roles = SimRoleMap::new();
    let input = SimInput::hold_both_at(PRESS_AT_S);

    let mut session = CalibrationSession::builder(
        SimSensors::new(scenario),
        roles.clone(),
        LogPresentation,
        input.clone(),
        FixedAngleGate(true),
    )
    .with_classifier_cfg((&config.classifier).into())
    .with_session_cfg(session_cfg)
    .with_plan(plan.clone())
    .build()?;

    tracing::info!(scenario = scenario.name(), hz, "simulated calibration start");

    let dt = 1.0 / hz.max(1) as f32;
    let mut elapsed = 0.0f32;
    let mut frames = 0u32;
    let mut guide_time = 0.0f32;

    let outcome = loop {
        if elapsed >= timeout_s {
            break Outcome::TimedOut;
        }

        input.advance(dt);
        let state = session.tick(dt)?;
        elapsed += dt;
        frames += 1;

        match state {
            StageState::Completed => break Outcome::Completed,
            StageState::Running(step) => {
                // Guide stages have no gesture; the host paces through them.
                let kind = plan.stages(session.calibration_type()).get(step).copied();
                if kind == Some(Stage::Guide) {
                    guide_time += dt;
                    if guide_time >= GUIDE_STEP_S {
                        guide_time = 0.0;
                        session.advance()?;
                    }
                } else {
                    guide_time = 0.0;
                }
            }
            StageState::Idle => {
                if roles.state().momentary_calibrations > 0 {
                    break Outcome::Momentary;
                }
            }
        }
    };

    let roles = roles.state();
    if json {
        println!(
            "{}",
            serde_json::json!({
                "scenario": scenario.name(),
                "outcome": match outcome {
                    Outcome::Completed => "completed",
                    Outcome::Momentary => "momentary",
                    Outcome::TimedOut => "timed-out",
                },
                "elapsed_s": elapsed,
                "frames": frames,
                "swapped": roles.swapped,
                "left_reverted": roles.left_reverted,
                "right_reverted": roles.right_reverted,
                "bound": roles.bound,
                "remembered": roles.remembered.map(|(c, a)| [c, a]),
            })
        );
    } else {
        match outcome {
            Outcome::Completed => {
                println!("calibration complete in {elapsed:.2}s ({frames} frames)");
            }
            Outcome::Momentary => {
                println!("momentary calibration applied in {elapsed:.2}s ({frames} frames)");
            }
            Outcome::TimedOut => {}
        }
        if outcome != Outcome::TimedOut {
            println!(
                "roles: swapped={} left_reverted={} right_reverted={} bound={}",
                roles.swapped, roles.left_reverted, roles.right_reverted, roles.bound
            );
        }
    }

    if outcome == Outcome::TimedOut {
        eyre::bail!(
            "calibration did not converge within {timeout_s}s of simulated time ({frames} frames)"
        );
    }

    Ok(())
}
