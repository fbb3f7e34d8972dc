#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Simulated rig backend.
//!
//! Scripted gesture sensors, a virtual role map, and scripted input for
//! driving the calibration flow without hardware. This is the default backend
//! for the CLI and the scenario tests.

pub mod error;
pub mod input;
pub mod rig;
pub mod scenario;

pub use error::SimError;
pub use input::SimInput;
pub use rig::{RoleMapState, SimRoleMap, SimSensors};
pub use scenario::Scenario;
