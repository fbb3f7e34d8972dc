#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core calibration logic (driver-agnostic).
//!
//! This crate decides which physical upper-arm node is the user's left vs
//! right arm, whether a node's sensor frame is mounted reversed, and drives
//! the guided calibration flow. All driver and UI interactions go through the
//! `rigcal_traits` contracts.
//!
//! ## Architecture
//!
//! - **Classifier**: tremble/orientation gesture classification
//!   (`classifier` module)
//! - **Session**: calibration-stage state machine with hold-to-trigger entry
//!   (`session` module)
//! - **Latching**: explicit hold-button debounce (`latch` module)
//! - **Configuration**: runtime config structs (`config` module), mapped from
//!   the TOML schema in `rigcal_config` (`conversions` module)
//!
//! The model is single-threaded and frame-driven: callers feed `tick(dt)` /
//! `update(.., dt)` once per frame with an explicit elapsed time; skipped
//! frames pause every countdown.

pub mod classifier;
pub mod config;
pub mod conversions;
pub mod error;
pub mod latch;
pub mod mocks;
pub mod motion;
pub mod session;
pub mod stages;

pub use classifier::{ArmBindingAccumulator, ArmBindingClassifier, Commit, Verdict};
pub use config::{CalibrationType, ClassifierCfg, SessionCfg};
pub use error::{BuildError, ResetReason, Result, RigError};
pub use latch::HoldLatch;
pub use session::{CalibrationSession, SessionBuilder, StageState};
pub use stages::{Stage, StagePlan};
