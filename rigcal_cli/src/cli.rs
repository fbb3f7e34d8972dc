//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "rigcal", version, about = "Rig calibration CLI")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE", default_value = "etc/rigcal.toml")]
    pub config: PathBuf,

    /// Log as JSON lines instead of pretty
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a simulated calibration session
    Calibrate {
        /// Gesture scenario to replay (see `scenarios`)
        #[arg(long, default_value = "shake-left")]
        scenario: String,

        /// Force the full staged flow instead of the configured type
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,

        /// Frame rate of the simulated session (Hz)
        #[arg(long, default_value_t = 50)]
        hz: u32,

        /// Give up after this much simulated time (seconds)
        #[arg(long, value_name = "SECONDS", default_value_t = 30.0)]
        timeout_s: f32,
    },
    /// List the available gesture scenarios
    Scenarios,
}
