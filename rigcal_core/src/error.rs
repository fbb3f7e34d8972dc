use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum RigError {
    #[error("driver command failed: {0}")]
    Driver(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid state: {0}")]
    State(String),
}

/// Why a running session was torn back down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// A required node dropped mid-session; needs reconnection plus an
    /// explicit restart.
    Disconnected,
    /// Application foregrounded after suspension; partial progress is
    /// invalidated and a full run is forced.
    EnvironmentShift,
    /// Explicit re-entry via `calibrate`.
    Restarted,
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("empty stage plan")]
    EmptyPlan,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

/// Map a boxed driver error into the typed taxonomy.
pub(crate) fn map_driver_error(e: &(dyn std::error::Error + Send + Sync)) -> RigError {
    RigError::Driver(e.to_string())
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
