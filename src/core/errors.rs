/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::Road;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for signal lookups
pub type SignalResult<T> = Result<T, SignalError>;

/// Result type for configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for running a simulation
pub type SimulationResult<T> = Result<T, SimulationError>;

/// Signal-related errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SignalError {
    #[error("Unknown road: {0}")]
    #[diagnostic(
        code(signal::unknown_road),
        help("Valid roads are North, East, South and West.")
    )]
    UnknownRoad(String),
}

/// Configuration errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid {name} range: {min}..={max}")]
    #[diagnostic(
        code(config::invalid_range),
        help("The minimum must not exceed the maximum.")
    )]
    InvalidRange {
        name: String,
        min: u64,
        max: u64,
    },

    #[error("Green hold must last at least one time unit")]
    #[diagnostic(
        code(config::zero_hold),
        help("Raise INTERSECTION_HOLD_MIN to 1 or more.")
    )]
    ZeroHold,

    #[error("Time unit must be non-zero")]
    #[diagnostic(
        code(config::zero_time_unit),
        help("Set INTERSECTION_TIME_UNIT_MS to a positive number of milliseconds.")
    )]
    ZeroTimeUnit,

    #[error("Invalid value for {var}: {value:?}")]
    #[diagnostic(
        code(config::invalid_env),
        help("Expected a non-negative integer.")
    )]
    InvalidEnv { var: String, value: String },
}

/// Errors surfaced by the orchestrator
///
/// Stopping is never an error; these cover setup and worker failures only.
#[derive(Error, Debug, Diagnostic)]
pub enum SimulationError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to spawn worker for {road}")]
    #[diagnostic(
        code(simulation::spawn_failed),
        help("The system may be out of threads or memory.")
    )]
    Spawn {
        road: Road,
        #[source]
        source: std::io::Error,
    },

    #[error("Worker for {0} panicked")]
    #[diagnostic(
        code(simulation::worker_panicked),
        help("Totals for this run are incomplete. Check logs for the panic message.")
    )]
    WorkerPanicked(Road),
}
