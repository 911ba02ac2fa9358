/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Benchmark harness errors
///
/// Every variant is fatal for the run that produced it: once a task dies or
/// cannot be started, the timing of that run no longer means anything.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum HarnessError {
    #[error("Invalid scenario '{name}': {reason}")]
    #[diagnostic(
        code(harness::invalid_scenario),
        help("A scenario needs at least one repetition.")
    )]
    InvalidScenario { name: String, reason: String },

    #[error("Invalid harness configuration: {0}")]
    #[diagnostic(
        code(harness::invalid_config),
        help("Check the CONTENTION_* environment variables and worker count.")
    )]
    InvalidConfig(String),

    #[error("Failed to spawn task thread: {0}")]
    #[diagnostic(
        code(harness::spawn_failed),
        help("The OS refused a new thread. Lower the task count or use pooled mode.")
    )]
    SpawnFailed(String),

    #[error("Task panicked during repetition {repetition}: {message}")]
    #[diagnostic(
        code(harness::task_panicked),
        help("Synchronization was compromised mid-run; the measurement was discarded.")
    )]
    TaskPanicked { repetition: usize, message: String },
}

impl HarnessError {
    /// Build a `TaskPanicked` from a join payload
    pub fn from_panic(repetition: usize, payload: &(dyn std::any::Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        HarnessError::TaskPanicked {
            repetition,
            message,
        }
    }
}

impl From<std::io::Error> for HarnessError {
    fn from(err: std::io::Error) -> Self {
        HarnessError::SpawnFailed(err.to_string())
    }
}
