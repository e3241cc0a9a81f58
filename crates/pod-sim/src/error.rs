//! Error types for time stepping.

use pod_core::CoreError;
use thiserror::Error;

/// Errors encountered while advancing a run.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Solver diverged at step {step}: {what}")]
    SolverDivergence { step: usize, what: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

/// Failure reported by a discretization engine for a single step.
#[derive(Error, Debug, Clone)]
#[error("{what}")]
pub struct SolveFailure {
    pub what: String,
}

impl SolveFailure {
    pub fn new(what: impl Into<String>) -> Self {
        Self { what: what.into() }
    }
}

impl From<CoreError> for SimError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidArg { what } | CoreError::NonFinite { what, .. } => {
                SimError::InvalidArg { what }
            }
            other => SimError::Backend {
                message: other.to_string(),
            },
        }
    }
}
