//! Error types for discretization.

use pod_sim::SolveFailure;
use pod_solver::SolverError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FemError {
    #[error("Invalid mesh: {what}")]
    InvalidMesh { what: &'static str },

    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: &'static str },

    #[error("Shape mismatch: {what} (expected={expected}, got={got})")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}

pub type FemResult<T> = Result<T, FemError>;

impl From<FemError> for SolveFailure {
    fn from(e: FemError) -> Self {
        SolveFailure::new(e.to_string())
    }
}
