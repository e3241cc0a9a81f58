//! Error types for dimension reduction.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReduceError {
    #[error("Degenerate spectrum: snapshot matrix has zero total singular-value energy")]
    DegenerateSpectrum,

    #[error(
        "Tolerance {tolerance} unreachable within rank {max_rank} (residual energy {residual_energy})"
    )]
    ToleranceUnreachable {
        max_rank: usize,
        residual_energy: f64,
        tolerance: f64,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-finite value in {what}")]
    NonFinite { what: &'static str },

    #[error("Render error: {message}")]
    Render { message: String },
}

pub type ReduceResult<T> = Result<T, ReduceError>;
