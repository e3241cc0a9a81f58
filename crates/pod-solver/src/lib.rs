//! Nonlinear solve primitives for implicit time steps.
//!
//! This crate provides a Newton iteration with backtracking line search,
//! a tridiagonal (Thomas) linear solve for banded 1D Jacobians, and
//! a central-difference Jacobian used to check analytic ones.

pub mod error;
pub mod jacobian;
pub mod newton;
pub mod tridiagonal;

pub use error::{SolverError, SolverResult};
pub use jacobian::central_difference_jacobian;
pub use newton::{LinearSystem, NewtonConfig, NewtonResult, newton_solve};
pub use tridiagonal::Tridiagonal;
