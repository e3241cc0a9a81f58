//! DiscretizationEngine trait for pluggable spatial discretizations.

use crate::error::SolveFailure;
use nalgebra::DVector;

/// Dirichlet values imposed at the two ends of the domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryValues {
    pub left: f64,
    pub right: f64,
}

impl Default for BoundaryValues {
    fn default() -> Self {
        Self {
            left: 1.0,
            right: 1.0,
        }
    }
}

impl BoundaryValues {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Overwrite the first and last entries of `state`.
    pub fn apply(&self, state: &mut DVector<f64>) {
        let n = state.len();
        if n == 0 {
            return;
        }
        state[0] = self.left;
        state[n - 1] = self.right;
    }

    /// True when the endpoints of `state` hold exactly these values.
    pub fn holds_on(&self, state: &[f64]) -> bool {
        match (state.first(), state.last()) {
            (Some(&l), Some(&r)) => l == self.left && r == self.right,
            _ => false,
        }
    }
}

/// Trait for spatial discretizations that can advance a state by one
/// implicit step.
///
/// An engine owns the mesh and the unknowns. The driver owns the state
/// between steps and hands it back to the engine for every solve.
pub trait DiscretizationEngine {
    /// Physical coordinates of the degrees of freedom, in state order.
    fn coordinates(&self) -> &[f64];

    /// Number of degrees of freedom.
    fn dof_count(&self) -> usize {
        self.coordinates().len()
    }

    /// Solve for the state at `t + dt` given the state at `t`.
    ///
    /// The returned vector must hold `boundary` exactly at both endpoints;
    /// the driver rejects a state that does not.
    fn solve_step(
        &mut self,
        previous: &DVector<f64>,
        boundary: BoundaryValues,
        initial_guess: &DVector<f64>,
        dt: f64,
    ) -> Result<DVector<f64>, SolveFailure>;
}
