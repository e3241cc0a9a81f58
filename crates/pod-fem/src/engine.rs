//! Discretization engine for the Burgers problem.

use crate::burgers::BurgersForm;
use crate::error::{FemError, FemResult};
use crate::mesh::IntervalMesh;
use crate::space::FunctionSpace;
use nalgebra::{DMatrix, DVector};
use pod_sim::{BoundaryValues, DiscretizationEngine, SolveFailure};
use pod_solver::{
    NewtonConfig, NewtonResult, SolverResult, Tridiagonal, central_difference_jacobian,
    newton_solve,
};

/// How the Newton Jacobian is formed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JacobianMode {
    /// Exact tridiagonal Jacobian, Thomas solve
    #[default]
    Analytic,
    /// Dense central differences, LU solve (small meshes only)
    FiniteDifference,
}

/// Options for building a [`BurgersEngine`].
#[derive(Clone, Debug)]
pub struct FemOptions {
    pub x_left: f64,
    pub x_right: f64,
    pub viscosity: f64,
    pub diffusion: bool,
    pub jacobian: JacobianMode,
    pub newton: NewtonConfig,
}

impl Default for FemOptions {
    fn default() -> Self {
        Self {
            x_left: 0.0,
            x_right: 2.0,
            viscosity: 1.0,
            diffusion: true,
            jacobian: JacobianMode::default(),
            newton: NewtonConfig::default(),
        }
    }
}

/// P1 Burgers discretization with a Newton step solver.
#[derive(Clone, Debug)]
pub struct BurgersEngine {
    space: FunctionSpace,
    form: BurgersForm,
    jacobian: JacobianMode,
    newton: NewtonConfig,
    newton_iterations: usize,
}

impl BurgersEngine {
    pub fn build(element_count: usize, options: FemOptions) -> FemResult<Self> {
        if !options.viscosity.is_finite() || options.viscosity < 0.0 {
            return Err(FemError::InvalidParameter {
                what: "viscosity must be finite and non-negative",
            });
        }
        let mesh = IntervalMesh::new(element_count, options.x_left, options.x_right)?;

        tracing::info!(
            element_count,
            viscosity = options.viscosity,
            diffusion = options.diffusion,
            "burgers discretization built"
        );

        Ok(Self {
            space: FunctionSpace::p1(mesh),
            form: BurgersForm::new(options.viscosity, options.diffusion),
            jacobian: options.jacobian,
            newton: options.newton,
            newton_iterations: 0,
        })
    }

    pub fn space(&self) -> &FunctionSpace {
        &self.space
    }

    pub fn form(&self) -> &BurgersForm {
        &self.form
    }

    /// Newton iterations summed over every step solved so far.
    pub fn newton_iterations(&self) -> usize {
        self.newton_iterations
    }

    fn solve(
        &self,
        previous: &DVector<f64>,
        boundary: BoundaryValues,
        initial_guess: &DVector<f64>,
        dt: f64,
    ) -> FemResult<NewtonResult> {
        let n = self.space.dof_count();
        for (what, len) in [("previous state", previous.len()), ("initial guess", initial_guess.len())] {
            if len != n {
                return Err(FemError::ShapeMismatch {
                    what,
                    expected: n,
                    got: len,
                });
            }
        }
        if !(dt.is_finite() && dt > 0.0) {
            return Err(FemError::InvalidParameter {
                what: "dt must be finite and positive",
            });
        }

        let residual = |u: &DVector<f64>| -> SolverResult<DVector<f64>> {
            self.form
                .residual(&self.space, u, previous, dt, boundary)
                .map_err(into_solver_error)
        };

        let mut guess = initial_guess.clone();
        boundary.apply(&mut guess);

        let result = match self.jacobian {
            JacobianMode::Analytic => {
                let jacobian = |u: &DVector<f64>| -> SolverResult<Tridiagonal> {
                    self.form
                        .jacobian(&self.space, u, dt)
                        .map_err(into_solver_error)
                };
                newton_solve(guess, residual, jacobian, &self.newton)?
            }
            JacobianMode::FiniteDifference => {
                let jacobian = |u: &DVector<f64>| -> SolverResult<DMatrix<f64>> {
                    central_difference_jacobian(u, residual, 1e-7)
                };
                newton_solve(guess, residual, jacobian, &self.newton)?
            }
        };

        Ok(result)
    }
}

fn into_solver_error(e: FemError) -> pod_solver::SolverError {
    match e {
        FemError::Solver(inner) => inner,
        other => pod_solver::SolverError::InvalidState {
            what: other.to_string(),
        },
    }
}

impl DiscretizationEngine for BurgersEngine {
    fn coordinates(&self) -> &[f64] {
        self.space.dof_coordinates()
    }

    fn solve_step(
        &mut self,
        previous: &DVector<f64>,
        boundary: BoundaryValues,
        initial_guess: &DVector<f64>,
        dt: f64,
    ) -> Result<DVector<f64>, SolveFailure> {
        let result = self.solve(previous, boundary, initial_guess, dt)?;
        self.newton_iterations += result.iterations;
        tracing::debug!(
            iterations = result.iterations,
            residual = result.residual_norm,
            "newton converged"
        );

        let mut next = result.x;
        boundary.apply(&mut next);
        Ok(next)
    }
}
