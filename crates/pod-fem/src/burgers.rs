//! Backward-Euler weak form of the viscous Burgers equation.
//!
//! On each element of width `h` with end values `(ua, ub)` the P1
//! integrals are exact:
//!
//! - mass: `h/3` on the diagonal, `h/6` off it
//! - diffusion: `nu/h * [[1, -1], [-1, 1]]`
//! - convection `∫ u u' φ`: `(ub - ua)(2ua + ub)/6` and `(ub - ua)(ua + 2ub)/6`
//!
//! Dirichlet rows are replaced by `u_i - g_i`.

use crate::error::{FemError, FemResult};
use crate::space::FunctionSpace;
use nalgebra::DVector;
use pod_sim::BoundaryValues;
use pod_solver::Tridiagonal;

/// Residual and Jacobian assembly for one implicit step.
#[derive(Clone, Debug)]
pub struct BurgersForm {
    pub viscosity: f64,
    /// Include the `nu u''` term
    pub diffusion: bool,
}

impl BurgersForm {
    pub fn new(viscosity: f64, diffusion: bool) -> Self {
        Self {
            viscosity,
            diffusion,
        }
    }

    fn effective_viscosity(&self) -> f64 {
        if self.diffusion { self.viscosity } else { 0.0 }
    }

    pub fn residual(
        &self,
        space: &FunctionSpace,
        u: &DVector<f64>,
        u_old: &DVector<f64>,
        dt: f64,
        boundary: BoundaryValues,
    ) -> FemResult<DVector<f64>> {
        let n = space.dof_count();
        check_len("state", n, u.len())?;
        check_len("previous state", n, u_old.len())?;

        let nu = self.effective_viscosity();
        let mut r = DVector::zeros(n);

        for e in 0..space.mesh().element_count() {
            let (a, b) = space.element_dofs(e);
            let (xa, xb) = space.mesh().element(e);
            let h = xb - xa;
            let (ua, ub) = (u[a], u[b]);
            let (da, db) = (ua - u_old[a], ub - u_old[b]);

            r[a] += h * (2.0 * da + db) / (6.0 * dt);
            r[b] += h * (da + 2.0 * db) / (6.0 * dt);

            r[a] += nu * (ua - ub) / h;
            r[b] += nu * (ub - ua) / h;

            let grad = ub - ua;
            r[a] += grad * (2.0 * ua + ub) / 6.0;
            r[b] += grad * (ua + 2.0 * ub) / 6.0;
        }

        let (left, right) = space.boundary_dofs();
        r[left] = u[left] - boundary.left;
        r[right] = u[right] - boundary.right;

        Ok(r)
    }

    /// Jacobian of [`residual`](Self::residual) with respect to `u`.
    pub fn jacobian(&self, space: &FunctionSpace, u: &DVector<f64>, dt: f64) -> FemResult<Tridiagonal> {
        let n = space.dof_count();
        check_len("state", n, u.len())?;

        let nu = self.effective_viscosity();
        let mut jac = Tridiagonal::zeros(n);

        for e in 0..space.mesh().element_count() {
            let (a, b) = space.element_dofs(e);
            let (xa, xb) = space.mesh().element(e);
            let h = xb - xa;
            let (ua, ub) = (u[a], u[b]);

            let m_diag = h / (3.0 * dt);
            let m_off = h / (6.0 * dt);
            let k = nu / h;

            jac.add(a, a, m_diag + k + (ub - 4.0 * ua) / 6.0);
            jac.add(a, b, m_off - k + (ua + 2.0 * ub) / 6.0);
            jac.add(b, a, m_off - k - (2.0 * ua + ub) / 6.0);
            jac.add(b, b, m_diag + k + (4.0 * ub - ua) / 6.0);
        }

        let (left, right) = space.boundary_dofs();
        jac.set_identity_row(left);
        jac.set_identity_row(right);

        Ok(jac)
    }
}

fn check_len(what: &'static str, expected: usize, got: usize) -> FemResult<()> {
    if expected == got {
        Ok(())
    } else {
        Err(FemError::ShapeMismatch {
            what,
            expected,
            got,
        })
    }
}
