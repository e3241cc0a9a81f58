//! Tridiagonal matrices and the Thomas algorithm.
//!
//! P1 finite elements on an interval couple each dof only to its two
//! neighbours, so the Newton Jacobian is tridiagonal and can be solved in
//! O(n) instead of a dense LU.

use crate::error::{SolverError, SolverResult};
use crate::newton::LinearSystem;
use nalgebra::{DMatrix, DVector};

/// Square tridiagonal matrix stored by diagonals.
///
/// `lower[i]` is entry `(i, i - 1)` (so `lower[0]` is unused) and
/// `upper[i]` is entry `(i, i + 1)` (so `upper[n - 1]` is unused).
#[derive(Clone, Debug, PartialEq)]
pub struct Tridiagonal {
    lower: Vec<f64>,
    diag: Vec<f64>,
    upper: Vec<f64>,
}

impl Tridiagonal {
    pub fn zeros(n: usize) -> Self {
        Self {
            lower: vec![0.0; n],
            diag: vec![0.0; n],
            upper: vec![0.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.diag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Accumulate `value` into entry `(row, col)`; `|row - col|` must be at most 1.
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        if row == col {
            self.diag[row] += value;
        } else if col + 1 == row {
            self.lower[row] += value;
        } else if row + 1 == col {
            self.upper[row] += value;
        } else {
            panic!("entry ({row}, {col}) is outside the tridiagonal band");
        }
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row == col {
            self.diag[row]
        } else if col + 1 == row {
            self.lower[row]
        } else if row + 1 == col {
            self.upper[row]
        } else {
            0.0
        }
    }

    /// Replace a row by the identity row (Dirichlet constraint).
    pub fn set_identity_row(&mut self, row: usize) {
        self.lower[row] = 0.0;
        self.diag[row] = 1.0;
        self.upper[row] = 0.0;
    }

    pub fn mul_vec(&self, x: &DVector<f64>) -> DVector<f64> {
        let n = self.len();
        DVector::from_fn(n, |i, _| {
            let mut v = self.diag[i] * x[i];
            if i > 0 {
                v += self.lower[i] * x[i - 1];
            }
            if i + 1 < n {
                v += self.upper[i] * x[i + 1];
            }
            v
        })
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        let n = self.len();
        DMatrix::from_fn(n, n, |i, j| self.get(i, j))
    }

    /// Thomas algorithm (no pivoting).
    pub fn solve_thomas(&self, rhs: &DVector<f64>) -> SolverResult<DVector<f64>> {
        let n = self.len();
        if rhs.len() != n {
            return Err(SolverError::InvalidState {
                what: format!("rhs length {} != matrix size {}", rhs.len(), n),
            });
        }
        if n == 0 {
            return Ok(DVector::zeros(0));
        }

        let mut gamma = vec![0.0; n];
        let mut x = DVector::zeros(n);

        let mut beta = self.diag[0];
        if beta == 0.0 {
            return Err(zero_pivot(0));
        }
        x[0] = rhs[0] / beta;
        for i in 1..n {
            gamma[i] = self.upper[i - 1] / beta;
            beta = self.diag[i] - self.lower[i] * gamma[i];
            if beta == 0.0 || !beta.is_finite() {
                return Err(zero_pivot(i));
            }
            x[i] = (rhs[i] - self.lower[i] * x[i - 1]) / beta;
        }
        for i in (0..n - 1).rev() {
            x[i] -= gamma[i + 1] * x[i + 1];
        }
        Ok(x)
    }
}

fn zero_pivot(row: usize) -> SolverError {
    SolverError::Numeric {
        what: format!("zero pivot in tridiagonal solve at row {row}"),
    }
}

impl LinearSystem for Tridiagonal {
    fn solve(&self, rhs: &DVector<f64>) -> SolverResult<DVector<f64>> {
        self.solve_thomas(rhs)
    }
}
