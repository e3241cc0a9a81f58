//! Reduced basis built from leading left singular vectors.

use crate::error::{ReduceError, ReduceResult};
use nalgebra::{DMatrix, DVector, DVectorView};

/// Orthonormal POD modes, one per column.
#[derive(Clone, Debug)]
pub struct PodBasis {
    modes: DMatrix<f64>,
}

impl PodBasis {
    /// Keep the first `rank` columns of `left_vectors`.
    pub fn from_left_vectors(left_vectors: &DMatrix<f64>, rank: usize) -> ReduceResult<Self> {
        if rank == 0 || rank > left_vectors.ncols() {
            return Err(ReduceError::InvalidArg {
                what: "basis rank outside available singular vectors",
            });
        }
        Ok(Self {
            modes: left_vectors.columns(0, rank).into_owned(),
        })
    }

    pub fn rank(&self) -> usize {
        self.modes.ncols()
    }

    pub fn dof_count(&self) -> usize {
        self.modes.nrows()
    }

    pub fn modes(&self) -> &DMatrix<f64> {
        &self.modes
    }

    pub fn mode(&self, j: usize) -> DVectorView<'_, f64> {
        self.modes.column(j)
    }

    /// Reduced coordinates `Phi^T x`.
    pub fn project(&self, state: &DVector<f64>) -> ReduceResult<DVector<f64>> {
        self.check_len(state.len())?;
        Ok(self.modes.tr_mul(state))
    }

    /// Full state `Phi c`.
    pub fn reconstruct(&self, coefficients: &DVector<f64>) -> ReduceResult<DVector<f64>> {
        if coefficients.len() != self.rank() {
            return Err(ReduceError::InvalidArg {
                what: "coefficient count does not match basis rank",
            });
        }
        Ok(&self.modes * coefficients)
    }

    /// `||A - Phi Phi^T A||_F / ||A||_F` over the columns of `snapshots`.
    pub fn projection_error(&self, snapshots: &DMatrix<f64>) -> ReduceResult<f64> {
        self.check_len(snapshots.nrows())?;
        let norm = snapshots.norm();
        if norm == 0.0 {
            return Err(ReduceError::DegenerateSpectrum);
        }
        let projected = &self.modes * self.modes.tr_mul(snapshots);
        Ok((snapshots - projected).norm() / norm)
    }

    fn check_len(&self, len: usize) -> ReduceResult<()> {
        if len == self.dof_count() {
            Ok(())
        } else {
            Err(ReduceError::InvalidArg {
                what: "state length does not match basis",
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(n: usize, r: usize) -> PodBasis {
        PodBasis::from_left_vectors(&DMatrix::identity(n, n), r).unwrap()
    }

    #[test]
    fn project_then_reconstruct_keeps_span() {
        let basis = canonical(4, 2);
        let x = DVector::from_vec(vec![3.0, -1.0, 7.0, 2.0]);
        let c = basis.project(&x).unwrap();
        assert_eq!(c.as_slice(), &[3.0, -1.0]);
        let back = basis.reconstruct(&c).unwrap();
        assert_eq!(back.as_slice(), &[3.0, -1.0, 0.0, 0.0]);
    }

    #[test]
    fn projection_error_of_spanned_data_is_zero() {
        let basis = canonical(3, 2);
        let snaps = DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 3.0, 4.0, 0.0, 0.0]);
        assert_eq!(basis.projection_error(&snaps).unwrap(), 0.0);
    }

    #[test]
    fn rank_bounds_are_checked() {
        let id = DMatrix::<f64>::identity(3, 3);
        assert!(PodBasis::from_left_vectors(&id, 0).is_err());
        assert!(PodBasis::from_left_vectors(&id, 4).is_err());
        let basis = canonical(3, 1);
        assert!(basis.project(&DVector::zeros(2)).is_err());
        assert!(basis.reconstruct(&DVector::zeros(2)).is_err());
    }
}
