//! Singular spectrum of a snapshot matrix.

use crate::error::{ReduceError, ReduceResult};
use nalgebra::DMatrix;

/// Descending singular values with their sign-normalized left vectors.
#[derive(Clone, Debug)]
pub struct Spectrum {
    values: Vec<f64>,
    left_vectors: DMatrix<f64>,
}

impl Spectrum {
    /// Thin SVD of `snapshots`.
    ///
    /// Values are sorted descending with the left vectors permuted to
    /// match, and every vector is flipped so its largest-magnitude entry is
    /// positive. Two calls on the same matrix return identical results.
    pub fn compute(snapshots: &DMatrix<f64>) -> ReduceResult<Self> {
        let (nrows, ncols) = snapshots.shape();
        if nrows == 0 || ncols == 0 {
            return Err(ReduceError::InvalidArg {
                what: "snapshot matrix is empty",
            });
        }
        if snapshots.iter().any(|v| !v.is_finite()) {
            return Err(ReduceError::NonFinite {
                what: "snapshot matrix",
            });
        }
        // The singular values sum to zero exactly when the matrix is zero.
        if snapshots.iter().all(|v| *v == 0.0) {
            return Err(ReduceError::DegenerateSpectrum);
        }

        let svd = snapshots.clone().svd(true, false);
        let u = svd.u.ok_or(ReduceError::InvalidArg {
            what: "left singular vectors were not computed",
        })?;
        let raw: Vec<f64> = svd.singular_values.iter().map(|s| s.abs()).collect();

        let mut order: Vec<usize> = (0..raw.len()).collect();
        order.sort_by(|&a, &b| raw[b].total_cmp(&raw[a]));

        let values: Vec<f64> = order.iter().map(|&i| raw[i]).collect();
        let mut left_vectors = u.select_columns(order.iter());
        for mut column in left_vectors.column_iter_mut() {
            let pivot = column.iamax();
            if column[pivot] < 0.0 {
                column.neg_mut();
            }
        }

        Ok(Self {
            values,
            left_vectors,
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Left singular vectors, one column per value.
    pub fn left_vectors(&self) -> &DMatrix<f64> {
        &self.left_vectors
    }
}
