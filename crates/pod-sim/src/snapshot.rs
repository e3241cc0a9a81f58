//! Fixed-shape snapshot matrix filled one column per recorded step.

use nalgebra::{DMatrix, DVector, DVectorView};

/// Snapshot matrix of shape `(dof_count, step_count + 1)`.
///
/// Columns are written at most once, in any order; unwritten columns stay
/// zero. Shape mismatches are caller bugs and panic.
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    matrix: DMatrix<f64>,
    written: Vec<bool>,
}

impl SnapshotStore {
    pub fn new(dof_count: usize, step_count: usize) -> Self {
        let columns = step_count + 1;
        Self {
            matrix: DMatrix::zeros(dof_count, columns),
            written: vec![false; columns],
        }
    }

    /// Store `state` as column `k`.
    pub fn write(&mut self, k: usize, state: &DVector<f64>) {
        assert!(
            k < self.matrix.ncols(),
            "snapshot column {k} out of range ({} columns)",
            self.matrix.ncols()
        );
        assert_eq!(
            state.len(),
            self.matrix.nrows(),
            "snapshot length does not match dof count"
        );
        assert!(!self.written[k], "snapshot column {k} written twice");

        self.matrix.set_column(k, state);
        self.written[k] = true;
    }

    pub fn dof_count(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of preallocated columns.
    pub fn capacity(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn columns_written(&self) -> usize {
        self.written.iter().filter(|w| **w).count()
    }

    pub fn is_written(&self, k: usize) -> bool {
        self.written.get(k).copied().unwrap_or(false)
    }

    pub fn column(&self, k: usize) -> DVectorView<'_, f64> {
        self.matrix.column(k)
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn into_matrix(self) -> DMatrix<f64> {
        self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preallocates_one_extra_column() {
        let store = SnapshotStore::new(4, 10);
        assert_eq!(store.matrix().shape(), (4, 11));
        assert_eq!(store.columns_written(), 0);
        assert!(store.matrix().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn write_fills_single_column() {
        let mut store = SnapshotStore::new(3, 2);
        let v = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        store.write(1, &v);

        assert_eq!(store.columns_written(), 1);
        assert!(store.is_written(1));
        assert!(!store.is_written(0));
        assert_eq!(store.column(1).iter().copied().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
        assert!(store.column(0).iter().all(|v| *v == 0.0));
        assert!(store.column(2).iter().all(|v| *v == 0.0));
    }

    #[test]
    #[should_panic]
    fn wrong_length_panics() {
        let mut store = SnapshotStore::new(3, 2);
        store.write(0, &DVector::zeros(4));
    }

    #[test]
    #[should_panic]
    fn column_out_of_range_panics() {
        let mut store = SnapshotStore::new(3, 2);
        store.write(3, &DVector::zeros(3));
    }

    #[test]
    #[should_panic]
    fn double_write_panics() {
        let mut store = SnapshotStore::new(2, 2);
        store.write(0, &DVector::zeros(2));
        store.write(0, &DVector::zeros(2));
    }
}
