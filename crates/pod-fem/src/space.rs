//! Continuous piecewise-linear (P1) function space.

use crate::mesh::IntervalMesh;

/// P1 Lagrange space: one dof per mesh vertex, in vertex order.
#[derive(Clone, Debug)]
pub struct FunctionSpace {
    mesh: IntervalMesh,
}

impl FunctionSpace {
    pub fn p1(mesh: IntervalMesh) -> Self {
        Self { mesh }
    }

    pub fn mesh(&self) -> &IntervalMesh {
        &self.mesh
    }

    pub fn dof_count(&self) -> usize {
        self.mesh.vertices().len()
    }

    pub fn dof_coordinates(&self) -> &[f64] {
        self.mesh.vertices()
    }

    /// Global dofs of element `e` (left, right).
    pub fn element_dofs(&self, e: usize) -> (usize, usize) {
        (e, e + 1)
    }

    /// Boundary dofs (left end, right end).
    pub fn boundary_dofs(&self) -> (usize, usize) {
        (0, self.dof_count() - 1)
    }
}
