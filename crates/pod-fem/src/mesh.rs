//! Uniform interval mesh.

use crate::error::{FemError, FemResult};

/// Uniform partition of `[x_left, x_right]` into `element_count` elements.
#[derive(Clone, Debug)]
pub struct IntervalMesh {
    vertices: Vec<f64>,
}

impl IntervalMesh {
    pub fn new(element_count: usize, x_left: f64, x_right: f64) -> FemResult<Self> {
        if element_count == 0 {
            return Err(FemError::InvalidMesh {
                what: "element_count must be positive",
            });
        }
        if !x_left.is_finite() || !x_right.is_finite() || x_right <= x_left {
            return Err(FemError::InvalidMesh {
                what: "interval must be finite with x_left < x_right",
            });
        }

        let h = (x_right - x_left) / element_count as f64;
        let mut vertices: Vec<f64> = (0..=element_count)
            .map(|i| x_left + i as f64 * h)
            .collect();
        // Pin the far end so boundary lookups are exact.
        vertices[element_count] = x_right;

        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[f64] {
        &self.vertices
    }

    pub fn element_count(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Endpoints of element `e`.
    pub fn element(&self, e: usize) -> (f64, f64) {
        (self.vertices[e], self.vertices[e + 1])
    }

    pub fn x_left(&self) -> f64 {
        self.vertices[0]
    }

    pub fn x_right(&self) -> f64 {
        self.vertices[self.vertices.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn vertices_cover_interval() {
        let mesh = IntervalMesh::new(10, 0.0, 2.0).unwrap();
        assert_eq!(mesh.vertices().len(), 11);
        assert_eq!(mesh.element_count(), 10);
        assert_eq!(mesh.x_left(), 0.0);
        assert_eq!(mesh.x_right(), 2.0);
        let (a, b) = mesh.element(3);
        assert!((a - 0.6).abs() < 1e-12);
        assert!((b - 0.8).abs() < 1e-12);
    }

    #[test]
    fn rejects_degenerate_meshes() {
        assert!(IntervalMesh::new(0, 0.0, 2.0).is_err());
        assert!(IntervalMesh::new(4, 1.0, 1.0).is_err());
        assert!(IntervalMesh::new(4, 0.0, f64::NAN).is_err());
    }

    proptest! {
        #[test]
        fn vertices_are_strictly_increasing(
            n in 1usize..500,
            x_left in -10.0f64..10.0,
            width in 0.1f64..10.0,
        ) {
            let mesh = IntervalMesh::new(n, x_left, x_left + width).unwrap();
            let v = mesh.vertices();
            prop_assert_eq!(v.len(), n + 1);
            prop_assert_eq!(v[0], x_left);
            prop_assert_eq!(v[n], x_left + width);
            prop_assert!(v.windows(2).all(|w| w[1] > w[0]));
        }
    }
}
