//! Piecewise-linear finite elements for the 1D viscous Burgers equation.
//!
//! `du/dt - nu u'' + u u' = 0` on an interval with Dirichlet ends,
//! discretized in time by backward Euler. Each step is a nonlinear system
//! solved by Newton with a tridiagonal Jacobian.

pub mod burgers;
pub mod engine;
pub mod error;
pub mod mesh;
pub mod space;

pub use burgers::BurgersForm;
pub use engine::{BurgersEngine, FemOptions, JacobianMode};
pub use error::{FemError, FemResult};
pub use mesh::IntervalMesh;
pub use space::FunctionSpace;
