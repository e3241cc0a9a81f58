//! Time stepping and snapshot recording.
//!
//! Provides:
//! - the `DiscretizationEngine` seam (one implicit step from a previous state)
//! - closed-form initial condition and Dirichlet boundary values
//! - a fixed-shape, column-per-step snapshot store
//! - the time-step driver that ties them together

pub mod driver;
pub mod error;
pub mod initial;
pub mod model;
pub mod snapshot;

pub use driver::{DriverOptions, RecordingMode, SnapshotRun, StepProgress, TimeStepDriver, run};
pub use error::{SimError, SimResult, SolveFailure};
pub use initial::{initial_condition, initial_state};
pub use model::{BoundaryValues, DiscretizationEngine};
pub use snapshot::SnapshotStore;
