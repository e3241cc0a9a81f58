//! Shared application service layer for burgers-pod.
//!
//! Turns a validated `RunConfig` into finished runs: builds the Burgers
//! engine, drives it to the final time, reduces the snapshot history and
//! writes a JSON summary per viscosity.

pub mod error;
pub mod hash;
pub mod options;
pub mod progress;
pub mod project_service;
pub mod run_service;
pub mod summary;

pub use error::{AppError, AppResult};
pub use hash::compute_run_id;
pub use options::{driver_options, fem_options, reduce_options};
pub use progress::{RunProgressEvent, RunStage, StepReport};
pub use project_service::{init_config, load_config, validate_file};
pub use run_service::{
    RunResponse, SweepOptions, run_dir, run_sweep, run_viscosity, run_viscosity_with_progress,
};
pub use summary::{RunSummary, load_summary, save_summary};
