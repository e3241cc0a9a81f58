//! Mapping from the file-level config to backend options.

use pod_fem::{FemOptions, JacobianMode};
use pod_project::{JacobianDef, RecordingDef, RunConfig};
use pod_reduce::ReduceOptions;
use pod_sim::{BoundaryValues, DriverOptions, RecordingMode};
use pod_solver::NewtonConfig;

pub fn driver_options(config: &RunConfig, viscosity: f64) -> DriverOptions {
    DriverOptions {
        viscosity,
        final_time: config.final_time,
        step_count: config.step_count,
        plot_interval: config.plot_interval,
        boundary: BoundaryValues::new(config.boundary.left, config.boundary.right),
        recording: match config.recording {
            RecordingDef::Reference => RecordingMode::Reference,
            RecordingDef::EveryState => RecordingMode::EveryState,
        },
    }
}

pub fn fem_options(config: &RunConfig, viscosity: f64) -> FemOptions {
    FemOptions {
        viscosity,
        diffusion: config.diffusion,
        jacobian: match config.jacobian {
            JacobianDef::Analytic => JacobianMode::Analytic,
            JacobianDef::FiniteDifference => JacobianMode::FiniteDifference,
        },
        newton: NewtonConfig {
            max_iterations: config.newton.max_iterations,
            abs_tol: config.newton.abs_tol,
            rel_tol: config.newton.rel_tol,
            ..NewtonConfig::default()
        },
        ..FemOptions::default()
    }
}

pub fn reduce_options(config: &RunConfig, viscosity: f64) -> ReduceOptions {
    ReduceOptions {
        energy_tolerance: config.energy_tolerance,
        max_rank: config.max_rank,
        viscosity,
    }
}
