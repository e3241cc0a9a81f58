//! Run configuration schema.
//!
//! Every field has a default, so an empty document is a valid config that
//! reproduces the reference Burgers run.

use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub version: u32,
    /// Number of mesh elements on `[0, 2]`.
    pub element_count: usize,
    /// One run per entry.
    pub viscosities: Vec<f64>,
    pub final_time: f64,
    pub step_count: usize,
    pub plot_interval: usize,
    pub energy_tolerance: f64,
    pub max_rank: Option<usize>,
    pub boundary: BoundaryDef,
    pub recording: RecordingDef,
    /// Include the viscous term in the residual.
    pub diffusion: bool,
    pub jacobian: JacobianDef,
    pub newton: NewtonDef,
    pub output_dir: String,
    pub render: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            version: LATEST_VERSION,
            element_count: 1000,
            viscosities: vec![1.0],
            final_time: 0.5,
            step_count: 1000,
            plot_interval: 25,
            energy_tolerance: 1e-5,
            max_rank: None,
            boundary: BoundaryDef::default(),
            recording: RecordingDef::default(),
            diffusion: true,
            jacobian: JacobianDef::default(),
            newton: NewtonDef::default(),
            output_dir: "out".to_string(),
            render: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoundaryDef {
    pub left: f64,
    pub right: f64,
}

impl Default for BoundaryDef {
    fn default() -> Self {
        Self {
            left: 1.0,
            right: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecordingDef {
    /// Stop one step early; last two columns stay zero.
    Reference,
    #[default]
    EveryState,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JacobianDef {
    #[default]
    Analytic,
    FiniteDifference,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NewtonDef {
    pub max_iterations: usize,
    pub abs_tol: f64,
    pub rel_tol: f64,
}

impl Default for NewtonDef {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            abs_tol: 1e-10,
            rel_tol: 1e-12,
        }
    }
}
