//! Error types for the pod-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Config file already exists: {path}")]
    ConfigExists { path: PathBuf },

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Discretization error: {0}")]
    Discretization(String),

    #[error("Reduction error: {0}")]
    Reduction(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pod-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<pod_project::ProjectError> for AppError {
    fn from(err: pod_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<pod_sim::SimError> for AppError {
    fn from(err: pod_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<pod_fem::FemError> for AppError {
    fn from(err: pod_fem::FemError) -> Self {
        AppError::Discretization(err.to_string())
    }
}

impl From<pod_reduce::ReduceError> for AppError {
    fn from(err: pod_reduce::ReduceError) -> Self {
        AppError::Reduction(err.to_string())
    }
}

impl From<pod_core::CoreError> for AppError {
    fn from(err: pod_core::CoreError) -> Self {
        AppError::Render(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
