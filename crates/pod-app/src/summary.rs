//! Serialized per-run summary.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub run_id: String,
    /// RFC 3339, UTC
    pub timestamp: String,
    pub viscosity: f64,
    pub dof_count: usize,
    pub step_count: usize,
    pub steps_executed: usize,
    pub columns_written: usize,
    /// Newton iterations summed over all steps
    pub newton_iterations: usize,
    pub poddim: usize,
    pub singular_values: Vec<f64>,
    pub residual_energy: f64,
    pub wall_time_s: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plots: Vec<String>,
}

pub fn save_summary(path: &Path, summary: &RunSummary) -> AppResult<()> {
    let content = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_summary(path: &Path) -> AppResult<RunSummary> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
