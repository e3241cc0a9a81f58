//! Content-based hashing for run IDs.

use pod_project::RunConfig;
use sha2::{Digest, Sha256};

/// Hash of the full configuration plus the viscosity of this run.
pub fn compute_run_id(config: &RunConfig, viscosity: f64) -> String {
    let mut hasher = Sha256::new();

    let config_json = serde_json::to_string(config).unwrap_or_default();
    hasher.update(config_json.as_bytes());
    hasher.update(viscosity.to_bits().to_le_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
