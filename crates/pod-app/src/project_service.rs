//! Config file loading, validation and initialization.

use std::path::Path;

use pod_project::RunConfig;

use crate::error::{AppError, AppResult};

/// Load and validate a YAML or JSON run config.
pub fn load_config(path: &Path) -> AppResult<RunConfig> {
    Ok(pod_project::load_config(path)?)
}

/// Load a config only to report whether it is valid.
pub fn validate_file(path: &Path) -> AppResult<RunConfig> {
    let config = load_config(path)?;
    tracing::info!(path = %path.display(), viscosities = config.viscosities.len(), "config is valid");
    Ok(config)
}

/// Write the default config to `path`, refusing to overwrite.
pub fn init_config(path: &Path) -> AppResult<RunConfig> {
    if path.exists() {
        return Err(AppError::ConfigExists {
            path: path.to_path_buf(),
        });
    }
    let config = RunConfig::default();
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => pod_project::save_json(path, &config)?,
        _ => pod_project::save_yaml(path, &config)?,
    }
    Ok(config)
}
