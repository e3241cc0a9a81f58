//! Run configuration validation.

use crate::schema::{LATEST_VERSION, RunConfig};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Empty list: {field}")]
    Empty { field: String },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, value, "must be finite and > 0"));
    }
    Ok(())
}

fn require_at_least_one(field: &str, value: usize) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(invalid(field, value, "must be >= 1"));
    }
    Ok(())
}

pub fn validate_config(config: &RunConfig) -> Result<(), ValidationError> {
    if config.version == 0 || config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    require_at_least_one("element_count", config.element_count)?;

    if config.viscosities.is_empty() {
        return Err(ValidationError::Empty {
            field: "viscosities".to_string(),
        });
    }
    for (i, nu) in config.viscosities.iter().enumerate() {
        require_positive(&format!("viscosities[{i}]"), *nu)?;
    }

    require_positive("final_time", config.final_time)?;
    require_at_least_one("step_count", config.step_count)?;
    require_at_least_one("plot_interval", config.plot_interval)?;

    if !config.energy_tolerance.is_finite() || config.energy_tolerance < 0.0 {
        return Err(invalid(
            "energy_tolerance",
            config.energy_tolerance,
            "must be finite and >= 0",
        ));
    }
    if let Some(max_rank) = config.max_rank {
        require_at_least_one("max_rank", max_rank)?;
    }

    for (field, value) in [
        ("boundary.left", config.boundary.left),
        ("boundary.right", config.boundary.right),
    ] {
        if !value.is_finite() {
            return Err(invalid(field, value, "must be finite"));
        }
    }

    require_at_least_one("newton.max_iterations", config.newton.max_iterations)?;
    require_positive("newton.abs_tol", config.newton.abs_tol)?;
    require_positive("newton.rel_tol", config.newton.rel_tol)?;

    if config.output_dir.trim().is_empty() {
        return Err(ValidationError::Empty {
            field: "output_dir".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: ValidationError) -> String {
        match err {
            ValidationError::InvalidValue { field, .. } => field,
            ValidationError::Empty { field } => field,
            ValidationError::UnsupportedVersion { version } => format!("version {version}"),
        }
    }

    #[test]
    fn default_is_valid() {
        validate_config(&RunConfig::default()).unwrap();
    }

    #[test]
    fn rejects_each_invalid_field() {
        let cases: Vec<(&str, Box<dyn Fn(&mut RunConfig)>)> = vec![
            ("version 2", Box::new(|c| c.version = 2)),
            ("element_count", Box::new(|c| c.element_count = 0)),
            ("viscosities", Box::new(|c| c.viscosities.clear())),
            ("viscosities[1]", Box::new(|c| c.viscosities = vec![1.0, -0.1])),
            ("viscosities[0]", Box::new(|c| c.viscosities = vec![f64::NAN])),
            ("final_time", Box::new(|c| c.final_time = 0.0)),
            ("step_count", Box::new(|c| c.step_count = 0)),
            ("plot_interval", Box::new(|c| c.plot_interval = 0)),
            ("energy_tolerance", Box::new(|c| c.energy_tolerance = -1e-3)),
            ("max_rank", Box::new(|c| c.max_rank = Some(0))),
            ("boundary.right", Box::new(|c| c.boundary.right = f64::INFINITY)),
            ("newton.max_iterations", Box::new(|c| c.newton.max_iterations = 0)),
            ("newton.abs_tol", Box::new(|c| c.newton.abs_tol = 0.0)),
            ("output_dir", Box::new(|c| c.output_dir = "  ".to_string())),
        ];

        for (expected, mutate) in cases {
            let mut config = RunConfig::default();
            mutate(&mut config);
            let err = validate_config(&config).unwrap_err();
            assert_eq!(field_of(err), expected);
        }
    }

    #[test]
    fn zero_tolerance_is_allowed() {
        let config = RunConfig {
            energy_tolerance: 0.0,
            ..RunConfig::default()
        };
        validate_config(&config).unwrap();
    }
}
