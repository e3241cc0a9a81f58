//! Rendering seam.
//!
//! The time-step driver and the POD reducer emit plots as a side channel.
//! Nothing they return depends on a renderer, so tests run with
//! [`NullRenderer`].

use crate::error::CoreResult;
use std::path::PathBuf;

/// Writes line plots of a field and of a singular-value decay.
pub trait Renderer {
    /// Plot `values` against `coordinates` for time step `step`.
    fn render_field(
        &mut self,
        step: usize,
        coordinates: &[f64],
        values: &[f64],
    ) -> CoreResult<PathBuf>;

    /// Plot the singular spectrum on a log scale.
    fn render_spectrum(&mut self, singular_values: &[f64], viscosity: f64) -> CoreResult<PathBuf>;
}

/// Renderer that writes nothing and reports the file it would have written.
#[derive(Clone, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render_field(
        &mut self,
        step: usize,
        _coordinates: &[f64],
        _values: &[f64],
    ) -> CoreResult<PathBuf> {
        Ok(PathBuf::from(field_plot_name(step)))
    }

    fn render_spectrum(
        &mut self,
        _singular_values: &[f64],
        viscosity: f64,
    ) -> CoreResult<PathBuf> {
        Ok(PathBuf::from(spectrum_plot_name(viscosity)))
    }
}

/// File name of the field plot for a step.
pub fn field_plot_name(step: usize) -> String {
    format!("burgers_time_viscous_{step}.svg")
}

/// File name of the spectrum plot for a viscosity.
pub fn spectrum_plot_name(viscosity: f64) -> String {
    format!("burgers_viscous_{viscosity}.svg")
}
