//! Renderer writing one SVG file per plot.

use crate::config::PlotConfig;
use plotters::coord::Shift;
use plotters::prelude::*;
use pod_core::{CoreError, CoreResult, Renderer, field_plot_name, spectrum_plot_name};
use std::error::Error;
use std::path::{Path, PathBuf};

/// Writes field and spectrum plots into `output_dir`.
#[derive(Clone, Debug)]
pub struct SvgRenderer {
    output_dir: PathBuf,
    config: PlotConfig,
}

impl SvgRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> CoreResult<Self> {
        Self::with_config(output_dir, PlotConfig::default())
    }

    pub fn with_config(output_dir: impl Into<PathBuf>, config: PlotConfig) -> CoreResult<Self> {
        let output_dir = output_dir.into();
        if !output_dir.exists() {
            std::fs::create_dir_all(&output_dir)?;
        }
        Ok(Self { output_dir, config })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl Renderer for SvgRenderer {
    fn render_field(
        &mut self,
        step: usize,
        coordinates: &[f64],
        values: &[f64],
    ) -> CoreResult<PathBuf> {
        let path = self.output_dir.join(field_plot_name(step));
        {
            let root = SVGBackend::new(&path, (self.config.width, self.config.height))
                .into_drawing_area();
            draw_field(&root, step, coordinates, values, &self.config)
                .map_err(|e| render_error(&path, e))?;
        }
        tracing::info!(path = %path.display(), "graphics saved");
        Ok(path)
    }

    fn render_spectrum(&mut self, singular_values: &[f64], viscosity: f64) -> CoreResult<PathBuf> {
        let path = self.output_dir.join(spectrum_plot_name(viscosity));
        {
            let root = SVGBackend::new(&path, (self.config.width, self.config.height))
                .into_drawing_area();
            draw_spectrum(&root, singular_values, viscosity, &self.config)
                .map_err(|e| render_error(&path, e))?;
        }
        tracing::info!(path = %path.display(), "graphics saved");
        Ok(path)
    }
}

fn render_error(path: &Path, e: Box<dyn Error>) -> CoreError {
    CoreError::Render {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

/// Padded `(min, max)` of the finite entries; `(0, 1)` when there are none.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return (0.0, 1.0);
    }
    let pad = if hi > lo { 0.05 * (hi - lo) } else { 0.5 };
    (lo - pad, hi + pad)
}

fn draw_field<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    step: usize,
    coordinates: &[f64],
    values: &[f64],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    let (x_min, x_max) = padded_range(coordinates.iter().copied());
    let (y_min, y_max) = padded_range(values.iter().copied());

    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(root)
        .caption(format!("step {step}"), ("sans-serif", 24).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc("x").y_desc("u");
    if config.show_grid {
        mesh.draw()?;
    } else {
        mesh.disable_mesh().draw()?;
    }

    chart.draw_series(LineSeries::new(
        coordinates.iter().zip(values.iter()).map(|(x, u)| (*x, *u)),
        config.line_color.stroke_width(config.line_width),
    ))?;

    root.present()?;
    Ok(())
}

fn draw_spectrum<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    singular_values: &[f64],
    viscosity: f64,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    <DB as DrawingBackend>::ErrorType: 'static,
{
    // Zeros have no place on a log axis.
    let positive: Vec<(f64, f64)> = singular_values
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_finite() && **s > 0.0)
        .map(|(i, s)| (i as f64, *s))
        .collect();

    let y_min = positive.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let y_max = positive.iter().map(|p| p.1).fold(0.0, f64::max);
    let (y_min, y_max) = if positive.is_empty() {
        (1e-16, 1.0)
    } else {
        (y_min * 0.5, y_max * 2.0)
    };
    let x_max = singular_values.len().max(1) as f64;

    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(root)
        .caption(format!("nu = {viscosity}"), ("sans-serif", 24).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..x_max, (y_min..y_max).log_scale())?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc("index").y_desc("singular value");
    if config.show_grid {
        mesh.draw()?;
    } else {
        mesh.disable_mesh().draw()?;
    }

    chart.draw_series(
        positive
            .iter()
            .map(|(i, s)| Circle::new((*i, *s), 2, config.point_color.filled())),
    )?;

    root.present()?;
    Ok(())
}
