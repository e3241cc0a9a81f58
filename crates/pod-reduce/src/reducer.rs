//! POD reducer: spectrum, rank, basis, diagnostic plot.

use crate::basis::PodBasis;
use crate::error::{ReduceError, ReduceResult};
use crate::rank::select_rank;
use crate::spectrum::Spectrum;
use nalgebra::DMatrix;
use pod_core::{NullRenderer, Renderer};
use std::path::PathBuf;

/// Options for a reduction.
#[derive(Clone, Debug)]
pub struct ReduceOptions {
    /// Largest acceptable share of discarded singular-value energy
    pub energy_tolerance: f64,
    /// Upper bound on the basis size
    pub max_rank: Option<usize>,
    /// Labels the spectrum plot
    pub viscosity: f64,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            energy_tolerance: 1e-5,
            max_rank: None,
            viscosity: 1.0,
        }
    }
}

/// Result of a reduction.
#[derive(Clone, Debug)]
pub struct PodReduction {
    pub poddim: usize,
    /// Full descending spectrum
    pub singular_values: Vec<f64>,
    pub residual_energy: f64,
    pub basis: PodBasis,
    pub spectrum_plot: PathBuf,
}

#[derive(Clone, Debug, Default)]
pub struct PodReducer {
    options: ReduceOptions,
}

impl PodReducer {
    pub fn new(options: ReduceOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReduceOptions {
        &self.options
    }

    pub fn reduce(
        &self,
        snapshots: &DMatrix<f64>,
        renderer: &mut dyn Renderer,
    ) -> ReduceResult<PodReduction> {
        let spectrum = Spectrum::compute(snapshots)?;
        let selection = select_rank(
            spectrum.values(),
            self.options.energy_tolerance,
            self.options.max_rank,
        )?;

        tracing::info!(
            poddim = selection.rank,
            residual_energy = selection.residual_energy,
            modes_available = spectrum.len(),
            "pod dimension selected"
        );

        let spectrum_plot = renderer
            .render_spectrum(spectrum.values(), self.options.viscosity)
            .map_err(|e| ReduceError::Render {
                message: e.to_string(),
            })?;

        let basis = PodBasis::from_left_vectors(spectrum.left_vectors(), selection.rank)?;

        Ok(PodReduction {
            poddim: selection.rank,
            singular_values: spectrum.values().to_vec(),
            residual_energy: selection.residual_energy,
            basis,
            spectrum_plot,
        })
    }
}

/// `(poddim, singular_values)` for `snapshots`, without plotting.
pub fn reduce(snapshots: &DMatrix<f64>, energy_tolerance: f64) -> ReduceResult<(usize, Vec<f64>)> {
    let reducer = PodReducer::new(ReduceOptions {
        energy_tolerance,
        ..ReduceOptions::default()
    });
    let reduction = reducer.reduce(snapshots, &mut NullRenderer)?;
    Ok((reduction.poddim, reduction.singular_values))
}
