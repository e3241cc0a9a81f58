//! Run execution: one viscosity, or a sweep over all configured viscosities.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use pod_core::{NullRenderer, Renderer};
use pod_fem::BurgersEngine;
use pod_plot::SvgRenderer;
use pod_project::{RunConfig, validate_config};
use pod_reduce::{PodReducer, PodReduction};
use pod_sim::{SnapshotRun, StepProgress, TimeStepDriver};
use rayon::prelude::*;

use crate::error::{AppError, AppResult};
use crate::hash::compute_run_id;
use crate::options::{driver_options, fem_options, reduce_options};
use crate::progress::{RunProgressEvent, RunStage, StepReport};
use crate::summary::{RunSummary, save_summary};

/// Options for running every configured viscosity.
#[derive(Debug, Clone, Default)]
pub struct SweepOptions {
    /// Run viscosities on the rayon thread pool
    pub parallel: bool,
}

/// Result of a single-viscosity run.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub summary: RunSummary,
    pub summary_path: PathBuf,
    pub run: SnapshotRun,
    pub reduction: PodReduction,
}

/// Output directory of the run for `viscosity`.
pub fn run_dir(config: &RunConfig, viscosity: f64) -> PathBuf {
    Path::new(&config.output_dir).join(format!("nu_{viscosity}"))
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    viscosity: f64,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent::stage(
            viscosity,
            stage,
            started.elapsed().as_secs_f64(),
            message,
        ));
    }
}

fn check_inputs(config: &RunConfig) -> AppResult<()> {
    validate_config(config).map_err(|e| AppError::InvalidInput(e.to_string()))
}

pub fn run_viscosity(config: &RunConfig, viscosity: f64) -> AppResult<RunResponse> {
    run_viscosity_with_progress(config, viscosity, None)
}

/// Build, integrate, reduce and summarize one viscosity.
pub fn run_viscosity_with_progress(
    config: &RunConfig,
    viscosity: f64,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    check_inputs(config)?;
    if !viscosity.is_finite() || viscosity <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "viscosity must be finite and > 0, got {viscosity}"
        )));
    }

    let started = Instant::now();
    let run_id = compute_run_id(config, viscosity);
    let dir = run_dir(config, viscosity);
    std::fs::create_dir_all(&dir)?;

    let mut renderer: Box<dyn Renderer> = if config.render {
        Box::new(SvgRenderer::new(&dir)?)
    } else {
        Box::new(NullRenderer)
    };

    emit_progress(
        &mut progress_cb,
        viscosity,
        RunStage::BuildingEngine,
        started,
        Some(format!("{} elements", config.element_count)),
    );
    let mut engine = BurgersEngine::build(config.element_count, fem_options(config, viscosity))?;
    let driver = TimeStepDriver::new(driver_options(config, viscosity))?;

    emit_progress(
        &mut progress_cb,
        viscosity,
        RunStage::TimeStepping,
        started,
        None,
    );
    let run = {
        let mut forward = |p: StepProgress| {
            if let Some(cb) = progress_cb.as_deref_mut() {
                cb(RunProgressEvent {
                    viscosity,
                    stage: RunStage::TimeStepping,
                    elapsed_wall_s: started.elapsed().as_secs_f64(),
                    message: None,
                    step: Some(StepReport {
                        step: p.step,
                        step_count: p.step_count,
                        sim_time: p.time,
                        fraction_complete: p.step as f64 / p.step_count as f64,
                    }),
                });
            }
        };
        driver.run_with_progress(&mut engine, renderer.as_mut(), Some(&mut forward))?
    };

    emit_progress(&mut progress_cb, viscosity, RunStage::Reducing, started, None);
    let reducer = PodReducer::new(reduce_options(config, viscosity));
    let reduction = reducer.reduce(run.snapshots.matrix(), renderer.as_mut())?;

    emit_progress(
        &mut progress_cb,
        viscosity,
        RunStage::WritingSummary,
        started,
        None,
    );
    let plots = if config.render {
        run.plots
            .iter()
            .chain(std::iter::once(&reduction.spectrum_plot))
            .map(|p| p.display().to_string())
            .collect()
    } else {
        Vec::new()
    };
    let summary = RunSummary {
        run_id,
        timestamp: chrono::Utc::now().to_rfc3339(),
        viscosity,
        dof_count: run.snapshots.dof_count(),
        step_count: config.step_count,
        steps_executed: run.steps_executed,
        columns_written: run.snapshots.columns_written(),
        newton_iterations: engine.newton_iterations(),
        poddim: reduction.poddim,
        singular_values: reduction.singular_values.clone(),
        residual_energy: reduction.residual_energy,
        wall_time_s: started.elapsed().as_secs_f64(),
        plots,
    };
    let summary_path = dir.join("summary.json");
    save_summary(&summary_path, &summary)?;

    tracing::info!(
        viscosity,
        poddim = summary.poddim,
        steps = summary.steps_executed,
        wall_time_s = summary.wall_time_s,
        path = %summary_path.display(),
        "run complete"
    );
    emit_progress(&mut progress_cb, viscosity, RunStage::Completed, started, None);

    Ok(RunResponse {
        summary,
        summary_path,
        run,
        reduction,
    })
}

/// Run every viscosity in `config` and write `sweep.json` next to the runs.
pub fn run_sweep(config: &RunConfig, options: &SweepOptions) -> AppResult<Vec<RunSummary>> {
    check_inputs(config)?;
    let mut seen = HashSet::new();
    for nu in &config.viscosities {
        if !seen.insert(nu.to_bits()) {
            return Err(AppError::InvalidInput(format!(
                "viscosity {nu} listed more than once"
            )));
        }
    }

    tracing::info!(
        runs = config.viscosities.len(),
        parallel = options.parallel,
        "starting sweep"
    );

    let run_one = |nu: &f64| run_viscosity(config, *nu).map(|r| r.summary);
    let summaries: Vec<RunSummary> = if options.parallel {
        config
            .viscosities
            .par_iter()
            .map(run_one)
            .collect::<AppResult<_>>()?
    } else {
        config
            .viscosities
            .iter()
            .map(run_one)
            .collect::<AppResult<_>>()?
    };

    let sweep_path = Path::new(&config.output_dir).join("sweep.json");
    std::fs::write(&sweep_path, serde_json::to_string_pretty(&summaries)?)?;
    Ok(summaries)
}
