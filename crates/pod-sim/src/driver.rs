//! Time-step driver and snapshot recording.

use crate::error::{SimError, SimResult};
use crate::initial::initial_state;
use crate::model::{BoundaryValues, DiscretizationEngine};
use crate::snapshot::SnapshotStore;
use nalgebra::DVector;
use pod_core::{Renderer, ensure_finite, ensure_positive};
use std::path::PathBuf;

/// Which states end up in the snapshot matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecordingMode {
    /// Render, then stop once `t >= final_time - dt`, else record and
    /// advance.
    ///
    /// With `step_count = N` this writes `N - 1` columns, performs `N - 1`
    /// solves and never records the last converged state; the final two
    /// columns stay zero.
    Reference,
    /// Record the initial state and every converged state up to
    /// `t = final_time`: `N` solves, all `N + 1` columns written.
    #[default]
    EveryState,
}

/// Options for a time-stepping run.
#[derive(Clone, Debug)]
pub struct DriverOptions {
    /// Viscosity; also sets the initial bump amplitude
    pub viscosity: f64,
    /// Final simulation time
    pub final_time: f64,
    /// Number of fixed steps the final time is divided into
    pub step_count: usize,
    /// Render the field every N-th step
    pub plot_interval: usize,
    /// Dirichlet values at both ends
    pub boundary: BoundaryValues,
    pub recording: RecordingMode,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            viscosity: 1.0,
            final_time: 0.5,
            step_count: 1000,
            plot_interval: 25,
            boundary: BoundaryValues::default(),
            recording: RecordingMode::default(),
        }
    }
}

impl DriverOptions {
    /// Fixed step size.
    pub fn dt(&self) -> f64 {
        self.final_time / self.step_count as f64
    }

    pub fn validate(&self) -> SimResult<()> {
        ensure_positive(self.viscosity, "viscosity must be positive")?;
        ensure_positive(self.final_time, "final_time must be positive")?;
        if self.step_count == 0 {
            return Err(SimError::InvalidArg {
                what: "step_count must be positive",
            });
        }
        if self.plot_interval == 0 {
            return Err(SimError::InvalidArg {
                what: "plot_interval must be positive",
            });
        }
        ensure_finite(self.boundary.left, "left boundary value")?;
        ensure_finite(self.boundary.right, "right boundary value")?;
        Ok(())
    }
}

/// Progress report emitted after every solve.
#[derive(Clone, Debug)]
pub struct StepProgress {
    pub step: usize,
    pub step_count: usize,
    pub time: f64,
}

/// Output of a completed run.
#[derive(Clone, Debug)]
pub struct SnapshotRun {
    pub snapshots: SnapshotStore,
    /// Number of successful solves
    pub steps_executed: usize,
    /// Simulation time of `final_state`
    pub final_time_reached: f64,
    /// Last converged state, recorded or not
    pub final_state: DVector<f64>,
    /// Files reported by the renderer, in step order
    pub plots: Vec<PathBuf>,
}

/// Drives a discretization engine from the initial condition to the final time.
#[derive(Clone, Debug)]
pub struct TimeStepDriver {
    options: DriverOptions,
}

impl TimeStepDriver {
    pub fn new(options: DriverOptions) -> SimResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &DriverOptions {
        &self.options
    }

    pub fn run<E: DiscretizationEngine + ?Sized>(
        &self,
        engine: &mut E,
        renderer: &mut dyn Renderer,
    ) -> SimResult<SnapshotRun> {
        self.run_with_progress(engine, renderer, None)
    }

    pub fn run_with_progress<E: DiscretizationEngine + ?Sized>(
        &self,
        engine: &mut E,
        renderer: &mut dyn Renderer,
        mut progress_cb: Option<&mut dyn FnMut(StepProgress)>,
    ) -> SimResult<SnapshotRun> {
        let opts = &self.options;
        let dt = opts.dt();
        let coordinates = engine.coordinates().to_vec();
        let dof_count = coordinates.len();
        if dof_count < 2 {
            return Err(SimError::InvalidArg {
                what: "engine must expose at least two degrees of freedom",
            });
        }

        tracing::info!(
            dof_count,
            viscosity = opts.viscosity,
            dt,
            step_count = opts.step_count,
            recording = ?opts.recording,
            "starting time integration"
        );

        let mut state = initial_state(&coordinates, opts.viscosity, opts.boundary);
        let mut snapshots = SnapshotStore::new(dof_count, opts.step_count);
        let mut plots = Vec::new();
        let mut step = 0usize;

        loop {
            if step % opts.plot_interval == 0 {
                let path = renderer
                    .render_field(step, &coordinates, state.as_slice())
                    .map_err(|e| SimError::Render {
                        message: e.to_string(),
                    })?;
                tracing::debug!(step, path = %path.display(), "field rendered");
                plots.push(path);
            }

            if opts.recording == RecordingMode::EveryState {
                snapshots.write(step, &state);
            }

            if self.reached_final_time(step) {
                tracing::info!(step, time = step as f64 * dt, "reached final time");
                break;
            }

            if opts.recording == RecordingMode::Reference {
                snapshots.write(step, &state);
            }

            step += 1;
            let next = engine
                .solve_step(&state, opts.boundary, &state, dt)
                .map_err(|e| {
                    tracing::warn!(step, error = %e, "nonlinear solve failed");
                    SimError::SolverDivergence { step, what: e.what }
                })?;
            if next.len() != dof_count {
                return Err(SimError::Backend {
                    message: format!(
                        "engine returned {} values, expected {}",
                        next.len(),
                        dof_count
                    ),
                });
            }
            if !opts.boundary.holds_on(next.as_slice()) {
                return Err(SimError::Backend {
                    message: format!(
                        "engine broke boundary values at step {step}: got ({}, {}), expected ({}, {})",
                        next[0],
                        next[dof_count - 1],
                        opts.boundary.left,
                        opts.boundary.right
                    ),
                });
            }
            state = next;

            tracing::debug!(step, time = step as f64 * dt, "step converged");
            if let Some(cb) = progress_cb.as_deref_mut() {
                cb(StepProgress {
                    step,
                    step_count: opts.step_count,
                    time: step as f64 * dt,
                });
            }
        }

        Ok(SnapshotRun {
            snapshots,
            steps_executed: step,
            final_time_reached: step as f64 * dt,
            final_state: state,
            plots,
        })
    }

    /// `t >= final_time - dt` (reference) or `t >= final_time` (every state),
    /// with `t = step * dt` compared on the step index.
    fn reached_final_time(&self, step: usize) -> bool {
        match self.options.recording {
            RecordingMode::Reference => step + 1 >= self.options.step_count,
            RecordingMode::EveryState => step >= self.options.step_count,
        }
    }
}

/// Validate `options` and run a driver over `engine`.
pub fn run<E: DiscretizationEngine + ?Sized>(
    engine: &mut E,
    renderer: &mut dyn Renderer,
    options: DriverOptions,
) -> SimResult<SnapshotRun> {
    TimeStepDriver::new(options)?.run(engine, renderer)
}
