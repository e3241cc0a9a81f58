//! Driver control flow against mock discretization engines.

use nalgebra::DVector;
use pod_core::{CoreResult, NullRenderer, Renderer};
use pod_sim::{
    BoundaryValues, DiscretizationEngine, DriverOptions, RecordingMode, SimError, SolveFailure,
    TimeStepDriver,
};
use std::path::PathBuf;

/// Relaxes interior values halfway towards the right boundary value.
struct RelaxEngine {
    coordinates: Vec<f64>,
    solves: usize,
}

impl RelaxEngine {
    fn new(dof_count: usize) -> Self {
        let h = 2.0 / (dof_count - 1) as f64;
        Self {
            coordinates: (0..dof_count).map(|i| i as f64 * h).collect(),
            solves: 0,
        }
    }
}

impl DiscretizationEngine for RelaxEngine {
    fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    fn solve_step(
        &mut self,
        previous: &DVector<f64>,
        boundary: BoundaryValues,
        _initial_guess: &DVector<f64>,
        _dt: f64,
    ) -> Result<DVector<f64>, SolveFailure> {
        self.solves += 1;
        let mut next = previous.map(|v| 0.5 * (v + boundary.right));
        boundary.apply(&mut next);
        Ok(next)
    }
}

/// Fails on the n-th solve.
struct FailingEngine {
    inner: RelaxEngine,
    fail_on: usize,
}

impl DiscretizationEngine for FailingEngine {
    fn coordinates(&self) -> &[f64] {
        self.inner.coordinates()
    }

    fn solve_step(
        &mut self,
        previous: &DVector<f64>,
        boundary: BoundaryValues,
        initial_guess: &DVector<f64>,
        dt: f64,
    ) -> Result<DVector<f64>, SolveFailure> {
        if self.inner.solves + 1 == self.fail_on {
            return Err(SolveFailure::new("residual stagnated"));
        }
        self.inner.solve_step(previous, boundary, initial_guess, dt)
    }
}

#[derive(Default)]
struct CountingRenderer {
    field_steps: Vec<usize>,
}

impl Renderer for CountingRenderer {
    fn render_field(
        &mut self,
        step: usize,
        _coordinates: &[f64],
        _values: &[f64],
    ) -> CoreResult<PathBuf> {
        self.field_steps.push(step);
        Ok(PathBuf::from(pod_core::field_plot_name(step)))
    }

    fn render_spectrum(&mut self, _singular_values: &[f64], viscosity: f64) -> CoreResult<PathBuf> {
        Ok(PathBuf::from(pod_core::spectrum_plot_name(viscosity)))
    }
}

fn options(step_count: usize, recording: RecordingMode) -> DriverOptions {
    DriverOptions {
        viscosity: 1.0,
        final_time: 0.5,
        step_count,
        plot_interval: 4,
        boundary: BoundaryValues::default(),
        recording,
    }
}

#[test]
fn reference_mode_drops_final_state() {
    let mut engine = RelaxEngine::new(11);
    let driver = TimeStepDriver::new(options(10, RecordingMode::Reference)).unwrap();
    let run = driver.run(&mut engine, &mut NullRenderer).unwrap();

    assert_eq!(run.snapshots.capacity(), 11);
    assert_eq!(run.snapshots.columns_written(), 9);
    assert_eq!(run.steps_executed, 9);
    assert_eq!(engine.solves, 9);
    for k in 0..9 {
        assert!(run.snapshots.is_written(k));
    }
    for k in 9..11 {
        assert!(run.snapshots.column(k).iter().all(|v| *v == 0.0));
    }
    assert!((run.final_time_reached - 0.45).abs() < 1e-12);
}

#[test]
fn every_state_mode_fills_all_columns() {
    let mut engine = RelaxEngine::new(11);
    let driver = TimeStepDriver::new(options(10, RecordingMode::EveryState)).unwrap();
    let run = driver.run(&mut engine, &mut NullRenderer).unwrap();

    assert_eq!(run.snapshots.columns_written(), 11);
    assert_eq!(run.steps_executed, 10);
    assert_eq!(engine.solves, 10);
    assert!((run.final_time_reached - 0.5).abs() < 1e-12);

    let last = run.snapshots.column(10);
    for (a, b) in last.iter().zip(run.final_state.iter()) {
        assert_eq!(a, b);
    }
}

#[test]
fn first_column_is_initial_condition() {
    let mut engine = RelaxEngine::new(21);
    let driver = TimeStepDriver::new(options(5, RecordingMode::EveryState)).unwrap();
    let run = driver.run(&mut engine, &mut NullRenderer).unwrap();

    let expected = pod_sim::initial_state(engine.coordinates(), 1.0, BoundaryValues::default());
    for (a, b) in run.snapshots.column(0).iter().zip(expected.iter()) {
        assert_eq!(a, b);
    }
}

#[test]
fn boundary_entries_hold_in_every_snapshot() {
    let mut engine = RelaxEngine::new(9);
    let opts = DriverOptions {
        boundary: BoundaryValues::new(1.0, 1.0),
        ..options(10, RecordingMode::Reference)
    };
    let run = TimeStepDriver::new(opts)
        .unwrap()
        .run(&mut engine, &mut NullRenderer)
        .unwrap();

    let bc = BoundaryValues::new(1.0, 1.0);
    for k in 0..run.snapshots.capacity() {
        if run.snapshots.is_written(k) {
            let column: Vec<f64> = run.snapshots.column(k).iter().copied().collect();
            assert!(bc.holds_on(&column), "column {k}");
        }
    }
    assert!(bc.holds_on(run.final_state.as_slice()));
}

/// Returns a relaxed state with the right end left unconstrained.
struct LeakyEngine {
    inner: RelaxEngine,
}

impl DiscretizationEngine for LeakyEngine {
    fn coordinates(&self) -> &[f64] {
        self.inner.coordinates()
    }

    fn solve_step(
        &mut self,
        previous: &DVector<f64>,
        boundary: BoundaryValues,
        initial_guess: &DVector<f64>,
        dt: f64,
    ) -> Result<DVector<f64>, SolveFailure> {
        let mut next = self.inner.solve_step(previous, boundary, initial_guess, dt)?;
        let last = next.len() - 1;
        next[last] += 0.25;
        Ok(next)
    }
}

#[test]
fn engine_breaking_boundary_is_reported_not_patched() {
    let mut engine = LeakyEngine {
        inner: RelaxEngine::new(9),
    };
    let err = TimeStepDriver::new(options(10, RecordingMode::EveryState))
        .unwrap()
        .run(&mut engine, &mut NullRenderer)
        .unwrap_err();
    match err {
        SimError::Backend { message } => assert!(message.contains("step 1"), "{message}"),
        other => panic!("expected backend error, got {other:?}"),
    }
    assert_eq!(engine.inner.solves, 1);
}

#[test]
fn render_cadence_follows_plot_interval() {
    let mut reference_renderer = CountingRenderer::default();
    let mut engine = RelaxEngine::new(5);
    TimeStepDriver::new(DriverOptions {
        plot_interval: 5,
        ..options(10, RecordingMode::Reference)
    })
    .unwrap()
    .run(&mut engine, &mut reference_renderer)
    .unwrap();
    assert_eq!(reference_renderer.field_steps, vec![0, 5]);

    let mut every_renderer = CountingRenderer::default();
    let mut engine = RelaxEngine::new(5);
    let run = TimeStepDriver::new(DriverOptions {
        plot_interval: 5,
        ..options(10, RecordingMode::EveryState)
    })
    .unwrap()
    .run(&mut engine, &mut every_renderer)
    .unwrap();
    assert_eq!(every_renderer.field_steps, vec![0, 5, 10]);
    assert_eq!(
        run.plots,
        vec![
            PathBuf::from("burgers_time_viscous_0.svg"),
            PathBuf::from("burgers_time_viscous_5.svg"),
            PathBuf::from("burgers_time_viscous_10.svg"),
        ]
    );
}

#[test]
fn single_step_reference_run_writes_nothing() {
    let mut engine = RelaxEngine::new(5);
    let run = TimeStepDriver::new(options(1, RecordingMode::Reference))
        .unwrap()
        .run(&mut engine, &mut NullRenderer)
        .unwrap();
    assert_eq!(run.snapshots.columns_written(), 0);
    assert_eq!(engine.solves, 0);
}

#[test]
fn solver_failure_aborts_with_divergence() {
    let mut engine = FailingEngine {
        inner: RelaxEngine::new(7),
        fail_on: 3,
    };
    let err = TimeStepDriver::new(options(10, RecordingMode::EveryState))
        .unwrap()
        .run(&mut engine, &mut NullRenderer)
        .unwrap_err();

    match err {
        SimError::SolverDivergence { step, what } => {
            assert_eq!(step, 3);
            assert!(what.contains("stagnated"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn progress_reports_every_solve() {
    let mut engine = RelaxEngine::new(5);
    let mut seen = Vec::new();
    TimeStepDriver::new(options(4, RecordingMode::EveryState))
        .unwrap()
        .run_with_progress(
            &mut engine,
            &mut NullRenderer,
            Some(&mut |p: pod_sim::StepProgress| seen.push(p.step)),
        )
        .unwrap();
    assert_eq!(seen, vec![1, 2, 3, 4]);
}

#[test]
fn too_few_dofs_is_rejected() {
    let mut engine = RelaxEngine {
        coordinates: vec![0.0],
        solves: 0,
    };
    let err = pod_sim::run(
        &mut engine,
        &mut NullRenderer,
        options(3, RecordingMode::EveryState),
    )
    .unwrap_err();
    assert!(matches!(err, SimError::InvalidArg { .. }));
}
