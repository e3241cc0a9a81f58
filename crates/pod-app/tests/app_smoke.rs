//! End-to-end runs on a small mesh.

use std::path::PathBuf;

use pod_app::{
    AppError, RunProgressEvent, RunStage, SweepOptions, load_summary, run_dir, run_sweep,
    run_viscosity, run_viscosity_with_progress,
};
use pod_project::{RecordingDef, RunConfig};

fn small_config(name: &str) -> RunConfig {
    let out: PathBuf = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&out);
    RunConfig {
        element_count: 16,
        step_count: 10,
        plot_interval: 5,
        output_dir: out.display().to_string(),
        ..RunConfig::default()
    }
}

#[test]
fn single_run_writes_summary_and_plots() {
    let config = small_config("pod_app_single_run");
    let response = run_viscosity(&config, 1.0).unwrap();
    let summary = &response.summary;

    assert_eq!(summary.dof_count, 17);
    assert_eq!(summary.steps_executed, 10);
    assert_eq!(summary.columns_written, 11);
    assert!(summary.poddim >= 1 && summary.poddim <= 11);
    assert_eq!(summary.singular_values.len(), 11);
    assert!(summary.residual_energy <= config.energy_tolerance);
    assert!(summary.newton_iterations >= 10);
    assert_eq!(summary.run_id.len(), 64);
    assert!(chrono::DateTime::parse_from_rfc3339(&summary.timestamp).is_ok());

    let dir = run_dir(&config, 1.0);
    for name in [
        "burgers_time_viscous_0.svg",
        "burgers_time_viscous_5.svg",
        "burgers_time_viscous_10.svg",
        "burgers_viscous_1.svg",
    ] {
        assert!(dir.join(name).exists(), "missing {name}");
    }
    assert_eq!(summary.plots.len(), 4);

    let loaded = load_summary(&response.summary_path).unwrap();
    assert_eq!(&loaded, summary);
    assert_eq!(response.reduction.basis.rank(), summary.poddim);
}

#[test]
fn reference_recording_leaves_two_columns_empty() {
    let config = RunConfig {
        recording: RecordingDef::Reference,
        render: false,
        ..small_config("pod_app_reference_run")
    };
    let response = run_viscosity(&config, 1.0).unwrap();
    assert_eq!(response.summary.steps_executed, 9);
    assert_eq!(response.summary.columns_written, 9);
    assert!(response.summary.plots.is_empty());
    assert!(!run_dir(&config, 1.0).join("burgers_time_viscous_0.svg").exists());
}

#[test]
fn progress_events_cover_every_stage_in_order() {
    let config = RunConfig {
        render: false,
        ..small_config("pod_app_progress_run")
    };
    let mut events: Vec<RunProgressEvent> = Vec::new();
    run_viscosity_with_progress(&config, 0.5, Some(&mut |event| events.push(event))).unwrap();

    let mut stages: Vec<RunStage> = events.iter().map(|e| e.stage).collect();
    stages.dedup();
    assert_eq!(
        stages,
        vec![
            RunStage::BuildingEngine,
            RunStage::TimeStepping,
            RunStage::Reducing,
            RunStage::WritingSummary,
            RunStage::Completed,
        ]
    );

    let steps: Vec<usize> = events
        .iter()
        .filter_map(|e| e.step.as_ref().map(|s| s.step))
        .collect();
    assert_eq!(steps, (1..=10).collect::<Vec<_>>());
    assert!(events.iter().all(|e| e.viscosity == 0.5));
}

#[test]
fn sweep_runs_each_viscosity() {
    let config = RunConfig {
        viscosities: vec![0.5, 1.0],
        render: false,
        ..small_config("pod_app_sweep")
    };
    let summaries = run_sweep(&config, &SweepOptions { parallel: true }).unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].viscosity, 0.5);
    assert_eq!(summaries[1].viscosity, 1.0);
    assert_ne!(summaries[0].run_id, summaries[1].run_id);

    let sweep_path = PathBuf::from(&config.output_dir).join("sweep.json");
    assert!(sweep_path.exists());
    assert!(run_dir(&config, 0.5).join("summary.json").exists());
    assert!(run_dir(&config, 1.0).join("summary.json").exists());
}

#[test]
fn sequential_and_parallel_sweeps_agree() {
    let config = RunConfig {
        viscosities: vec![0.25, 1.0],
        render: false,
        ..small_config("pod_app_sweep_compare")
    };
    let seq = run_sweep(&config, &SweepOptions { parallel: false }).unwrap();
    let par = run_sweep(&config, &SweepOptions { parallel: true }).unwrap();
    for (a, b) in seq.iter().zip(par.iter()) {
        assert_eq!(a.run_id, b.run_id);
        assert_eq!(a.poddim, b.poddim);
        assert_eq!(a.singular_values, b.singular_values);
    }
}

#[test]
fn rejects_bad_inputs() {
    let config = small_config("pod_app_bad_inputs");
    assert!(matches!(
        run_viscosity(&config, 0.0),
        Err(AppError::InvalidInput(_))
    ));

    let dup = RunConfig {
        viscosities: vec![1.0, 1.0],
        ..config.clone()
    };
    assert!(matches!(
        run_sweep(&dup, &SweepOptions::default()),
        Err(AppError::InvalidInput(_))
    ));

    let capped = RunConfig {
        max_rank: Some(1),
        energy_tolerance: 0.0,
        render: false,
        ..config
    };
    assert!(matches!(
        run_viscosity(&capped, 1.0),
        Err(AppError::Reduction(_))
    ));
}
