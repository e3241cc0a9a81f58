use clap::{Parser, Subcommand};
use pod_app::{
    AppError, AppResult, RunProgressEvent, RunStage, RunSummary, SweepOptions, project_service,
    run_service, save_summary,
};
use pod_project::RunConfig;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pod-cli")]
#[command(about = "Burgers POD CLI - snapshot history and reduced basis for 1D Burgers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one viscosity and reduce its snapshot history
    Run(RunArgs),
    /// Run every viscosity listed in a config file
    Sweep {
        /// Path to the config YAML or JSON file
        #[arg(long)]
        config: PathBuf,
        /// Run viscosities in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// Validate config file syntax and values
    Validate {
        /// Path to the config YAML or JSON file
        config_path: PathBuf,
    },
    /// Write the default config to a new file
    Init {
        /// Path of the file to create
        config_path: PathBuf,
    },
}

#[derive(clap::Args)]
struct RunArgs {
    /// Config file; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of mesh elements
    #[arg(long)]
    elements: Option<usize>,
    /// Viscosity (defaults to the first one in the config)
    #[arg(long)]
    nu: Option<f64>,
    /// Number of time steps
    #[arg(long)]
    steps: Option<usize>,
    /// Final simulation time
    #[arg(long)]
    final_time: Option<f64>,
    /// Energy tolerance for the POD rank
    #[arg(long)]
    tolerance: Option<f64>,
    /// Output directory
    #[arg(long)]
    out: Option<PathBuf>,
    /// Skip writing plots
    #[arg(long)]
    no_render: bool,
    /// Also copy the run summary to this file
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => cmd_run(args),
        Commands::Sweep { config, parallel } => cmd_sweep(&config, parallel),
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Init { config_path } => cmd_init(&config_path),
    }
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = project_service::validate_file(config_path)?;
    println!(
        "✓ Config is valid ({} viscosities, {} elements, {} steps)",
        config.viscosities.len(),
        config.element_count,
        config.step_count
    );
    Ok(())
}

fn cmd_init(config_path: &Path) -> AppResult<()> {
    project_service::init_config(config_path)?;
    println!("✓ Wrote default config: {}", config_path.display());
    Ok(())
}

/// Apply command-line overrides on top of the file (or default) config.
fn resolve_config(args: &RunArgs) -> AppResult<(RunConfig, f64)> {
    let mut config = match &args.config {
        Some(path) => project_service::load_config(path)?,
        None => RunConfig::default(),
    };
    if let Some(elements) = args.elements {
        config.element_count = elements;
    }
    if let Some(steps) = args.steps {
        config.step_count = steps;
    }
    if let Some(final_time) = args.final_time {
        config.final_time = final_time;
    }
    if let Some(tolerance) = args.tolerance {
        config.energy_tolerance = tolerance;
    }
    if let Some(out) = &args.out {
        config.output_dir = out.display().to_string();
    }
    if args.no_render {
        config.render = false;
    }
    if let Some(nu) = args.nu {
        config.viscosities = vec![nu];
    }
    let viscosity = *config
        .viscosities
        .first()
        .ok_or_else(|| AppError::InvalidInput("no viscosity configured".to_string()))?;
    Ok((config, viscosity))
}

fn cmd_run(args: RunArgs) -> AppResult<()> {
    let (config, viscosity) = resolve_config(&args)?;
    println!(
        "Running Burgers: nu = {}, {} elements, {} steps to t = {}",
        viscosity, config.element_count, config.step_count, config.final_time
    );

    let mut last_emit = Instant::now();
    let mut last_stage = None;
    let response = run_service::run_viscosity_with_progress(
        &config,
        viscosity,
        Some(&mut |event| {
            let emit_now =
                last_stage != Some(event.stage) || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                last_stage = Some(event.stage);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    println!("✓ Run completed: {}", response.summary.run_id);
    print_summary(&response.summary);
    println!("  Summary: {}", response.summary_path.display());

    if let Some(path) = &args.summary {
        save_summary(path, &response.summary)?;
        println!("  Summary copied to {}", path.display());
    }
    Ok(())
}

fn cmd_sweep(config_path: &Path, parallel: bool) -> AppResult<()> {
    let config = project_service::load_config(config_path)?;
    println!(
        "Sweeping {} viscosities{}",
        config.viscosities.len(),
        if parallel { " in parallel" } else { "" }
    );
    let summaries = run_service::run_sweep(&config, &SweepOptions { parallel })?;
    for summary in &summaries {
        println!();
        print_summary(summary);
    }
    println!(
        "\n✓ Sweep completed: {}",
        Path::new(&config.output_dir).join("sweep.json").display()
    );
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("  nu = {}", summary.viscosity);
    println!("  Degrees of freedom: {}", summary.dof_count);
    println!(
        "  Steps: {} of {} ({} columns recorded)",
        summary.steps_executed, summary.step_count, summary.columns_written
    );
    println!("  Newton iterations: {}", summary.newton_iterations);
    println!(
        "  POD dimension: {} (residual energy {:.3e})",
        summary.poddim, summary.residual_energy
    );
    println!("  Wall time: {:.3}s", summary.wall_time_s);
    if let Ok(json) = serde_json::to_string(&summary.singular_values) {
        tracing::debug!(singular_values = %json, "spectrum");
    }
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (&event.stage, &event.step) {
        (RunStage::TimeStepping, Some(s)) => {
            let width = 28usize;
            let filled = ((s.fraction_complete * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            print!(
                "\r[{}] {:>6.2}%  t={:.4}  step={}/{}  elapsed={:.1}s",
                bar,
                s.fraction_complete * 100.0,
                s.sim_time,
                s.step,
                s.step_count,
                event.elapsed_wall_s
            );
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            print!("{}", line);
        }
    }
    let _ = io::stdout().flush();
}
