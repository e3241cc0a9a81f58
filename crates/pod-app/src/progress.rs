//! Progress events streamed to frontends during a run.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    BuildingEngine,
    TimeStepping,
    Reducing,
    WritingSummary,
    Completed,
}

impl RunStage {
    pub fn label(&self) -> &'static str {
        match self {
            RunStage::BuildingEngine => "building engine",
            RunStage::TimeStepping => "time stepping",
            RunStage::Reducing => "reducing",
            RunStage::WritingSummary => "writing summary",
            RunStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StepReport {
    pub step: usize,
    pub step_count: usize,
    pub sim_time: f64,
    pub fraction_complete: f64,
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub viscosity: f64,
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
    pub step: Option<StepReport>,
}

impl RunProgressEvent {
    pub fn stage(
        viscosity: f64,
        stage: RunStage,
        elapsed_wall_s: f64,
        message: Option<String>,
    ) -> Self {
        Self {
            viscosity,
            stage,
            elapsed_wall_s,
            message,
            step: None,
        }
    }
}
