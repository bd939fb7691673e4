use serde::Serialize;

use crate::scenario::identity::RunIdentity;

/// Where a scenario currently is in the register → login → dashboard →
/// course → module journey. No phase is ever re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Start,
    Registering,
    ConditionalLogin,
    VerifyingDashboard,
    CreatingCourse,
    OpeningCourse,
    CreatingModule,
    OpeningModule,
    Done,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Registering => "registration",
            Phase::ConditionalLogin => "conditional login",
            Phase::VerifyingDashboard => "dashboard verification",
            Phase::CreatingCourse => "course creation",
            Phase::OpeningCourse => "course opening",
            Phase::CreatingModule => "module creation",
            Phase::OpeningModule => "module opening",
            Phase::Done => "done",
        }
    }
}

/// How one step ended. Warnings cover ambiguous post-action verification
/// (the action ran, but the UI never confirmed); they do not fail the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StepOutcome {
    Passed,
    Warning(String),
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub phase: Phase,
    pub detail: String,
    pub outcome: StepOutcome,
    pub url: String,
}

/// Mutable, orchestrator-owned scenario state: created at scenario start,
/// discarded at scenario end, never shared between scenarios.
#[derive(Debug, Clone)]
pub struct ScenarioState {
    pub phase: Phase,
    pub identity: RunIdentity,
    pub steps: Vec<StepRecord>,
    pub last_url: String,
}

impl ScenarioState {
    pub fn new(identity: RunIdentity) -> Self {
        ScenarioState {
            phase: Phase::Start,
            identity,
            steps: Vec::new(),
            last_url: String::new(),
        }
    }

    /// Move to the next phase. Entry implies every required resolution of
    /// the previous phase succeeded; callers enforce that by aborting on
    /// error before advancing.
    pub fn enter(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn record(&mut self, detail: &str, outcome: StepOutcome) {
        self.steps.push(StepRecord {
            phase: self.phase,
            detail: detail.to_string(),
            outcome,
            url: self.last_url.clone(),
        });
    }

    pub fn record_passed(&mut self, detail: &str) {
        self.record(detail, StepOutcome::Passed);
    }

    pub fn record_warning(&mut self, detail: &str, message: &str) {
        self.record(detail, StepOutcome::Warning(message.to_string()));
    }

    pub fn has_failure(&self) -> bool {
        self.steps
            .iter()
            .any(|s| matches!(s.outcome, StepOutcome::Failed(_)))
    }

    pub fn warning_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Warning(_)))
            .count()
    }
}
