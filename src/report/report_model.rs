use serde::Serialize;

use crate::scenario::state::{ScenarioState, StepRecord};

/// Result of running one scenario to completion (or to its first
/// required-role/assertion failure).
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub passed: bool,
    pub steps: Vec<StepRecord>,
    /// Ambiguous post-action verifications; never fail the scenario.
    pub warnings: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,
}

impl ScenarioReport {
    pub fn from_state(name: &str, state: &ScenarioState, error: Option<String>) -> Self {
        let passed = error.is_none() && !state.has_failure();
        ScenarioReport {
            name: name.to_string(),
            passed,
            steps: state.steps.clone(),
            warnings: state.warning_count(),
            error,
            duration_ms: None,
        }
    }

    pub fn failed_to_start(name: &str, error: &str) -> Self {
        ScenarioReport {
            name: name.to_string(),
            passed: false,
            steps: Vec::new(),
            warnings: 0,
            error: Some(error.to_string()),
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

// ============================================================================
// Suite report — aggregates multiple ScenarioReport instances
// ============================================================================

/// Aggregated report for one suite run, consumed by the console reporter.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub suite_name: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,
    pub scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    /// Build a suite report from scenario results, computing the counts.
    pub fn from_results(suite_name: &str, results: Vec<ScenarioReport>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;
        SuiteReport {
            suite_name: suite_name.to_string(),
            total,
            passed,
            failed,
            duration_ms: None,
            scenarios: results,
        }
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
