use flowcheck::report::console::format_console_report;
use flowcheck::report::report_model::{ScenarioReport, SuiteReport};
use flowcheck::scenario::identity::RunIdentity;
use flowcheck::scenario::state::{Phase, ScenarioState, StepOutcome};

// =========================================================================
// Helpers
// =========================================================================

fn state_with(outcomes: &[(&str, StepOutcome)]) -> ScenarioState {
    let mut state = ScenarioState::new(RunIdentity::from_timestamp("testuser", 1700000000));
    state.enter(Phase::Registering);
    state.last_url = "http://localhost:5173/signup".to_string();
    for (detail, outcome) in outcomes {
        state.record(detail, outcome.clone());
    }
    state
}

// =========================================================================
// Scenario report
// =========================================================================

#[test]
fn report_passes_with_warnings_only() {
    let state = state_with(&[
        ("filled email field", StepOutcome::Passed),
        (
            "faculty checkbox",
            StepOutcome::Warning("no faculty checkbox found".into()),
        ),
    ]);

    let report = ScenarioReport::from_state("registration", &state, None);

    assert!(report.passed);
    assert_eq!(report.warnings, 1);
    assert_eq!(report.steps.len(), 2);
}

#[test]
fn report_fails_on_failed_step_even_without_error() {
    let state = state_with(&[(
        "registration submitted",
        StepOutcome::Failed("no success indicator".into()),
    )]);

    let report = ScenarioReport::from_state("registration", &state, None);

    assert!(!report.passed);
}

#[test]
fn report_fails_when_flow_errored() {
    let state = state_with(&[("filled email field", StepOutcome::Passed)]);

    let report = ScenarioReport::from_state(
        "registration",
        &state,
        Some("password input should exist during registration".to_string()),
    );

    assert!(!report.passed);
}

// =========================================================================
// Suite aggregation
// =========================================================================

#[test]
fn suite_report_counts_outcomes() {
    let passing = ScenarioReport::from_state("navigation", &state_with(&[]), None);
    let failing = ScenarioReport::failed_to_start("bogus", "Unknown scenario 'bogus'");

    let suite = SuiteReport::from_results("flowcheck", vec![passing, failing]);

    assert_eq!(suite.total, 2);
    assert_eq!(suite.passed, 1);
    assert_eq!(suite.failed, 1);
    assert!(!suite.all_passed());
}

#[test]
fn empty_suite_trivially_passes() {
    let suite = SuiteReport::from_results("flowcheck", Vec::new());
    assert!(suite.all_passed());
}

// =========================================================================
// Console formatting
// =========================================================================

#[test]
fn console_report_shows_markers_and_summary() {
    let passing = ScenarioReport::from_state(
        "auth",
        &state_with(&[
            ("filled email field", StepOutcome::Passed),
            (
                "faculty checkbox",
                StepOutcome::Warning("no faculty checkbox found".into()),
            ),
        ]),
        None,
    );
    let failing = ScenarioReport::from_state(
        "full",
        &state_with(&[]),
        Some("plus button should exist during course creation".to_string()),
    );

    let suite = SuiteReport::from_results("flowcheck", vec![passing, failing]).with_duration(41_300);
    let out = format_console_report(&suite);

    assert!(out.contains("PASS  auth (2 steps, 1 warning)"), "got:\n{}", out);
    assert!(out.contains("FAIL  full"), "got:\n{}", out);
    assert!(
        out.contains("[ERROR] plus button should exist during course creation"),
        "got:\n{}",
        out
    );
    assert!(out.contains("[WARN] registration: faculty checkbox"), "got:\n{}", out);
    assert!(
        out.contains("=== Results: 1 passed, 1 failed (2 total) in 41.3s ==="),
        "got:\n{}",
        out
    );
}
