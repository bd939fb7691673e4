use crate::report::report_model::SuiteReport;
use crate::scenario::state::StepOutcome;

// ============================================================================
// Console reporter — formatted terminal output
// ============================================================================

/// Format a suite report for terminal output.
///
/// Produces output like:
/// ```text
/// === Scenario Suite: flowcheck ===
///
/// ✓ PASS  auth (7 steps, 1 warning)
/// ✗ FAIL  full (9 steps)
///     [ERROR] plus button should exist during course creation (last URL: http://localhost:5173/home)
///
/// === Results: 1 passed, 1 failed (2 total) in 41.3s ===
/// ```
pub fn format_console_report(report: &SuiteReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Scenario Suite: {} ===\n\n", report.suite_name));

    for scenario in &report.scenarios {
        let marker = if scenario.passed {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };

        let warning_note = match scenario.warnings {
            0 => String::new(),
            1 => ", 1 warning".to_string(),
            n => format!(", {} warnings", n),
        };

        out.push_str(&format!(
            "{}  {} ({} steps{})\n",
            marker,
            scenario.name,
            scenario.steps.len(),
            warning_note
        ));

        if let Some(ref error) = scenario.error {
            out.push_str(&format!("    [ERROR] {}\n", error));
        }

        for step in &scenario.steps {
            match &step.outcome {
                StepOutcome::Warning(message) => {
                    out.push_str(&format!(
                        "    [WARN] {}: {} - {}\n",
                        step.phase.label(),
                        step.detail,
                        message
                    ));
                }
                StepOutcome::Failed(message) => {
                    out.push_str(&format!(
                        "    [FAIL] {}: {} - {} (URL: {})\n",
                        step.phase.label(),
                        step.detail,
                        message,
                        step.url
                    ));
                }
                StepOutcome::Passed => {}
            }
        }
    }

    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed ({} total)",
        report.passed, report.failed, report.total
    ));

    if let Some(ms) = report.duration_ms {
        let secs = ms as f64 / 1000.0;
        out.push_str(&format!(" in {:.1}s", secs));
    }

    out.push_str(" ===\n");

    out
}
