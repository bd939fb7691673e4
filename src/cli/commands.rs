use std::time::{Duration, Instant};

use crate::browser::session::BrowserSession;
use crate::cli::config::SuiteConfig;
use crate::error::SuiteError;
use crate::report::console::format_console_report;
use crate::report::report_model::SuiteReport;
use crate::scenario::flows::{SCENARIOS, run_scenario};
use crate::trace::logger::TraceLogger;

// ============================================================================
// run subcommand
// ============================================================================

/// Run one scenario (or all) and return whether everything passed.
///
/// Each scenario gets its own browser session, exclusively owned for the
/// scenario's duration and closed unconditionally afterwards.
pub fn cmd_run(
    scenario: &str,
    config: &SuiteConfig,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    preflight(config)?;

    let tracer = match &config.trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    let names: Vec<&str> = if scenario == "all" {
        SCENARIOS.to_vec()
    } else {
        vec![scenario]
    };

    if verbose > 0 {
        eprintln!("Running {} scenario(s) against {}...", names.len(), config.base_url);
    }

    let start = Instant::now();
    let mut results = Vec::new();

    for name in names {
        if verbose > 0 {
            eprintln!("  Running: {}", name);
        }

        let mut session = BrowserSession::launch(config.headless)?;
        let result = run_scenario(name, &mut session, config, &tracer);
        if let Err(e) = session.quit() {
            eprintln!("Warning: browser session teardown failed: {}", e);
        }

        results.push(result);
    }

    let duration = start.elapsed().as_millis();
    let report = SuiteReport::from_results("flowcheck", results).with_duration(duration);
    let all_passed = report.all_passed();

    print!("{}", format_console_report(&report));

    Ok(all_passed)
}

// ============================================================================
// list subcommand
// ============================================================================

pub fn cmd_list() {
    println!("Available scenarios:");
    for name in SCENARIOS {
        println!("  - {}", name);
    }
    println!("  - all (run every scenario in order)");
}

// ============================================================================
// check subcommand / preflight
// ============================================================================

pub fn cmd_check(config: &SuiteConfig) -> Result<(), SuiteError> {
    preflight(config)?;
    println!("Target application at {} is reachable", config.base_url);
    Ok(())
}

/// Verify the target application answers HTTP before paying for a browser
/// launch. Any response counts; only connection-level failures abort.
fn preflight(config: &SuiteConfig) -> Result<(), SuiteError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.wait_timeout_secs))
        .build()
        .map_err(|e| SuiteError::TargetUnreachable {
            url: config.base_url.clone(),
            source: e,
        })?;

    client
        .get(&config.base_url)
        .send()
        .map_err(|e| SuiteError::TargetUnreachable {
            url: config.base_url.clone(),
            source: e,
        })?;

    Ok(())
}
