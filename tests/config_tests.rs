use clap::Parser;

use flowcheck::cli::config::{Cli, FileConfig, SuiteConfig, load_file_config, resolve_config};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("CLI arguments must parse")
}

// =========================================================================
// Defaults
// =========================================================================

#[test]
fn default_config_matches_local_dev_setup() {
    let config = SuiteConfig::default();

    assert_eq!(config.base_url, "http://localhost:5173");
    assert!(config.headless);
    assert_eq!(config.wait_timeout_secs, 10);
    assert_eq!(config.settle_ms, 1000);
    assert_eq!(config.trace_path.as_deref(), Some("flowcheck_trace.jsonl"));
}

#[test]
fn wait_timeout_converts_to_millis() {
    let config = SuiteConfig {
        wait_timeout_secs: 3,
        ..SuiteConfig::default()
    };
    assert_eq!(config.wait_timeout_ms(), 3000);
}

// =========================================================================
// Layering
// =========================================================================

#[test]
fn file_config_overrides_defaults() {
    let cli = parse(&["flowcheck", "run"]);
    let file: FileConfig = serde_yaml::from_str(
        "base_url: http://staging.example.com\nsettle_ms: 250\nheadless: false\n",
    )
    .expect("YAML must parse");

    let config = resolve_config(&cli, &file);

    assert_eq!(config.base_url, "http://staging.example.com");
    assert_eq!(config.settle_ms, 250);
    assert!(!config.headless);
}

#[test]
fn cli_flags_override_file_config() {
    let cli = parse(&[
        "flowcheck",
        "--base-url",
        "http://cli.example.com",
        "--settle-ms",
        "50",
        "--headless",
        "true",
        "run",
    ]);
    let file = FileConfig {
        base_url: Some("http://file.example.com".to_string()),
        settle_ms: Some(250),
        headless: Some(false),
        ..FileConfig::default()
    };

    let config = resolve_config(&cli, &file);

    assert_eq!(config.base_url, "http://cli.example.com");
    assert_eq!(config.settle_ms, 50);
    assert!(config.headless);
}

#[test]
fn trace_none_disables_tracing() {
    let cli = parse(&["flowcheck", "--trace", "none", "run"]);
    let config = resolve_config(&cli, &FileConfig::default());
    assert_eq!(config.trace_path, None);

    let cli = parse(&["flowcheck", "--trace", "out/run.jsonl", "run"]);
    let config = resolve_config(&cli, &FileConfig::default());
    assert_eq!(config.trace_path.as_deref(), Some("out/run.jsonl"));
}

#[test]
fn missing_config_file_yields_empty_overrides() {
    let file = load_file_config(Some("definitely/does/not/exist.yaml"));

    assert!(file.base_url.is_none());
    assert!(file.headless.is_none());
    assert!(file.trace.is_none());
}

// =========================================================================
// CLI parsing
// =========================================================================

#[test]
fn run_defaults_to_full_scenario() {
    let cli = parse(&["flowcheck", "run"]);
    match cli.command {
        flowcheck::cli::config::Commands::Run { scenario } => assert_eq!(scenario, "full"),
        _ => panic!("Expected the run subcommand"),
    }
}

#[test]
fn verbosity_accumulates() {
    let cli = parse(&["flowcheck", "-vv", "run"]);
    assert_eq!(cli.verbose, 2);
}
