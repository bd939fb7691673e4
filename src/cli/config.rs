use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "flowcheck",
    version,
    about = "Heuristic end-to-end browser tests for the course platform front-end"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Base URL of the target application
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Run the browser headless
    #[arg(long, global = true, action = clap::ArgAction::Set)]
    pub headless: Option<bool>,

    /// Default explicit-wait timeout in seconds
    #[arg(long, global = true)]
    pub wait_timeout: Option<u64>,

    /// Settle delay in milliseconds between actions
    #[arg(long, global = true)]
    pub settle_ms: Option<u64>,

    /// Trace file path, or "none" to disable tracing
    #[arg(long, global = true)]
    pub trace: Option<String>,

    /// Path to config file (default: flowcheck.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one scenario (or all of them) against the target application
    Run {
        /// Scenario name: navigation, registration, auth, course, full, all
        #[arg(long, default_value = "full")]
        scenario: String,
    },

    /// List the available scenarios
    List,

    /// Preflight only: verify the target application is reachable
    Check,
}

// ============================================================================
// Resolved suite configuration
// ============================================================================

/// Everything a scenario run needs, resolved once at startup:
/// defaults < environment < config file < CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteConfig {
    pub base_url: String,
    pub headless: bool,
    pub wait_timeout_secs: u64,
    pub poll_ms: u64,
    pub settle_ms: u64,
    /// None disables tracing.
    pub trace_path: Option<String>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        SuiteConfig {
            base_url: "http://localhost:5173".to_string(),
            headless: true,
            wait_timeout_secs: 10,
            poll_ms: 250,
            settle_ms: 1000,
            trace_path: Some("flowcheck_trace.jsonl".to_string()),
        }
    }
}

impl SuiteConfig {
    pub fn wait_timeout_ms(&self) -> u64 {
        self.wait_timeout_secs * 1000
    }

    /// Defaults overridden by `BASE_URL`, `HEADLESS`, `DEFAULT_WAIT_TIME`.
    pub fn from_env() -> Self {
        let mut cfg = SuiteConfig::default();
        if let Ok(url) = std::env::var("BASE_URL") {
            if !url.is_empty() {
                cfg.base_url = url;
            }
        }
        if let Ok(headless) = std::env::var("HEADLESS") {
            cfg.headless = headless.eq_ignore_ascii_case("true");
        }
        if let Ok(wait) = std::env::var("DEFAULT_WAIT_TIME") {
            if let Ok(secs) = wait.parse::<u64>() {
                cfg.wait_timeout_secs = secs;
            }
        }
        cfg
    }
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `flowcheck.yaml`. Every field is optional;
/// set fields override the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub headless: Option<bool>,
    pub wait_timeout_secs: Option<u64>,
    pub poll_ms: Option<u64>,
    pub settle_ms: Option<u64>,
    pub trace: Option<String>,
}

/// Load the YAML config. Returns defaults if the file is missing or malformed.
pub fn load_file_config(path: Option<&str>) -> FileConfig {
    let config_path = path.unwrap_or("flowcheck.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => FileConfig::default(),
    }
}

// ============================================================================
// Layer merging
// ============================================================================

/// Merge the layers: env-seeded defaults, then file, then CLI flags.
pub fn resolve_config(cli: &Cli, file: &FileConfig) -> SuiteConfig {
    let mut cfg = SuiteConfig::from_env();

    if let Some(url) = &file.base_url {
        cfg.base_url = url.clone();
    }
    if let Some(headless) = file.headless {
        cfg.headless = headless;
    }
    if let Some(secs) = file.wait_timeout_secs {
        cfg.wait_timeout_secs = secs;
    }
    if let Some(ms) = file.poll_ms {
        cfg.poll_ms = ms;
    }
    if let Some(ms) = file.settle_ms {
        cfg.settle_ms = ms;
    }
    if let Some(trace) = &file.trace {
        cfg.trace_path = normalize_trace(trace);
    }

    if let Some(url) = &cli.base_url {
        cfg.base_url = url.clone();
    }
    if let Some(headless) = cli.headless {
        cfg.headless = headless;
    }
    if let Some(secs) = cli.wait_timeout {
        cfg.wait_timeout_secs = secs;
    }
    if let Some(ms) = cli.settle_ms {
        cfg.settle_ms = ms;
    }
    if let Some(trace) = &cli.trace {
        cfg.trace_path = normalize_trace(trace);
    }

    cfg
}

fn normalize_trace(value: &str) -> Option<String> {
    if value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(value.to_string())
    }
}
