use std::fmt;
use std::process::ExitStatus;

#[derive(Debug)]
pub enum SuiteError {
    /// Node.js driver subprocess failed to spawn
    SubprocessSpawn { script: String, source: std::io::Error },

    /// Node.js driver subprocess exited with non-zero status
    SubprocessFailed { script: String, status: ExitStatus, stderr: String },

    /// Reading from or writing to the driver subprocess failed
    SessionIo(String),

    /// The driver answered, but not with what the protocol expects
    SessionProtocol { command: String, error: String },

    /// JSON parsing failed (driver output or serde)
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed (request to the driver)
    JsonSerialize { context: String, source: serde_json::Error },

    /// The driver reported a failed browser action (click/fill/navigate)
    DriverAction(String),

    /// document.readyState never reached "complete" within the bound
    NavigationTimeout { url: String, waited_ms: u64 },

    /// A role marked required for the current phase could not be resolved
    RequiredRole { role: String, phase: String, last_url: String },

    /// A scenario step's success check did not hold
    StepAssertion { phase: String, detail: String, last_url: String },

    /// Preflight check could not reach the target application
    TargetUnreachable { url: String, source: reqwest::Error },
}

impl fmt::Display for SuiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuiteError::SubprocessSpawn { script, source } => {
                write!(f, "Failed to spawn {} (is Node.js installed?): {}", script, source)
            }
            SuiteError::SubprocessFailed { script, status, stderr } => {
                write!(f, "{} exited with {}: {}", script, status, stderr)
            }
            SuiteError::SessionIo(msg) => {
                write!(f, "Driver session I/O error: {}", msg)
            }
            SuiteError::SessionProtocol { command, error } => {
                write!(f, "Driver protocol error on '{}': {}", command, error)
            }
            SuiteError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            SuiteError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            SuiteError::DriverAction(msg) => {
                write!(f, "Browser action failed: {}", msg)
            }
            SuiteError::NavigationTimeout { url, waited_ms } => {
                write!(f, "Page at {} not ready after {}ms", url, waited_ms)
            }
            SuiteError::RequiredRole { role, phase, last_url } => {
                write!(
                    f,
                    "{} should exist during {} (last URL: {})",
                    role, phase, last_url
                )
            }
            SuiteError::StepAssertion { phase, detail, last_url } => {
                write!(f, "{} (during {}, last URL: {})", detail, phase, last_url)
            }
            SuiteError::TargetUnreachable { url, source } => {
                write!(f, "Target application at {} is unreachable: {}", url, source)
            }
        }
    }
}

impl std::error::Error for SuiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SuiteError::SubprocessSpawn { source, .. } => Some(source),
            SuiteError::JsonParse { source, .. } => Some(source),
            SuiteError::JsonSerialize { source, .. } => Some(source),
            SuiteError::TargetUnreachable { source, .. } => Some(source),
            _ => None,
        }
    }
}
