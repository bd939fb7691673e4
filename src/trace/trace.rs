use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::scenario::state::Phase;

/// One JSONL record in the scenario trace: a resolution, an action, a wait,
/// or a phase transition.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub scenario: String,
    pub phase: String,
    pub kind: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl TraceEvent {
    pub fn now(scenario: &str, phase: Phase, kind: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            scenario: scenario.to_string(),
            phase: phase.label().to_string(),
            kind: kind.to_string(),
            role: None,
            stage: None,
            action: None,
            detail: None,
            url: None,
        }
    }

    pub fn with_role(mut self, role: impl ToString) -> Self {
        self.role = Some(role.to_string());
        self
    }

    pub fn with_stage(mut self, stage: impl std::fmt::Debug) -> Self {
        self.stage = Some(format!("{:?}", stage));
        self
    }

    pub fn with_action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }
}
