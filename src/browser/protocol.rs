use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request sent to browser_server.js over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BrowserRequest {
    Navigate {
        cmd: &'static str,
        url: String,
    },
    Extract {
        cmd: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        scope: Option<u64>,
    },
    Action {
        cmd: &'static str,
        action: String,
        element: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    CurrentUrl {
        cmd: &'static str,
    },
    PageSource {
        cmd: &'static str,
    },
    ReadyState {
        cmd: &'static str,
    },
    Quit {
        cmd: &'static str,
    },
}

impl BrowserRequest {
    pub fn navigate(url: &str) -> Self {
        BrowserRequest::Navigate {
            cmd: "navigate",
            url: url.to_string(),
        }
    }

    pub fn extract(scope: Option<u64>) -> Self {
        BrowserRequest::Extract {
            cmd: "extract",
            scope,
        }
    }

    pub fn click(element: u64) -> Self {
        BrowserRequest::Action {
            cmd: "action",
            action: "click".into(),
            element,
            value: None,
        }
    }

    pub fn fill(element: u64, value: &str) -> Self {
        BrowserRequest::Action {
            cmd: "action",
            action: "fill".into(),
            element,
            value: Some(value.to_string()),
        }
    }

    pub fn scroll(element: u64) -> Self {
        BrowserRequest::Action {
            cmd: "action",
            action: "scroll".into(),
            element,
            value: None,
        }
    }

    pub fn current_url() -> Self {
        BrowserRequest::CurrentUrl { cmd: "current_url" }
    }

    pub fn page_source() -> Self {
        BrowserRequest::PageSource { cmd: "page_source" }
    }

    pub fn ready_state() -> Self {
        BrowserRequest::ReadyState { cmd: "ready_state" }
    }

    pub fn quit() -> Self {
        BrowserRequest::Quit { cmd: "quit" }
    }
}

/// Response received from browser_server.js over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct BrowserResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub ready: Option<bool>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Raw element records from an extract; decoded per-element so one
    /// malformed record never poisons the rest.
    #[serde(default)]
    pub elements: Option<Vec<Value>>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}
