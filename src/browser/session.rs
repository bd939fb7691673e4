use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

use crate::browser::protocol::{BrowserRequest, BrowserResponse};
use crate::browser::{Driver, PageSnapshot};
use crate::error::SuiteError;
use crate::resolver::candidate::{Candidate, ElementRef};

const DEFAULT_DRIVER_SCRIPT: &str = "driver/browser_server.js";

/// A persistent browser session backed by browser_server.js.
///
/// Launches a long-lived Node.js process that keeps a Chromium page open.
/// Commands are sent as NDJSON over stdin, responses read from stdout.
/// The session is exclusively owned by one scenario and torn down
/// unconditionally at scenario end.
pub struct BrowserSession {
    child: Child,
    stdin: std::process::ChildStdin,
    reader: BufReader<std::process::ChildStdout>,
    quit_sent: bool,
}

impl BrowserSession {
    /// Launch a new browser session by spawning browser_server.js.
    ///
    /// The script path comes from `DRIVER_SCRIPT` when set; headless mode
    /// is passed through to the subprocess environment.
    pub fn launch(headless: bool) -> Result<Self, SuiteError> {
        let script = std::env::var("DRIVER_SCRIPT")
            .unwrap_or_else(|_| DEFAULT_DRIVER_SCRIPT.to_string());

        let mut child = Command::new("node")
            .arg(&script)
            .env("HEADLESS", if headless { "true" } else { "false" })
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SuiteError::SubprocessSpawn {
                script: script.clone(),
                source: e,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            SuiteError::SessionIo("Failed to capture stdin of browser_server.js".into())
        })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            SuiteError::SessionIo("Failed to capture stdout of browser_server.js".into())
        })?;

        let mut reader = BufReader::new(stdout);

        // Wait for the ready signal
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| SuiteError::SessionIo(format!("Failed to read ready signal: {}", e)))?;

        let response: BrowserResponse =
            serde_json::from_str(line.trim()).map_err(|e| SuiteError::JsonParse {
                context: "browser_server.js ready signal".into(),
                source: e,
            })?;

        if !response.ok || response.ready != Some(true) {
            return Err(SuiteError::SessionProtocol {
                command: "launch".into(),
                error: "Did not receive ready signal from browser_server.js".into(),
            });
        }

        Ok(BrowserSession {
            child,
            stdin,
            reader,
            quit_sent: false,
        })
    }

    /// Send a request and read the response line.
    fn send(&mut self, request: &BrowserRequest) -> Result<BrowserResponse, SuiteError> {
        let json = serde_json::to_string(request).map_err(|e| SuiteError::JsonSerialize {
            context: "BrowserRequest".into(),
            source: e,
        })?;

        writeln!(self.stdin, "{}", json)
            .map_err(|e| SuiteError::SessionIo(format!("Failed to write to driver stdin: {}", e)))?;
        self.stdin
            .flush()
            .map_err(|e| SuiteError::SessionIo(format!("Failed to flush driver stdin: {}", e)))?;

        let mut line = String::new();
        self.reader.read_line(&mut line).map_err(|e| {
            SuiteError::SessionIo(format!("Failed to read from driver stdout: {}", e))
        })?;

        if line.trim().is_empty() {
            return Err(SuiteError::SessionIo(
                "Empty response from browser_server.js (process may have died)".into(),
            ));
        }

        let response: BrowserResponse =
            serde_json::from_str(line.trim()).map_err(|e| SuiteError::JsonParse {
                context: "BrowserResponse".into(),
                source: e,
            })?;

        if !response.ok {
            return Err(SuiteError::DriverAction(
                response.error.unwrap_or_else(|| "Unknown driver error".into()),
            ));
        }

        Ok(response)
    }

    /// Close the browser and reap the subprocess. Safe to call once; Drop
    /// covers the failure paths.
    pub fn quit(&mut self) -> Result<(), SuiteError> {
        if self.quit_sent {
            return Ok(());
        }
        self.quit_sent = true;
        let _ = self.send(&BrowserRequest::quit());
        self.child
            .wait()
            .map_err(|e| SuiteError::SessionIo(format!("Failed to reap driver process: {}", e)))?;
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if !self.quit_sent {
            let _ = self.send(&BrowserRequest::quit());
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

impl Driver for BrowserSession {
    fn navigate(&mut self, url: &str) -> Result<(), SuiteError> {
        self.send(&BrowserRequest::navigate(url))?;
        Ok(())
    }

    fn snapshot(&mut self, scope: Option<ElementRef>) -> Result<PageSnapshot, SuiteError> {
        let response = self.send(&BrowserRequest::extract(scope.map(|r| r.0)))?;

        let raw = response
            .elements
            .ok_or_else(|| SuiteError::SessionProtocol {
                command: "extract".into(),
                error: "Extraction returned no 'elements' array".into(),
            })?;

        Ok(PageSnapshot {
            url: response.url.unwrap_or_default(),
            title: response.title.unwrap_or_default(),
            candidates: Candidate::decode_all(&raw),
        })
    }

    fn click(&mut self, element: ElementRef) -> Result<(), SuiteError> {
        self.send(&BrowserRequest::click(element.0))?;
        Ok(())
    }

    fn fill(&mut self, element: ElementRef, text: &str) -> Result<(), SuiteError> {
        self.send(&BrowserRequest::fill(element.0, text))?;
        Ok(())
    }

    fn scroll_into_view(&mut self, element: ElementRef) -> Result<(), SuiteError> {
        self.send(&BrowserRequest::scroll(element.0))?;
        Ok(())
    }

    fn current_url(&mut self) -> Result<String, SuiteError> {
        let response = self.send(&BrowserRequest::current_url())?;
        response.url.ok_or_else(|| SuiteError::SessionProtocol {
            command: "current_url".into(),
            error: "Response carried no 'url'".into(),
        })
    }

    fn page_source(&mut self) -> Result<String, SuiteError> {
        let response = self.send(&BrowserRequest::page_source())?;
        response.source.ok_or_else(|| SuiteError::SessionProtocol {
            command: "page_source".into(),
            error: "Response carried no 'source'".into(),
        })
    }

    fn ready_state(&mut self) -> Result<String, SuiteError> {
        let response = self.send(&BrowserRequest::ready_state())?;
        response.state.ok_or_else(|| SuiteError::SessionProtocol {
            command: "ready_state".into(),
            error: "Response carried no 'state'".into(),
        })
    }

    fn pause(&mut self, duration_ms: u64) {
        std::thread::sleep(std::time::Duration::from_millis(duration_ms));
    }
}
