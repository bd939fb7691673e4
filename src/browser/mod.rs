pub mod mock;
pub mod protocol;
pub mod session;
pub mod wait;

use crate::error::SuiteError;
use crate::resolver::candidate::{Candidate, ElementRef};

/// One extraction of the current page: URL, title, and the interactive
/// elements with their attribute bundles, in document order.
///
/// Candidates are valid only until the next navigation.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub url: String,
    pub title: String,
    pub candidates: Vec<Candidate>,
}

/// The browser-automation boundary. `BrowserSession` implements it over a
/// Playwright subprocess; `MockDriver` implements it in memory for tests.
///
/// Snapshots are read-only; only the orchestrator mutates the page, and
/// always through exactly one of the action methods per resolved element.
pub trait Driver {
    fn navigate(&mut self, url: &str) -> Result<(), SuiteError>;

    /// Extract the current page's interactive elements. An optional scope
    /// narrows extraction to the subtree under that element.
    fn snapshot(&mut self, scope: Option<ElementRef>) -> Result<PageSnapshot, SuiteError>;

    fn click(&mut self, element: ElementRef) -> Result<(), SuiteError>;

    /// Clear the control, then type the text.
    fn fill(&mut self, element: ElementRef, text: &str) -> Result<(), SuiteError>;

    fn scroll_into_view(&mut self, element: ElementRef) -> Result<(), SuiteError>;

    fn current_url(&mut self) -> Result<String, SuiteError>;

    /// Full page text/markup, for substring success heuristics and
    /// stability hashing.
    fn page_source(&mut self) -> Result<String, SuiteError>;

    /// The document.readyState string ("loading", "interactive", "complete").
    fn ready_state(&mut self) -> Result<String, SuiteError>;

    /// Block for the given duration. Mocks may make this a no-op.
    fn pause(&mut self, duration_ms: u64);
}
