use std::collections::HashMap;

use crate::browser::{Driver, PageSnapshot};
use crate::error::SuiteError;
use crate::resolver::candidate::{Candidate, ElementRef};

/// One scripted page in a MockDriver site model.
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    pub title: String,
    pub candidates: Vec<Candidate>,
    pub source: String,
}

impl MockPage {
    pub fn new(title: &str) -> Self {
        MockPage {
            title: title.to_string(),
            candidates: Vec::new(),
            source: String::new(),
        }
    }

    pub fn with(mut self, candidate: Candidate) -> Self {
        self.candidates.push(candidate);
        self
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }
}

/// Every mutating call a scenario made, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum MockAction {
    Navigate(String),
    Click(ElementRef),
    Fill(ElementRef, String),
    Scroll(ElementRef),
}

/// Scripted in-memory driver for offline scenario tests.
///
/// Pages are registered by URL; clicks can be wired to navigate. Unknown
/// URLs resolve to an empty page so heuristic URL checks still run.
#[derive(Debug, Default)]
pub struct MockDriver {
    pages: HashMap<String, MockPage>,
    click_transitions: HashMap<(String, ElementRef), String>,
    pub actions: Vec<MockAction>,
    current: String,
    ready: String,
}

impl MockDriver {
    pub fn new() -> Self {
        MockDriver {
            pages: HashMap::new(),
            click_transitions: HashMap::new(),
            actions: Vec::new(),
            current: String::new(),
            ready: "complete".to_string(),
        }
    }

    pub fn add_page(&mut self, url: &str, page: MockPage) {
        self.pages.insert(url.to_string(), page);
    }

    /// Wire a click on `element` while at `url` to land on `target_url`.
    pub fn on_click(&mut self, url: &str, element: ElementRef, target_url: &str) {
        self.click_transitions
            .insert((url.to_string(), element), target_url.to_string());
    }

    fn page(&self) -> MockPage {
        self.pages.get(&self.current).cloned().unwrap_or_default()
    }

    /// Values filled into one element, in order.
    pub fn fills_for(&self, element: ElementRef) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                MockAction::Fill(r, v) if *r == element => Some(v.as_str()),
                _ => None,
            })
            .collect()
    }

    /// How many times one element was clicked.
    pub fn click_count(&self, element: ElementRef) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, MockAction::Click(r) if *r == element))
            .count()
    }
}

impl Driver for MockDriver {
    fn navigate(&mut self, url: &str) -> Result<(), SuiteError> {
        self.actions.push(MockAction::Navigate(url.to_string()));
        self.current = url.to_string();
        Ok(())
    }

    fn snapshot(&mut self, _scope: Option<ElementRef>) -> Result<PageSnapshot, SuiteError> {
        let page = self.page();
        Ok(PageSnapshot {
            url: self.current.clone(),
            title: page.title,
            candidates: page.candidates,
        })
    }

    fn click(&mut self, element: ElementRef) -> Result<(), SuiteError> {
        self.actions.push(MockAction::Click(element));
        let key = (self.current.clone(), element);
        if let Some(target) = self.click_transitions.get(&key).cloned() {
            self.current = target;
        }
        Ok(())
    }

    fn fill(&mut self, element: ElementRef, text: &str) -> Result<(), SuiteError> {
        self.actions.push(MockAction::Fill(element, text.to_string()));
        if let Some(page) = self.pages.get_mut(&self.current) {
            if let Some(c) = page
                .candidates
                .iter_mut()
                .find(|c| c.element_ref == element)
            {
                c.value = text.to_string();
            }
        }
        Ok(())
    }

    fn scroll_into_view(&mut self, element: ElementRef) -> Result<(), SuiteError> {
        self.actions.push(MockAction::Scroll(element));
        Ok(())
    }

    fn current_url(&mut self) -> Result<String, SuiteError> {
        Ok(self.current.clone())
    }

    fn page_source(&mut self) -> Result<String, SuiteError> {
        Ok(self.page().source)
    }

    fn ready_state(&mut self) -> Result<String, SuiteError> {
        Ok(self.ready.clone())
    }

    fn pause(&mut self, _duration_ms: u64) {}
}
