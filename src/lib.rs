//! Heuristic end-to-end browser tests for the course platform front-end.
//!
//! Scenarios drive a real browser through sign-up, sign-in, dashboard
//! verification, and course/module creation. Elements are located by
//! semantic role through a fixed cascade of matching stages rather than
//! hard-coded selectors, so markup churn in the target application does
//! not immediately break the suite.

pub mod browser;
pub mod cli;
pub mod error;
pub mod report;
pub mod resolver;
pub mod scenario;
pub mod trace;
