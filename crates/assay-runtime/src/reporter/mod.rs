//! Run reporting
//!
//! The runner notifies a [`Reporter`] as it walks suites and tests. Every
//! notification has a no-op default so a reporter only implements what it uses.

mod console;
mod json;

pub use console::ConsoleReporter;
pub use json::JsonReporter;

use crate::assert::AssertionOutcome;
use crate::error::RunError;
use crate::registry::HookKind;
use crate::runner::RunTotals;
use std::io;

pub trait Reporter {
    fn suite_started(&mut self, _description: &str) -> io::Result<()> {
        Ok(())
    }

    fn hook_started(&mut self, _hook: HookKind) -> io::Result<()> {
        Ok(())
    }

    fn test_started(&mut self, _description: &str) -> io::Result<()> {
        Ok(())
    }

    fn test_skipped(&mut self, _description: &str) -> io::Result<()> {
        Ok(())
    }

    fn assertion_recorded(&mut self, _outcome: &AssertionOutcome) -> io::Result<()> {
        Ok(())
    }

    fn suite_finished(&mut self, _description: &str) -> io::Result<()> {
        Ok(())
    }

    fn run_finished(&mut self, _totals: &RunTotals) -> io::Result<()> {
        Ok(())
    }

    /// Called instead of `run_finished` when user code aborts the run.
    fn run_aborted(&mut self, _error: &RunError) -> io::Result<()> {
        Ok(())
    }
}

/// One notification received by an [`EventLog`]
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    SuiteStarted(String),
    HookStarted(HookKind),
    TestStarted(String),
    TestSkipped(String),
    Assertion(AssertionOutcome),
    SuiteFinished(String),
    RunFinished {
        assertions: usize,
        passed: usize,
        failed: usize,
    },
    RunAborted(String),
}

/// Reporter that keeps every notification in memory
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<ReportEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptions of started tests, skipped ones included
    pub fn started_tests(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::TestStarted(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn started_suites(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::SuiteStarted(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for EventLog {
    fn suite_started(&mut self, description: &str) -> io::Result<()> {
        self.events
            .push(ReportEvent::SuiteStarted(description.to_string()));
        Ok(())
    }

    fn hook_started(&mut self, hook: HookKind) -> io::Result<()> {
        self.events.push(ReportEvent::HookStarted(hook));
        Ok(())
    }

    fn test_started(&mut self, description: &str) -> io::Result<()> {
        self.events
            .push(ReportEvent::TestStarted(description.to_string()));
        Ok(())
    }

    fn test_skipped(&mut self, description: &str) -> io::Result<()> {
        self.events
            .push(ReportEvent::TestSkipped(description.to_string()));
        Ok(())
    }

    fn assertion_recorded(&mut self, outcome: &AssertionOutcome) -> io::Result<()> {
        self.events.push(ReportEvent::Assertion(outcome.clone()));
        Ok(())
    }

    fn suite_finished(&mut self, description: &str) -> io::Result<()> {
        self.events
            .push(ReportEvent::SuiteFinished(description.to_string()));
        Ok(())
    }

    fn run_finished(&mut self, totals: &RunTotals) -> io::Result<()> {
        self.events.push(ReportEvent::RunFinished {
            assertions: totals.assertions,
            passed: totals.passed,
            failed: totals.failed,
        });
        Ok(())
    }

    fn run_aborted(&mut self, error: &RunError) -> io::Result<()> {
        self.events.push(ReportEvent::RunAborted(error.to_string()));
        Ok(())
    }
}

/// Reporter that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}
