//! Machine-readable reporter: one JSON document per run

use crate::assert::AssertionOutcome;
use crate::registry::HookKind;
use crate::reporter::Reporter;
use crate::runner::RunTotals;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct SuiteReport {
    description: String,
    setup: Vec<AssertionOutcome>,
    tests: Vec<TestReport>,
    tear_down: Vec<AssertionOutcome>,
}

#[derive(Debug, Serialize)]
struct TestReport {
    description: String,
    skipped: bool,
    assertions: Vec<AssertionOutcome>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunDocument<'a> {
    suites: &'a [SuiteReport],
    assertions: usize,
    passed: usize,
    failed: usize,
    success_percent: u32,
    elapsed_seconds: f64,
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Setup,
    Test,
    TearDown,
}

/// Collects the run and writes it as a single JSON document when it finishes.
pub struct JsonReporter<W: Write> {
    out: W,
    pretty: bool,
    suites: Vec<SuiteReport>,
    target: Target,
}

impl JsonReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            pretty: false,
            suites: Vec::new(),
            target: Target::Setup,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn current_suite(&mut self) -> &mut SuiteReport {
        if self.suites.is_empty() {
            self.suites.push(SuiteReport::default());
        }
        let last = self.suites.len() - 1;
        &mut self.suites[last]
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn suite_started(&mut self, description: &str) -> io::Result<()> {
        self.suites.push(SuiteReport {
            description: description.to_string(),
            ..Default::default()
        });
        self.target = Target::Setup;
        Ok(())
    }

    fn hook_started(&mut self, hook: HookKind) -> io::Result<()> {
        self.target = match hook {
            HookKind::Setup => Target::Setup,
            HookKind::TearDown => Target::TearDown,
        };
        Ok(())
    }

    fn test_started(&mut self, description: &str) -> io::Result<()> {
        self.current_suite().tests.push(TestReport {
            description: description.to_string(),
            skipped: false,
            assertions: Vec::new(),
        });
        self.target = Target::Test;
        Ok(())
    }

    fn test_skipped(&mut self, _description: &str) -> io::Result<()> {
        if let Some(test) = self.current_suite().tests.last_mut() {
            test.skipped = true;
        }
        Ok(())
    }

    fn assertion_recorded(&mut self, outcome: &AssertionOutcome) -> io::Result<()> {
        let target = self.target;
        let suite = self.current_suite();
        let bucket = match target {
            Target::Setup => &mut suite.setup,
            Target::TearDown => &mut suite.tear_down,
            Target::Test => match suite.tests.last_mut() {
                Some(test) => &mut test.assertions,
                None => &mut suite.setup,
            },
        };
        bucket.push(outcome.clone());
        Ok(())
    }

    fn run_finished(&mut self, totals: &RunTotals) -> io::Result<()> {
        let document = RunDocument {
            suites: &self.suites,
            assertions: totals.assertions,
            passed: totals.passed,
            failed: totals.failed,
            success_percent: totals.success_percent,
            elapsed_seconds: totals.elapsed.as_secs_f64(),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, &document)?;
        } else {
            serde_json::to_writer(&mut self.out, &document)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}
