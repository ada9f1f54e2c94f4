//! Runner - declare suites, execute them in order, aggregate the results
//!
//! A [`Runner`] moves through three states:
//! - declaring: [`Runner::suite`] registers suites, nothing executes;
//! - executing: [`Runner::run`] consumes the runner and walks every suite and
//!   test in declaration order;
//! - aggregated: the returned [`RunReport`] holds the ledger and totals.
//!
//! Failed assertions never change control flow. The only fatal condition is
//! user code returning an error from a hook or test body, which aborts the run
//! with [`RunError::Aborted`].

use crate::context::TestContext;
use crate::error::{AbortSite, RunError, TestResult};
use crate::fixture::FixtureStore;
use crate::ledger::{ResultLedger, Slot, Tally};
use crate::registry::{Callback, HookKind, Suite, SuiteBuilder, SuiteId, SuiteRegistry, TestFlag, TestId};
use crate::reporter::{ConsoleReporter, JsonReporter, Reporter};
use crate::value::Value;
use assay_config::{ConfigLoader, ReportFormat, ReportSettings};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, debug_span, warn};

/// Process exit code when the run aborted or could not be reported
pub const EXIT_ABORTED: i32 = 2;

/// Aggregated counts for a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunTotals {
    pub assertions: usize,
    pub passed: usize,
    pub failed: usize,
    /// `round(passed / assertions * 100)`, or 0 when nothing was asserted
    pub success_percent: u32,
    pub elapsed: Duration,
}

impl RunTotals {
    /// `passed` is capped at `assertions`.
    pub fn new(assertions: usize, passed: usize, elapsed: Duration) -> Self {
        let passed = passed.min(assertions);
        let failed = assertions - passed;
        Self {
            assertions,
            passed,
            failed,
            success_percent: success_percent(passed, assertions),
            elapsed,
        }
    }

    pub fn from_tally(tally: Tally, elapsed: Duration) -> Self {
        Self {
            assertions: tally.assertions,
            passed: tally.passed,
            failed: tally.failed,
            success_percent: success_percent(tally.passed, tally.assertions),
            elapsed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// 0 when no assertion failed, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

fn success_percent(passed: usize, assertions: usize) -> u32 {
    if assertions == 0 {
        return 0;
    }
    (passed as f64 / assertions as f64 * 100.0).round() as u32
}

/// Everything a finished run produced
#[derive(Debug)]
pub struct RunReport {
    pub totals: RunTotals,
    pub ledger: ResultLedger,
    pub fixtures: FixtureStore,
}

impl RunReport {
    pub fn exit_code(&self) -> i32 {
        self.totals.exit_code()
    }
}

/// Declares suites and runs them.
///
/// ```
/// use assay_runtime::{Asserter, EventLog, Runner};
///
/// let mut runner = Runner::new();
/// runner.suite("arithmetic", |s| {
///     s.test("adds", |t| {
///         t.equal(2 + 2, 4, "two and two");
///         Ok(())
///     });
/// });
///
/// let report = runner.run(&mut EventLog::new()).unwrap();
/// assert_eq!(report.totals.passed, 1);
/// assert_eq!(report.exit_code(), 0);
/// ```
#[derive(Debug, Default)]
pub struct Runner<'a> {
    registry: SuiteRegistry<'a>,
    fixtures: FixtureStore,
}

impl<'a> Runner<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with fixtures already in place
    pub fn with_fixtures(fixtures: FixtureStore) -> Self {
        Self {
            registry: SuiteRegistry::new(),
            fixtures,
        }
    }

    /// Declare a suite; `body` runs immediately and attaches hooks and tests.
    pub fn suite<F>(&mut self, description: impl Into<String>, body: F) -> SuiteId
    where
        F: FnOnce(&mut SuiteBuilder<'_, 'a>),
    {
        self.registry.declare(description, body)
    }

    pub fn set_fixture(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fixtures.set(key, value);
    }

    pub fn fixture(&self, key: &str) -> Option<&Value> {
        self.fixtures.get(key)
    }

    pub fn registry(&self) -> &SuiteRegistry<'a> {
        &self.registry
    }

    /// Execute every suite in declaration order and aggregate the results.
    pub fn run(self, reporter: &mut dyn Reporter) -> Result<RunReport, RunError> {
        let started = Instant::now();
        let Runner {
            registry,
            mut fixtures,
        } = self;
        let mut ledger = ResultLedger::new();

        debug!(
            suites = registry.len(),
            tests = registry.test_count(),
            "run started"
        );

        for (index, suite) in registry.into_suites().into_iter().enumerate() {
            let mut exec = SuiteExecution {
                id: SuiteId(index),
                fixtures: &mut fixtures,
                ledger: &mut ledger,
                reporter: &mut *reporter,
            };
            if let Err(err) = exec.run(suite) {
                if matches!(err, RunError::Aborted { .. }) {
                    if let Err(report) = reporter.run_aborted(&err) {
                        warn!(error = %report, "could not report aborted run");
                    }
                }
                return Err(err);
            }
        }

        let totals = RunTotals::from_tally(ledger.tally(), started.elapsed());
        debug!(
            assertions = totals.assertions,
            passed = totals.passed,
            failed = totals.failed,
            "run finished"
        );
        reporter.run_finished(&totals)?;

        Ok(RunReport {
            totals,
            ledger,
            fixtures,
        })
    }

    /// Run with a reporter built from `settings`, writing to stdout.
    pub fn run_with_settings(self, settings: ReportSettings) -> Result<RunReport, RunError> {
        match settings.format {
            ReportFormat::Console => {
                let mut reporter = ConsoleReporter::stdout()
                    .with_verbose(settings.verbose)
                    .with_color(settings.color);
                self.run(&mut reporter)
            }
            ReportFormat::Json => {
                let mut reporter = JsonReporter::stdout().with_pretty(settings.verbose);
                self.run(&mut reporter)
            }
        }
    }

    /// Load settings from assay.toml / ~/.assay/config.toml / environment, then run.
    pub fn run_configured(self) -> Result<RunReport, RunError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let config = ConfigLoader::new().load_from_directory(&cwd)?;
        self.run_with_settings(config.report_settings())
    }

    /// Run as configured and terminate the process with the run's exit code.
    pub fn run_and_exit(self) -> ! {
        let code = match self.run_configured() {
            Ok(report) => report.exit_code(),
            Err(err) => {
                eprintln!("error: {}", err);
                EXIT_ABORTED
            }
        };
        std::process::exit(code)
    }
}

/// Borrowed state while one suite executes
struct SuiteExecution<'e> {
    id: SuiteId,
    fixtures: &'e mut FixtureStore,
    ledger: &'e mut ResultLedger,
    reporter: &'e mut dyn Reporter,
}

impl SuiteExecution<'_> {
    fn run(&mut self, suite: Suite<'_>) -> Result<(), RunError> {
        let Suite {
            description,
            setup,
            tear_down,
            tests,
        } = suite;

        let span = debug_span!("suite", suite = %description);
        let _enter = span.enter();

        self.reporter.suite_started(&description)?;

        if let Some(hook) = setup {
            self.reporter.hook_started(HookKind::Setup)?;
            self.invoke(hook, Slot::Setup)
                .map_err(|failure| failure.into_run_error(&description, AbortSite::Setup))?;
        }

        for (index, test) in tests.into_iter().enumerate() {
            self.reporter.test_started(&test.description)?;

            if test.flag == TestFlag::Skip {
                debug!(test = %test.description, "test skipped");
                self.reporter.test_skipped(&test.description)?;
                continue;
            }

            debug!(test = %test.description, "test started");
            let site = AbortSite::Test(test.description);
            self.invoke(test.callback, Slot::Test(TestId(index)))
                .map_err(|failure| failure.into_run_error(&description, site))?;
        }

        if let Some(hook) = tear_down {
            self.reporter.hook_started(HookKind::TearDown)?;
            self.invoke(hook, Slot::TearDown)
                .map_err(|failure| failure.into_run_error(&description, AbortSite::TearDown))?;
        }

        self.reporter.suite_finished(&description)?;
        Ok(())
    }

    fn invoke(&mut self, callback: Callback<'_>, slot: Slot) -> Result<(), CallbackFailure> {
        let mut ctx = TestContext::new(
            self.id,
            slot,
            &mut *self.fixtures,
            &mut *self.ledger,
            &mut *self.reporter,
        );
        let result: TestResult = callback(&mut ctx);
        if let Some(err) = ctx.take_report_error() {
            return Err(CallbackFailure::Report(err));
        }
        result.map_err(CallbackFailure::Raised)
    }
}

enum CallbackFailure {
    Raised(crate::error::Raised),
    Report(io::Error),
}

impl CallbackFailure {
    fn into_run_error(self, suite: &str, site: AbortSite) -> RunError {
        match self {
            CallbackFailure::Raised(source) => {
                warn!(suite, %site, error = %source, "run aborted");
                RunError::Aborted {
                    suite: suite.to_string(),
                    site,
                    source,
                }
            }
            CallbackFailure::Report(err) => RunError::Report(err),
        }
    }
}
