//! Execution context handed to hooks and test bodies

use crate::assert::{AssertionOutcome, AssertionResponse, Asserter};
use crate::fixture::FixtureStore;
use crate::ledger::{ResultLedger, Slot};
use crate::registry::SuiteId;
use crate::reporter::Reporter;
use crate::value::Value;
use std::io;

/// Gives a running hook or test access to fixtures and the assertion primitives.
///
/// Assertions land in the ledger under the suite and slot this context was
/// created for, and are forwarded to the reporter as they happen.
pub struct TestContext<'r> {
    suite: SuiteId,
    slot: Slot,
    fixtures: &'r mut FixtureStore,
    ledger: &'r mut ResultLedger,
    reporter: &'r mut dyn Reporter,
    report_error: Option<io::Error>,
}

impl<'r> TestContext<'r> {
    pub(crate) fn new(
        suite: SuiteId,
        slot: Slot,
        fixtures: &'r mut FixtureStore,
        ledger: &'r mut ResultLedger,
        reporter: &'r mut dyn Reporter,
    ) -> Self {
        Self {
            suite,
            slot,
            fixtures,
            ledger,
            reporter,
            report_error: None,
        }
    }

    pub fn suite(&self) -> SuiteId {
        self.suite
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Copy of the fixture stored under `key`, or `None` if it was never set.
    pub fn fixture(&self, key: &str) -> Option<Value> {
        self.fixtures.get(key).cloned()
    }

    /// Store a fixture for every later hook and test of the run.
    pub fn set_fixture(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fixtures.set(key, value);
    }

    pub fn fixtures(&self) -> &FixtureStore {
        &*self.fixtures
    }

    pub fn fixtures_mut(&mut self) -> &mut FixtureStore {
        &mut *self.fixtures
    }

    /// First reporter write error seen while this context was live
    pub(crate) fn take_report_error(&mut self) -> Option<io::Error> {
        self.report_error.take()
    }
}

impl Asserter for TestContext<'_> {
    fn record(&mut self, outcome: AssertionOutcome) -> AssertionResponse {
        let response = outcome.response();

        if self.report_error.is_none() {
            if let Err(err) = self.reporter.assertion_recorded(&outcome) {
                self.report_error = Some(err);
            }
        }

        tracing::trace!(
            primitive = %outcome.primitive,
            result = %outcome.result,
            description = %outcome.description,
            "assertion recorded"
        );
        self.ledger.record(self.suite, self.slot, outcome);
        response
    }
}
