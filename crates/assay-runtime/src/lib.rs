//! Assay runtime - a small unit-test execution engine
//!
//! Declare named suites of named tests, give each suite optional setup and
//! tearDown hooks, share fixtures across the whole run, and assert inside
//! test bodies. [`Runner::run`] executes everything in declaration order and
//! aggregates the recorded outcomes into [`RunTotals`].
//!
//! ```no_run
//! use assay_runtime::{kinds, Asserter, Raised, Runner, Value};
//!
//! let mut runner = Runner::new();
//!
//! runner.suite("This is our test suite", |s| {
//!     s.setup(|t| {
//!         t.set_fixture("foo", Value::map([("foo", "bar")]));
//!         Ok(())
//!     });
//!
//!     s.test("fixture foo", |t| {
//!         let foo = t.fixture("foo").and_then(|f| f.get("foo").cloned());
//!         t.equal("bar", foo, "Is foo == bar?");
//!         Ok(())
//!     });
//!
//!     s.test("bad call", |t| {
//!         t.throws(
//!             |_| Err::<(), _>(Raised::new(&kinds::BAD_METHOD_CALL, "nope")),
//!             &kinds::LOGIC_ERROR,
//!             "raises a logic error",
//!         );
//!         Ok(())
//!     });
//! });
//!
//! runner.run_and_exit();
//! ```

pub mod assert;
pub mod context;
pub mod error;
pub mod fixture;
pub mod ledger;
pub mod registry;
pub mod reporter;
pub mod runner;
pub mod value;

pub use assert::{
    AssertionOutcome, AssertionResponse, Asserter, Comparison, Outcome, OutcomeLog, Primitive,
    ThrowOutcome,
};
pub use context::TestContext;
pub use error::{kinds, AbortSite, ErrorKind, Raised, RunError, TestResult};
pub use fixture::FixtureStore;
pub use ledger::{ResultLedger, Slot, Tally};
pub use registry::{HookKind, SuiteBuilder, SuiteId, SuiteRegistry, TestFlag, TestId};
pub use reporter::{ConsoleReporter, EventLog, JsonReporter, NullReporter, ReportEvent, Reporter};
pub use runner::{RunReport, RunTotals, Runner, EXIT_ABORTED};
pub use value::Value;

pub use assay_config::{ReportFormat, ReportSettings};
