//! Suite and test declarations
//!
//! A suite is declared by handing a body to [`SuiteRegistry::declare`]. The
//! body receives a [`SuiteBuilder`] and attaches hooks and tests to it while
//! it runs; once the body returns the suite is sealed. There is no ambient
//! "current suite", so a test cannot be declared outside a suite.

use crate::context::TestContext;
use crate::error::TestResult;
use std::fmt;

/// Boxed hook or test body
pub type Callback<'a> = Box<dyn FnOnce(&mut TestContext<'_>) -> TestResult + 'a>;

/// Position of a suite in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SuiteId(pub(crate) usize);

impl SuiteId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Position of a test within its suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestId(pub(crate) usize);

impl TestId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestFlag {
    #[default]
    Normal,
    /// Reported but never invoked; contributes nothing to the totals
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Setup,
    TearDown,
}

impl HookKind {
    pub fn name(&self) -> &'static str {
        match self {
            HookKind::Setup => "setup",
            HookKind::TearDown => "tearDown",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub struct Test<'a> {
    pub(crate) description: String,
    pub(crate) callback: Callback<'a>,
    pub(crate) flag: TestFlag,
}

impl Test<'_> {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn flag(&self) -> TestFlag {
        self.flag
    }
}

impl fmt::Debug for Test<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Test")
            .field("description", &self.description)
            .field("flag", &self.flag)
            .finish_non_exhaustive()
    }
}

pub struct Suite<'a> {
    pub(crate) description: String,
    pub(crate) setup: Option<Callback<'a>>,
    pub(crate) tear_down: Option<Callback<'a>>,
    pub(crate) tests: Vec<Test<'a>>,
}

impl<'a> Suite<'a> {
    fn new(description: String) -> Self {
        Self {
            description,
            setup: None,
            tear_down: None,
            tests: Vec::new(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn has_setup(&self) -> bool {
        self.setup.is_some()
    }

    pub fn has_tear_down(&self) -> bool {
        self.tear_down.is_some()
    }

    pub fn tests(&self) -> &[Test<'a>] {
        &self.tests
    }
}

impl fmt::Debug for Suite<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("description", &self.description)
            .field("setup", &self.has_setup())
            .field("tear_down", &self.has_tear_down())
            .field("tests", &self.tests)
            .finish()
    }
}

/// Declaration handle for the suite whose body is running.
pub struct SuiteBuilder<'s, 'a> {
    suite: &'s mut Suite<'a>,
}

impl<'s, 'a> SuiteBuilder<'s, 'a> {
    pub fn description(&self) -> &str {
        &self.suite.description
    }

    /// Run `hook` once before the suite's tests. Replaces an earlier setup hook.
    pub fn setup<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnOnce(&mut TestContext<'_>) -> TestResult + 'a,
    {
        if self.suite.setup.replace(Box::new(hook)).is_some() {
            tracing::debug!(suite = %self.suite.description, "setup hook replaced");
        }
        self
    }

    /// Run `hook` once after the suite's tests. Replaces an earlier tearDown hook.
    pub fn tear_down<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnOnce(&mut TestContext<'_>) -> TestResult + 'a,
    {
        if self.suite.tear_down.replace(Box::new(hook)).is_some() {
            tracing::debug!(suite = %self.suite.description, "tearDown hook replaced");
        }
        self
    }

    pub fn test<F>(&mut self, description: impl Into<String>, body: F) -> TestId
    where
        F: FnOnce(&mut TestContext<'_>) -> TestResult + 'a,
    {
        self.test_with_flag(description, body, TestFlag::Normal)
    }

    /// Declare a test that is reported as skipped and never invoked.
    pub fn skip<F>(&mut self, description: impl Into<String>, body: F) -> TestId
    where
        F: FnOnce(&mut TestContext<'_>) -> TestResult + 'a,
    {
        self.test_with_flag(description, body, TestFlag::Skip)
    }

    pub fn test_with_flag<F>(
        &mut self,
        description: impl Into<String>,
        body: F,
        flag: TestFlag,
    ) -> TestId
    where
        F: FnOnce(&mut TestContext<'_>) -> TestResult + 'a,
    {
        let id = TestId(self.suite.tests.len());
        let description = description.into();
        tracing::trace!(suite = %self.suite.description, test = %description, ?flag, "test declared");
        self.suite.tests.push(Test {
            description,
            callback: Box::new(body),
            flag,
        });
        id
    }
}

/// Declared suites, in declaration order
#[derive(Debug, Default)]
pub struct SuiteRegistry<'a> {
    suites: Vec<Suite<'a>>,
}

impl<'a> SuiteRegistry<'a> {
    pub fn new() -> Self {
        Self { suites: Vec::new() }
    }

    /// Create a suite and run `body` against it synchronously.
    pub fn declare<F>(&mut self, description: impl Into<String>, body: F) -> SuiteId
    where
        F: FnOnce(&mut SuiteBuilder<'_, 'a>),
    {
        let mut suite = Suite::new(description.into());
        body(&mut SuiteBuilder { suite: &mut suite });

        tracing::debug!(
            suite = %suite.description,
            tests = suite.tests.len(),
            "suite declared"
        );

        let id = SuiteId(self.suites.len());
        self.suites.push(suite);
        id
    }

    pub fn get(&self, id: SuiteId) -> Option<&Suite<'a>> {
        self.suites.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SuiteId, &Suite<'a>)> {
        self.suites.iter().enumerate().map(|(i, s)| (SuiteId(i), s))
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }

    /// Total declared tests, skipped ones included
    pub fn test_count(&self) -> usize {
        self.suites.iter().map(|s| s.tests.len()).sum()
    }

    pub(crate) fn into_suites(self) -> Vec<Suite<'a>> {
        self.suites
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_registers_in_order() {
        let mut registry = SuiteRegistry::new();
        let first = registry.declare("first", |s| {
            s.test("a", |_| Ok(()));
            s.test("b", |_| Ok(()));
        });
        let second = registry.declare("second", |_| {});

        assert_eq!(first.index(), 0);
        assert_eq!(second.index(), 1);

        let names: Vec<_> = registry
            .get(first)
            .unwrap()
            .tests()
            .iter()
            .map(|t| t.description())
            .collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(registry.test_count(), 2);
    }

    #[test]
    fn test_later_hook_replaces_earlier() {
        let mut registry = SuiteRegistry::new();
        let id = registry.declare("hooks", |s| {
            s.setup(|ctx| {
                ctx.set_fixture("which", "first");
                Ok(())
            });
            s.setup(|ctx| {
                ctx.set_fixture("which", "second");
                Ok(())
            });
        });

        let suite = registry.get(id).unwrap();
        assert!(suite.has_setup());
        assert!(!suite.has_tear_down());
    }

    #[test]
    fn test_nested_helpers_attach_to_same_suite() {
        fn add_pair(s: &mut SuiteBuilder<'_, '_>) {
            s.test("helper one", |_| Ok(()));
            s.skip("helper two", |_| Ok(()));
        }

        let mut registry = SuiteRegistry::new();
        let id = registry.declare("nested", |s| {
            s.test("direct", |_| Ok(()));
            add_pair(s);
        });

        let suite = registry.get(id).unwrap();
        let flags: Vec<_> = suite.tests().iter().map(|t| t.flag()).collect();
        assert_eq!(
            flags,
            [TestFlag::Normal, TestFlag::Normal, TestFlag::Skip]
        );
    }

    #[test]
    fn test_ids_follow_declaration() {
        let mut registry = SuiteRegistry::new();
        let mut ids = Vec::new();
        registry.declare("ids", |s| {
            ids.push(s.test("x", |_| Ok(())));
            ids.push(s.test("y", |_| Ok(())));
        });
        assert_eq!(ids, [TestId(0), TestId(1)]);
    }
}
