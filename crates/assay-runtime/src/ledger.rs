//! Assertion outcomes recorded during a run, keyed by suite and slot.

use crate::assert::AssertionOutcome;
use crate::registry::{HookKind, SuiteId, TestId};
use std::collections::BTreeMap;

/// Where within a suite an assertion ran.
///
/// Ordered the way a suite executes: setup, tests, tearDown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Setup,
    Test(TestId),
    TearDown,
}

impl Slot {
    pub fn test(&self) -> Option<TestId> {
        match self {
            Slot::Test(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<HookKind> for Slot {
    fn from(kind: HookKind) -> Self {
        match kind {
            HookKind::Setup => Slot::Setup,
            HookKind::TearDown => Slot::TearDown,
        }
    }
}

/// Assertion counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub assertions: usize,
    pub passed: usize,
    pub failed: usize,
}

#[derive(Debug, Default)]
pub struct ResultLedger {
    entries: BTreeMap<(SuiteId, Slot), Vec<AssertionOutcome>>,
}

impl ResultLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, suite: SuiteId, slot: Slot, outcome: AssertionOutcome) {
        self.entries.entry((suite, slot)).or_default().push(outcome);
    }

    /// Outcomes for one slot, in the order they were recorded
    pub fn outcomes(&self, suite: SuiteId, slot: Slot) -> &[AssertionOutcome] {
        self.entries
            .get(&(suite, slot))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every slot with at least one outcome, in execution order
    pub fn iter(&self) -> impl Iterator<Item = (SuiteId, Slot, &[AssertionOutcome])> {
        self.entries
            .iter()
            .map(|((suite, slot), outcomes)| (*suite, *slot, outcomes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for outcome in self.entries.values().flatten() {
            tally.assertions += 1;
            if outcome.result.is_pass() {
                tally.passed += 1;
            } else {
                tally.failed += 1;
            }
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert::{Outcome, Primitive};

    fn outcome(result: Outcome, description: &str) -> AssertionOutcome {
        AssertionOutcome {
            primitive: Primitive::Pass,
            arguments: Vec::new(),
            result,
            description: description.to_string(),
        }
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = ResultLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.tally(), Tally::default());
        assert!(ledger.outcomes(SuiteId(0), Slot::Setup).is_empty());
    }

    #[test]
    fn test_tally_counts_every_slot() {
        let mut ledger = ResultLedger::new();
        ledger.record(SuiteId(0), Slot::Setup, outcome(Outcome::Pass, "hook"));
        ledger.record(SuiteId(0), Slot::Test(TestId(0)), outcome(Outcome::Pass, "a"));
        ledger.record(SuiteId(1), Slot::Test(TestId(0)), outcome(Outcome::Fail, "b"));

        assert_eq!(
            ledger.tally(),
            Tally {
                assertions: 3,
                passed: 2,
                failed: 1
            }
        );
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_iter_follows_execution_order() {
        let mut ledger = ResultLedger::new();
        ledger.record(SuiteId(1), Slot::Test(TestId(0)), outcome(Outcome::Pass, "s1"));
        ledger.record(SuiteId(0), Slot::TearDown, outcome(Outcome::Pass, "down"));
        ledger.record(SuiteId(0), Slot::Test(TestId(1)), outcome(Outcome::Pass, "t1"));
        ledger.record(SuiteId(0), Slot::Test(TestId(0)), outcome(Outcome::Pass, "t0"));
        ledger.record(SuiteId(0), Slot::Setup, outcome(Outcome::Pass, "up"));

        let order: Vec<_> = ledger
            .iter()
            .map(|(_, _, outcomes)| outcomes[0].description.as_str())
            .collect();
        assert_eq!(order, ["up", "t0", "t1", "down", "s1"]);
    }

    #[test]
    fn test_outcomes_keep_recording_order() {
        let mut ledger = ResultLedger::new();
        let slot = Slot::Test(TestId(2));
        ledger.record(SuiteId(0), slot, outcome(Outcome::Fail, "first"));
        ledger.record(SuiteId(0), slot, outcome(Outcome::Pass, "second"));

        let names: Vec<_> = ledger
            .outcomes(SuiteId(0), slot)
            .iter()
            .map(|o| o.description.as_str())
            .collect();
        assert_eq!(names, ["first", "second"]);
        assert_eq!(slot.test(), Some(TestId(2)));
    }
}
