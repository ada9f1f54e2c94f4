//! Run-wide fixtures
//!
//! One key/value table shared by every suite, hook and test of a run.
//! Writes replace; nothing is cleared between suites.

use crate::value::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    entries: HashMap<String, Value>,
}

impl FixtureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        tracing::trace!(fixture = %key, "fixture set");
        self.entries.insert(key, value.into());
    }

    /// Current value for `key`, or `None` if it was never set.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every fixture. The runner never calls this; fixtures live for the whole run.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
