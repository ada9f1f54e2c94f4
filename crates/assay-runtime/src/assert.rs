//! Assertion primitives
//!
//! Every primitive evaluates one condition, hands an [`AssertionOutcome`] to
//! [`Asserter::record`], and returns the resulting [`AssertionResponse`].
//! A failed assertion is data: nothing panics and control flow is unchanged.
//!
//! # API
//!
//! ## Equality
//! - `equal(actual, expected, description)`: loose equality (`1 == "1"`)
//! - `strict_equal(actual, expected, description)`: same type and value
//! - `equal_with(actual, expected, description, comparison)`
//! - `not_equal`, `strict_not_equal`, `not_equal_with`: negations
//!
//! ## Booleans
//! - `is_true(value, description)` / `is_false(value, description)`: loosely equal to `true`/`false`
//! - `is_true_with` / `is_false_with`: with an explicit [`Comparison`]
//! - `truthy(value, description)`: boolean conversion yields `true`
//!
//! ## Forced
//! - `pass(description)` / `fail(description)`
//!
//! ## Errors
//! - `throws(callback, expected_kind, description)`: invoke with no arguments
//! - `throws_with_args(callback, args, expected_kind, description)`

use crate::error::{ErrorKind, Raised};
use crate::value::Value;
use serde::Serialize;
use std::fmt;

/// Equality mode for `equal`-style primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Comparison {
    #[default]
    Loose,
    Strict,
}

impl Comparison {
    pub fn holds(self, actual: &Value, expected: &Value) -> bool {
        match self {
            Comparison::Loose => actual.loose_eq(expected),
            Comparison::Strict => actual.strict_eq(expected),
        }
    }
}

/// Which primitive produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Primitive {
    Equal,
    NotEqual,
    True,
    False,
    Truthy,
    Fail,
    Pass,
    Throws,
}

impl Primitive {
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Equal => "equal",
            Primitive::NotEqual => "notEqual",
            Primitive::True => "true",
            Primitive::False => "false",
            Primitive::Truthy => "truthy",
            Primitive::Fail => "fail",
            Primitive::Pass => "pass",
            Primitive::Throws => "throws",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Pass => "pass",
            Outcome::Fail => "fail",
        }
    }
}

impl From<bool> for Outcome {
    fn from(passed: bool) -> Self {
        if passed {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded assertion. `arguments` excludes the description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssertionOutcome {
    pub primitive: Primitive,
    pub arguments: Vec<Value>,
    pub result: Outcome,
    pub description: String,
}

impl AssertionOutcome {
    pub fn response(&self) -> AssertionResponse {
        AssertionResponse {
            primitive: self.primitive,
            outcome: self.result,
            description: self.description.clone(),
        }
    }
}

/// What a primitive hands back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionResponse {
    pub primitive: Primitive,
    pub outcome: Outcome,
    pub description: String,
}

impl AssertionResponse {
    pub fn passed(&self) -> bool {
        self.outcome.is_pass()
    }
}

impl fmt::Display for AssertionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) \"{}\" of type assert->{}",
            if self.passed() { '*' } else { '!' },
            self.outcome.as_str().to_uppercase(),
            self.description,
            self.primitive
        )
    }
}

/// Result of invoking a callback that is expected to raise
#[derive(Debug, Clone)]
pub enum ThrowOutcome {
    NotRaised,
    /// Raised the expected kind or a sub-kind of it
    Matched(Raised),
    Mismatched(Raised),
}

impl ThrowOutcome {
    /// Invoke `callback` with `args` and classify what it raised.
    pub fn capture<F, T>(callback: F, args: &[Value], expected: &ErrorKind) -> Self
    where
        F: FnOnce(&[Value]) -> Result<T, Raised>,
    {
        match callback(args) {
            Ok(_) => ThrowOutcome::NotRaised,
            Err(raised) if raised.is_a(expected) => ThrowOutcome::Matched(raised),
            Err(raised) => ThrowOutcome::Mismatched(raised),
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, ThrowOutcome::Matched(_))
    }
}

/// Assertion capability.
///
/// Implementors decide where outcomes go; the primitives are provided.
pub trait Asserter {
    fn record(&mut self, outcome: AssertionOutcome) -> AssertionResponse;

    #[doc(hidden)]
    fn check(
        &mut self,
        primitive: Primitive,
        arguments: Vec<Value>,
        passed: bool,
        description: &str,
    ) -> AssertionResponse {
        self.record(AssertionOutcome {
            primitive,
            arguments,
            result: Outcome::from(passed),
            description: description.to_string(),
        })
    }

    fn equal_with(
        &mut self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        description: &str,
        comparison: Comparison,
    ) -> AssertionResponse {
        let (actual, expected) = (actual.into(), expected.into());
        let passed = comparison.holds(&actual, &expected);
        self.check(Primitive::Equal, vec![actual, expected], passed, description)
    }

    fn equal(
        &mut self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        description: &str,
    ) -> AssertionResponse {
        self.equal_with(actual, expected, description, Comparison::Loose)
    }

    fn strict_equal(
        &mut self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        description: &str,
    ) -> AssertionResponse {
        self.equal_with(actual, expected, description, Comparison::Strict)
    }

    fn not_equal_with(
        &mut self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        description: &str,
        comparison: Comparison,
    ) -> AssertionResponse {
        let (actual, expected) = (actual.into(), expected.into());
        let passed = !comparison.holds(&actual, &expected);
        self.check(Primitive::NotEqual, vec![actual, expected], passed, description)
    }

    fn not_equal(
        &mut self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        description: &str,
    ) -> AssertionResponse {
        self.not_equal_with(actual, expected, description, Comparison::Loose)
    }

    fn strict_not_equal(
        &mut self,
        actual: impl Into<Value>,
        expected: impl Into<Value>,
        description: &str,
    ) -> AssertionResponse {
        self.not_equal_with(actual, expected, description, Comparison::Strict)
    }

    fn is_true_with(
        &mut self,
        value: impl Into<Value>,
        description: &str,
        comparison: Comparison,
    ) -> AssertionResponse {
        let value = value.into();
        let passed = comparison.holds(&value, &Value::Bool(true));
        self.check(Primitive::True, vec![value], passed, description)
    }

    fn is_true(&mut self, value: impl Into<Value>, description: &str) -> AssertionResponse {
        self.is_true_with(value, description, Comparison::Loose)
    }

    fn is_false_with(
        &mut self,
        value: impl Into<Value>,
        description: &str,
        comparison: Comparison,
    ) -> AssertionResponse {
        let value = value.into();
        let passed = comparison.holds(&value, &Value::Bool(false));
        self.check(Primitive::False, vec![value], passed, description)
    }

    fn is_false(&mut self, value: impl Into<Value>, description: &str) -> AssertionResponse {
        self.is_false_with(value, description, Comparison::Loose)
    }

    fn truthy(&mut self, value: impl Into<Value>, description: &str) -> AssertionResponse {
        let value = value.into();
        let passed = value.is_truthy();
        self.check(Primitive::Truthy, vec![value], passed, description)
    }

    fn pass(&mut self, description: &str) -> AssertionResponse {
        self.check(Primitive::Pass, Vec::new(), true, description)
    }

    fn fail(&mut self, description: &str) -> AssertionResponse {
        self.check(Primitive::Fail, Vec::new(), false, description)
    }

    fn throws<F, T>(
        &mut self,
        callback: F,
        expected: &ErrorKind,
        description: &str,
    ) -> AssertionResponse
    where
        F: FnOnce(&[Value]) -> Result<T, Raised>,
    {
        self.throws_with_args(callback, &[], expected, description)
    }

    fn throws_with_args<F, T>(
        &mut self,
        callback: F,
        args: &[Value],
        expected: &ErrorKind,
        description: &str,
    ) -> AssertionResponse
    where
        F: FnOnce(&[Value]) -> Result<T, Raised>,
    {
        let outcome = ThrowOutcome::capture(callback, args, expected);
        if let ThrowOutcome::Mismatched(raised) = &outcome {
            tracing::debug!(expected = %expected, raised = %raised.kind(), "throws: kind mismatch");
        }

        let mut arguments = args.to_vec();
        arguments.push(Value::from(expected.name()));
        self.check(Primitive::Throws, arguments, outcome.is_match(), description)
    }
}

/// Collects outcomes in memory. Useful outside a runner, e.g. in unit tests.
#[derive(Debug, Default)]
pub struct OutcomeLog {
    pub outcomes: Vec<AssertionOutcome>,
}

impl OutcomeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }
}

impl Asserter for OutcomeLog {
    fn record(&mut self, outcome: AssertionOutcome) -> AssertionResponse {
        let response = outcome.response();
        self.outcomes.push(outcome);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kinds;
    use pretty_assertions::assert_eq;

    fn log() -> OutcomeLog {
        OutcomeLog::new()
    }

    // -- equal ----------------------------------------------------------------

    #[test]
    fn test_equal_loose_passes_across_types() {
        assert!(log().equal(1, "1", "int vs string").passed());
    }

    #[test]
    fn test_equal_strict_fails_across_types() {
        assert!(!log().strict_equal(1, "1", "int vs string").passed());
    }

    #[test]
    fn test_equal_strict_same_int() {
        // 0x01 is just another spelling of 1
        assert!(log().strict_equal(1, 0x01, "1 === 0x01").passed());
    }

    #[test]
    fn test_equal_records_arguments() {
        let mut log = log();
        log.equal("bar", "nope", "Does bar == bar?");

        assert_eq!(
            log.outcomes,
            vec![AssertionOutcome {
                primitive: Primitive::Equal,
                arguments: vec![Value::from("bar"), Value::from("nope")],
                result: Outcome::Fail,
                description: "Does bar == bar?".to_string(),
            }]
        );
    }

    // -- notEqual -------------------------------------------------------------

    #[test]
    fn test_not_equal_negates_under_same_strictness() {
        let mut log = log();
        assert!(!log.not_equal(1, "1", "loose").passed());
        assert!(log.strict_not_equal(1, "1", "strict").passed());
        assert_eq!(log.outcomes[0].primitive, Primitive::NotEqual);
    }

    // -- true / false ---------------------------------------------------------

    #[test]
    fn test_is_true() {
        let mut log = log();
        assert!(log.is_true(true, "true").passed());
        assert!(log.is_true(1, "1 is loosely true").passed());
        assert!(!log.is_true(false, "false").passed());
        assert!(!log.is_true_with(1, "strict", Comparison::Strict).passed());
    }

    #[test]
    fn test_is_false() {
        let mut log = log();
        assert!(log.is_false(false, "false").passed());
        assert!(log.is_false("", "empty string").passed());
        assert!(!log.is_false("x", "non-empty string").passed());
        assert!(!log.is_false_with(0, "strict", Comparison::Strict).passed());
    }

    // -- truthy ---------------------------------------------------------------

    #[test]
    fn test_truthy() {
        let mut log = log();
        assert!(log.truthy(1, "Is 1 truthy?").passed());
        assert!(!log.truthy(0, "Is 0 truthy?").passed());
        assert!(log.truthy(-1, "Is -1 truthy?").passed());
        assert!(!log.truthy("", "empty").passed());
        assert_eq!((log.passed(), log.failed()), (2, 2));
    }

    // -- forced ---------------------------------------------------------------

    #[test]
    fn test_pass_and_fail_are_unconditional() {
        let mut log = log();
        let fail = log.fail("I'm very forceful");
        let pass = log.pass("But I'm also forgiving...");

        assert_eq!(fail.outcome, Outcome::Fail);
        assert_eq!(pass.outcome, Outcome::Pass);
        assert!(log.outcomes.iter().all(|o| o.arguments.is_empty()));
    }

    // -- throws ---------------------------------------------------------------

    fn arity_sensitive(args: &[Value]) -> Result<(), Raised> {
        if args.len() == 3 {
            Err(Raised::new(&kinds::BAD_METHOD_CALL, "three"))
        } else {
            Err(Raised::new(&kinds::INVALID_ARGUMENT, "other"))
        }
    }

    #[test]
    fn test_throws_matching_kind() {
        let args = [Value::from("foo"), Value::from("bar"), Value::from("baz")];
        let response = log().throws_with_args(
            arity_sensitive,
            &args,
            &kinds::BAD_METHOD_CALL,
            "Is it a bad method call?",
        );
        assert!(response.passed());
    }

    #[test]
    fn test_throws_sub_kind_matches_parent() {
        let args = [Value::Null, Value::Null, Value::Null];
        let response =
            log().throws_with_args(arity_sensitive, &args, &kinds::LOGIC_ERROR, "logic");
        assert!(response.passed());
    }

    #[test]
    fn test_throws_different_kind_fails() {
        let response = log().throws(arity_sensitive, &kinds::BAD_METHOD_CALL, "no args");
        assert!(!response.passed());
    }

    #[test]
    fn test_throws_nothing_raised_fails() {
        let response = log().throws(|_| Ok::<_, Raised>(Value::Null), &kinds::ERROR, "quiet");
        assert!(!response.passed());
    }

    #[test]
    fn test_throws_records_args_and_kind() {
        let mut log = log();
        log.throws_with_args(arity_sensitive, &[Value::Int(1)], &kinds::ERROR, "recorded");

        assert_eq!(
            log.outcomes[0].arguments,
            vec![Value::Int(1), Value::from("Error")]
        );
    }

    #[test]
    fn test_capture_classifies() {
        assert!(matches!(
            ThrowOutcome::capture(|_| Ok::<(), Raised>(()), &[], &kinds::ERROR),
            ThrowOutcome::NotRaised
        ));
        assert!(matches!(
            ThrowOutcome::capture(arity_sensitive, &[], &kinds::BAD_CALL),
            ThrowOutcome::Mismatched(_)
        ));
    }

    // -- response -------------------------------------------------------------

    #[test]
    fn test_response_display() {
        let response = log().equal(1, 2, "Is one two?");
        assert_eq!(
            response.to_string(),
            "! (FAIL) \"Is one two?\" of type assert->equal"
        );
    }
}
