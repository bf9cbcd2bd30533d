//! Assertion evaluation.
//!
//! Every operation is a pure function returning [`AttestResult`]: `Ok(())`
//! on pass, or the distinguished assertion-failure error on a failed
//! expectation. Test bodies chain assertions with `?`, which gives
//! fail-fast, single-failure-per-body semantics: the first `Err` aborts
//! the body and nothing after it is observed.
//!
//! Misusing an operation (a tolerance comparison on non-numeric values, a
//! negative tolerance) is *not* an assertion failure: those paths return
//! runtime-kind errors, which a host runner reports as "errored" rather
//! than "failed".

use crate::errors::{
    assertion_failure, invalid_operation, type_mismatch, AttestError, AttestResult, FaultKind,
};
use crate::value::Value;

/// Unconditionally signals an assertion failure carrying `message`.
pub fn fail(message: impl Into<String>) -> AttestResult<()> {
    Err(assertion_failure(message))
}

/// Passes iff `condition` is true; fails with `message` otherwise.
pub fn assert_true(condition: bool, message: &str) -> AttestResult<()> {
    if condition {
        Ok(())
    } else {
        Err(assertion_failure(message))
    }
}

/// Passes iff `condition` is false; fails with `message` otherwise.
pub fn assert_false(condition: bool, message: &str) -> AttestResult<()> {
    assert_true(!condition, message)
}

/// Passes iff the two values are structurally equal.
pub fn assert_eq(expected: &Value, actual: &Value) -> AttestResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(assertion_failure(format!(
            "expected {}, got {}",
            expected, actual
        )))
    }
}

/// Passes iff `|expected - actual| <= tolerance` for two numeric values.
///
/// Both operands must be numbers when a tolerance is in play; anything else
/// is a type error, not an assertion failure. A negative tolerance is an
/// invalid operation.
pub fn assert_eq_within(expected: &Value, actual: &Value, tolerance: f64) -> AttestResult<()> {
    if numbers_within(expected, actual, tolerance)? {
        Ok(())
    } else {
        Err(assertion_failure(format!(
            "expected {} within {} of it, got {}",
            expected, tolerance, actual
        )))
    }
}

/// Passes iff the two values are structurally unequal.
///
/// This negates the comparison of [`assert_eq`], not its outcome.
pub fn assert_ne(expected: &Value, actual: &Value) -> AttestResult<()> {
    if expected != actual {
        Ok(())
    } else {
        Err(assertion_failure(format!(
            "expected values to differ, both were {}",
            actual
        )))
    }
}

/// Passes iff `|expected - actual| > tolerance` for two numeric values.
///
/// Incomparable inputs still error: non-numeric operands return the same
/// type error [`assert_eq_within`] would, never a silent pass.
pub fn assert_ne_within(expected: &Value, actual: &Value, tolerance: f64) -> AttestResult<()> {
    if numbers_within(expected, actual, tolerance)? {
        Err(assertion_failure(format!(
            "expected {} to differ from {} by more than {}",
            actual, expected, tolerance
        )))
    } else {
        Ok(())
    }
}

/// Shared comparison for the tolerance-carrying operations.
fn numbers_within(expected: &Value, actual: &Value, tolerance: f64) -> AttestResult<bool> {
    if tolerance < 0.0 {
        return Err(invalid_operation(
            "tolerance comparison",
            format!("tolerance must be non-negative, got {}", tolerance),
        ));
    }
    match (expected.as_number(), actual.as_number()) {
        (Some(e), Some(a)) => Ok((e - a).abs() <= tolerance),
        (None, _) => Err(type_mismatch("Number", expected.type_name())),
        (_, None) => Err(type_mismatch("Number", actual.type_name())),
    }
}

/// Passes iff the two references denote the identical underlying object.
///
/// This is literal pointer identity, not value equality. For value-like
/// immutable data the result is implementation-defined: the compiler may or
/// may not merge equal constants into one allocation, so two equal
/// `&'static str` literals can compare either way. No interning behavior is
/// emulated here.
pub fn assert_same<T: ?Sized>(expected: &T, actual: &T) -> AttestResult<()> {
    if std::ptr::eq(expected, actual) {
        Ok(())
    } else {
        Err(assertion_failure(
            "expected both references to denote the same instance",
        ))
    }
}

/// Passes iff the two references denote distinct underlying objects.
///
/// See [`assert_same`] for the portability caveat.
pub fn assert_not_same<T: ?Sized>(expected: &T, actual: &T) -> AttestResult<()> {
    if std::ptr::eq(expected, actual) {
        Err(assertion_failure(
            "expected references to denote distinct instances",
        ))
    } else {
        Ok(())
    }
}

/// Passes iff `value` is the nil sentinel.
pub fn assert_null(value: &Value) -> AttestResult<()> {
    if value.is_nil() {
        Ok(())
    } else {
        Err(assertion_failure(format!("expected nil, got {}", value)))
    }
}

/// Passes iff `value` is not the nil sentinel.
pub fn assert_not_null(value: &Value) -> AttestResult<()> {
    if value.is_nil() {
        Err(assertion_failure("expected a value, got nil"))
    } else {
        Ok(())
    }
}

/// Invokes `action` and passes iff it fails with `expected` (or a subkind
/// of it, see [`FaultKind::accepts`]). Returns the caught error so callers
/// can inspect its message.
///
/// If the action fails with a non-matching kind, that error propagates
/// outward unchanged; a host runner reports it as an unexpected error, not
/// an assertion failure. If the action completes normally, the assertion
/// fails.
pub fn assert_throws<T>(
    expected: FaultKind,
    action: impl FnOnce() -> AttestResult<T>,
) -> AttestResult<AttestError> {
    match action() {
        Ok(_) => Err(assertion_failure(format!(
            "expected a {} error, but the action completed normally",
            expected
        ))),
        Err(err) if expected.accepts(err.kind()) => Ok(err),
        Err(err) => Err(err),
    }
}
