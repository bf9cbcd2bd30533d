//! Assertion kit semantics: pass/fail outcomes, message content, and the
//! distinguished failure signal.

use attest::assertions::{
    assert_eq, assert_eq_within, assert_false, assert_ne, assert_ne_within, assert_not_null,
    assert_not_same, assert_null, assert_same, assert_throws, assert_true, fail,
};
use attest::errors::{type_mismatch, FaultKind};
use attest::value::Value;
use attest::{AttestError, AttestResult};

mod equality {
    use super::*;

    #[test]
    fn equal_values_pass() {
        assert!(assert_eq(&Value::Number(2.0), &Value::Number(2.0)).is_ok());
        assert!(assert_eq(&Value::String("a".into()), &Value::String("a".into())).is_ok());
        assert!(assert_eq(&Value::Nil, &Value::Nil).is_ok());
    }

    #[test]
    fn failure_message_embeds_both_values() {
        let err = assert_eq(&Value::Number(2.0), &Value::Number(3.0)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("expected 2"));
        assert!(message.contains("got 3"));
    }

    #[test]
    fn differing_types_are_unequal_not_errors() {
        let err = assert_eq(&Value::Number(1.0), &Value::String("1".into())).unwrap_err();
        assert!(err.is_assertion_failure());
    }

    #[test]
    fn tolerance_covers_the_boundary() {
        let e = Value::Number(7.14);
        let a = Value::Number(3.14 + 4.0);
        // The doubles land on opposite sides of 7.14, so exact equality fails
        // but a small tolerance accepts them.
        assert!(assert_eq(&e, &a).is_err());
        assert!(assert_eq_within(&e, &a, 7.14 / 100_000_000_000.0).is_ok());

        // |10 - 7| == 3 is within tolerance 3, not within 2.9.
        let ten = Value::Number(10.0);
        let seven = Value::Number(7.0);
        assert!(assert_eq_within(&ten, &seven, 3.0).is_ok());
        assert!(assert_eq_within(&ten, &seven, 2.9).is_err());
    }

    #[test]
    fn zero_tolerance_means_exact() {
        assert!(assert_eq_within(&Value::Number(3.0), &Value::Number(3.0), 0.0).is_ok());
        assert!(assert_eq_within(&Value::Number(3.0), &Value::Number(3.0000001), 0.0).is_err());
    }

    #[test]
    fn negative_tolerance_is_an_invalid_operation() {
        let err = assert_eq_within(&Value::Number(1.0), &Value::Number(1.0), -0.5).unwrap_err();
        assert_eq!(err.kind(), FaultKind::Operation);
    }

    #[test]
    fn tolerance_on_non_numbers_is_a_type_error() {
        let err =
            assert_eq_within(&Value::String("a".into()), &Value::Number(1.0), 0.1).unwrap_err();
        assert_eq!(err.kind(), FaultKind::Type);
        assert!(!err.is_assertion_failure());
    }
}

mod inequality {
    use super::*;

    #[test]
    fn passes_exactly_when_equality_would_fail() {
        let pairs = [
            (Value::Number(1.0), Value::Number(2.0)),
            (Value::Number(1.0), Value::Number(1.0)),
            (Value::String("a".into()), Value::String("b".into())),
            (Value::Nil, Value::Bool(false)),
        ];
        for (a, b) in &pairs {
            assert_eq!(assert_ne(a, b).is_ok(), assert_eq(a, b).is_err());
        }
    }

    #[test]
    fn equal_values_fail_with_both_embedded() {
        let err = assert_ne(&Value::Number(4.0), &Value::Number(4.0)).unwrap_err();
        assert!(err.to_string().contains("4"));
    }

    #[test]
    fn negated_tolerance_comparison() {
        let e = Value::Number(10.0);
        let a = Value::Number(13.0);
        assert!(assert_ne_within(&e, &a, 2.0).is_ok());
        assert!(assert_ne_within(&e, &a, 3.0).is_err());
    }

    #[test]
    fn incomparable_inputs_still_error() {
        // Negation applies to the comparison, not the pass/fail outcome: a
        // type error must not turn into a pass.
        let err = assert_ne_within(&Value::Bool(true), &Value::Number(1.0), 0.1).unwrap_err();
        assert_eq!(err.kind(), FaultKind::Type);
    }
}

mod identity {
    use super::*;

    #[test]
    fn a_reference_is_the_same_as_itself() {
        let v = Value::String("Hello".into());
        assert!(assert_same(&v, &v).is_ok());
        assert!(assert_not_same(&v, &v).is_err());
    }

    #[test]
    fn equal_values_in_distinct_allocations_are_not_same() {
        let a = Value::String("Hello".into());
        let b = a.clone();
        assert_eq!(a, b);
        assert!(assert_same(&a, &b).is_err());
        assert!(assert_not_same(&a, &b).is_ok());
    }
}

mod conditions_and_null {
    use super::*;

    #[test]
    fn condition_failures_carry_the_given_message() {
        let err = assert_true(false, "Absolute value of 4 is not 2").unwrap_err();
        assert!(err.to_string().contains("Absolute value of 4 is not 2"));
        assert!(assert_true(true, "unused").is_ok());
        assert!(assert_false(false, "unused").is_ok());
        assert!(assert_false(true, "was true").is_err());
    }

    #[test]
    fn nil_is_the_null_sentinel() {
        assert!(assert_null(&Value::Nil).is_ok());
        assert!(assert_null(&Value::String(String::new())).is_err());
        assert!(assert_not_null(&Value::String(String::new())).is_ok());
        assert!(assert_not_null(&Value::Nil).is_err());
    }
}

mod throws {
    use super::*;

    fn failing_action() -> AttestResult<Value> {
        Err(type_mismatch("Number", "String"))
    }

    #[test]
    fn passes_on_the_expected_kind_and_returns_the_error() {
        let caught = assert_throws(FaultKind::Type, failing_action).unwrap();
        assert_eq!(caught.kind(), FaultKind::Type);
    }

    #[test]
    fn a_parent_kind_accepts_its_subkinds() {
        assert!(assert_throws(FaultKind::Runtime, failing_action).is_ok());
    }

    #[test]
    fn a_different_kind_propagates_the_original_error() {
        let err = assert_throws(FaultKind::Configuration, failing_action).unwrap_err();
        // Not converted into an assertion failure: the unexpected error
        // itself escapes.
        assert_eq!(err.kind(), FaultKind::Type);
    }

    #[test]
    fn normal_completion_is_an_assertion_failure() {
        let err = assert_throws(FaultKind::Type, || Ok(Value::Nil)).unwrap_err();
        assert!(err.is_assertion_failure());
        assert!(err.to_string().contains("completed normally"));
    }
}

mod failure_signal {
    use super::*;

    #[test]
    fn fail_produces_exactly_one_assertion_failure() {
        let err = fail("x").unwrap_err();
        match err {
            AttestError::Assertion { message } => assert_eq!(message, "x"),
            other => panic!("expected an assertion failure, got {:?}", other),
        }
    }

    #[test]
    fn bodies_stop_at_the_first_failure() {
        fn body() -> AttestResult<()> {
            assert_true(false, "first")?;
            fail("second")?;
            Ok(())
        }
        let err = body().unwrap_err();
        assert!(err.to_string().contains("first"));
        assert!(!err.to_string().contains("second"));
    }
}
