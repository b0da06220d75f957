#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::EvalConfig;
use pretty_assertions::assert_eq;
use vx_value::EvalErrorKind;

fn nums(ns: &[i64]) -> Value {
    Value::list(ns.iter().map(|&n| Value::number(n)))
}

#[test]
fn list_repetition() {
    let ev = Evaluator::new();
    let xs = nums(&[1, 2]);
    assert_eq!(
        ev.repeat_list(&xs, &Value::number(3)).unwrap(),
        nums(&[1, 2, 1, 2, 1, 2])
    );
    assert_eq!(ev.repeat_list(&xs, &Value::number(1)).unwrap(), xs);
    assert!(ev.repeat_list(&xs, &Value::number(0)).unwrap().is_empty_list());
    assert!(ev
        .repeat_list(&Value::EmptyList, &Value::number(5))
        .unwrap()
        .is_empty_list());
}

#[test]
fn single_values_repeat_into_lists() {
    let ev = Evaluator::new();
    assert_eq!(
        ev.repeat_list(&Value::number(7), &Value::number(3)).unwrap(),
        nums(&[7, 7, 7])
    );
}

#[test]
fn boolean_factors() {
    let ev = Evaluator::new();
    let xs = nums(&[1, 2]);
    assert_eq!(ev.repeat_list(&xs, &Value::Bool(true)).unwrap(), xs);
    assert!(ev.repeat_list(&xs, &Value::Bool(false)).unwrap().is_empty_list());
}

#[test]
fn bad_list_factors() {
    let ev = Evaluator::new();
    let xs = nums(&[1]);
    assert_eq!(
        ev.repeat_list(&xs, &Value::string("3")).unwrap_err().kind,
        EvalErrorKind::NonNumericFactor
    );
    assert_eq!(
        ev.repeat_list(&xs, &Value::number(-1)).unwrap_err().to_string(),
        "negative list repetition factor"
    );
    assert_eq!(
        ev.repeat_list(&xs, &Value::number(0x1_0000_0000i64))
            .unwrap_err()
            .to_string(),
        "excessively large list multiplier"
    );
}

#[test]
fn configured_repetition_limit() {
    let ev = Evaluator::builder()
        .config(EvalConfig::default().with_max_list_repetition(4))
        .build();
    assert!(ev.repeat_list(&Value::number(1), &Value::number(4)).is_ok());
    assert!(ev.repeat_list(&Value::number(1), &Value::number(5)).is_err());
}

#[test]
fn repeated_lists_are_bounded_by_total_length() {
    let ev = Evaluator::builder()
        .config(EvalConfig::default().with_max_repeat_length(6))
        .build();
    let xs = nums(&[1, 2]);
    assert_eq!(
        ev.repeat_list(&xs, &Value::number(3)).unwrap(),
        nums(&[1, 2, 1, 2, 1, 2])
    );
    assert_eq!(
        ev.repeat_list(&xs, &Value::number(4)).unwrap_err().to_string(),
        "excessively large list multiplier"
    );

    // Within the factor limit, but far too many elements to build.
    let ev = Evaluator::new();
    assert_eq!(
        ev.repeat_list(&nums(&[1, 2, 3]), &Value::number(0xFFFF_FFFFi64))
            .unwrap_err()
            .to_string(),
        "excessively large list multiplier"
    );
}

#[test]
fn byte_repetition() {
    let ev = Evaluator::new();
    let s = Value::string("ab");
    assert_eq!(
        ev.repeat_bytes(&s, b"ab", &Value::number(3)).unwrap(),
        Value::string("ababab")
    );
    assert_eq!(
        ev.repeat_bytes(&s, b"ab", &Value::number(0)).unwrap(),
        Value::string("")
    );
    assert_eq!(ev.repeat_bytes(&s, b"ab", &Value::Bool(true)).unwrap(), s);
    assert_eq!(
        ev.repeat_bytes(&s, b"ab", &Value::Bool(false)).unwrap(),
        Value::string("")
    );

    let p = Value::packed([1u8]);
    let out = ev.repeat_bytes(&p, &[1], &Value::number(2)).unwrap();
    assert_eq!(out, Value::packed([1u8, 1]));
}

#[test]
fn bad_byte_factors() {
    let ev = Evaluator::new();
    let s = Value::string("ab");
    assert_eq!(
        ev.repeat_bytes(&s, b"ab", &Value::number(-2))
            .unwrap_err()
            .to_string(),
        "negative string multiplier"
    );
    assert_eq!(
        ev.repeat_bytes(&s, b"ab", &Value::Byte(2))
            .unwrap_err()
            .to_string(),
        "string/pack repetition requires int or bool"
    );
    let huge = Value::number(BigInt::from(u128::MAX));
    assert_eq!(
        ev.repeat_bytes(&s, b"ab", &huge).unwrap_err().to_string(),
        "excessively large string multiplier"
    );
}

#[test]
fn huge_byte_repetition_fails_without_allocating() {
    let ev = Evaluator::new();
    let s = Value::string("ab");
    assert_eq!(
        ev.repeat_bytes(&s, b"ab", &Value::number(1i64 << 44))
            .unwrap_err()
            .to_string(),
        "excessively large string multiplier"
    );

    // Nothing to repeat: any factor gives the empty string.
    let empty = Value::string("");
    assert_eq!(
        ev.repeat_bytes(&empty, b"", &Value::number(1i64 << 60)).unwrap(),
        Value::string("")
    );
}

#[test]
fn configured_repeat_length_limits_bytes() {
    let ev = Evaluator::builder()
        .config(EvalConfig::default().with_max_repeat_length(4))
        .build();
    let s = Value::string("ab");
    assert_eq!(ev.repeat_bytes(&s, b"ab", &Value::number(2)).unwrap(), Value::string("abab"));
    assert_eq!(
        ev.repeat_bytes(&s, b"ab", &Value::number(3)).unwrap_err().to_string(),
        "excessively large string multiplier"
    );
}
