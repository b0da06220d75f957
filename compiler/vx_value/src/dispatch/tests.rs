#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::value::TypeInfo;

struct Reversed;

impl Dispatch for Reversed {
    fn order(&self, a: &Value, b: &Value) -> Option<Result<Ordering, EvalError>> {
        match (a, b) {
            (Value::Byte(x), Value::Byte(y)) => Some(Ok(y.cmp(x))),
            _ => None,
        }
    }
}

struct Nothing;

impl Dispatch for Nothing {}

#[test]
fn unregistered_types_have_no_record() {
    let registry = DispatchRegistry::new();
    assert!(registry.lookup(&Value::Byte(1)).is_none());
    assert!(registry.is_empty());
}

#[test]
fn lookup_by_kind() {
    let mut registry = DispatchRegistry::new();
    registry.register(TypeKey::Kind(ValueKind::Byte), Reversed);
    let record = registry.lookup(&Value::Byte(1)).unwrap();
    let ord = record.order(&Value::Byte(1), &Value::Byte(2)).unwrap().unwrap();
    assert_eq!(ord, Ordering::Greater);
    assert!(registry.lookup(&Value::number(1)).is_none());
}

#[test]
fn default_methods_do_not_handle() {
    let record = Nothing;
    assert!(record.order(&Value::Byte(1), &Value::Byte(2)).is_none());
    assert!(record.unary(Op::UnaryMinus, &Value::Byte(1)).is_none());
    assert!(record
        .binary(Op::Add, &Value::Byte(1), &Value::Byte(2))
        .is_none());
}

#[test]
fn user_types_are_keyed_by_name() {
    let point = Value::named_type(TypeInfo::new("point"));
    let p = Value::opaque(&point, (1i32, 2i32)).unwrap();
    assert_eq!(TypeKey::of(&p), TypeKey::Named("point".into()));

    let mut registry = DispatchRegistry::new();
    registry.register(TypeKey::Named("point".into()), Nothing);
    assert!(registry.lookup(&p).is_some());
    assert!(registry.contains(&TypeKey::Named("point".into())));
    assert!(registry.remove(&TypeKey::Named("point".into())));
    assert!(registry.lookup(&p).is_none());
}

#[test]
fn register_replaces() {
    let mut registry = DispatchRegistry::new();
    registry.register(TypeKey::Kind(ValueKind::Byte), Nothing);
    registry.register(TypeKey::Kind(ValueKind::Byte), Reversed);
    assert_eq!(registry.len(), 1);
    let record = registry.lookup(&Value::Byte(0)).unwrap();
    assert!(record.order(&Value::Byte(0), &Value::Byte(0)).is_some());
}

#[test]
fn defaults_order_bytes() {
    let registry = DispatchRegistry::with_defaults();
    let record = registry.lookup(&Value::Byte(b'a')).unwrap();
    let ord = record
        .order(&Value::Byte(b'a'), &Value::Byte(b'b'))
        .unwrap()
        .unwrap();
    assert_eq!(ord, Ordering::Less);
}

#[test]
fn defaults_boolean_logic() {
    let registry = DispatchRegistry::with_defaults();
    let record = registry.lookup(&Value::Bool(true)).unwrap();

    let not = record.unary(Op::Not, &Value::Bool(true)).unwrap().unwrap();
    assert!(matches!(not, Value::Bool(false)));

    let and = record
        .binary(Op::And, &Value::Bool(true), &Value::Bool(false))
        .unwrap()
        .unwrap();
    assert!(matches!(and, Value::Bool(false)));

    let or = record
        .binary(Op::Or, &Value::Bool(true), &Value::Bool(false))
        .unwrap()
        .unwrap();
    assert!(matches!(or, Value::Bool(true)));

    assert!(record
        .binary(Op::And, &Value::Bool(true), &Value::number(1))
        .is_none());
    assert!(record.unary(Op::UnaryMinus, &Value::Bool(true)).is_none());
}
