//! Per-type operator overrides.
//!
//! A type opts into custom behavior by registering a [`Dispatch`] record.
//! The evaluator asks the left operand's record (binary operators) or the
//! operand's record (unary operators) before applying any built-in rule;
//! `None` means "not handled" and evaluation falls through.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use vx_ir::Op;

use crate::errors::{EvalError, EvalResult};
use crate::value::{Value, ValueKind};

/// Capability record for one runtime type.
///
/// Every method defaults to "not handled".
pub trait Dispatch: Send + Sync {
    /// Three-way ordering of two values of this type.
    fn order(&self, _a: &Value, _b: &Value) -> Option<Result<Ordering, EvalError>> {
        None
    }

    fn unary(&self, _op: Op, _operand: &Value) -> Option<EvalResult> {
        None
    }

    fn binary(&self, _op: Op, _left: &Value, _right: &Value) -> Option<EvalResult> {
        None
    }
}

/// Registry key: a builtin kind, or the name of a user type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Kind(ValueKind),
    Named(String),
}

impl TypeKey {
    /// Key under which `v`'s record is registered.
    pub fn of(v: &Value) -> TypeKey {
        match v {
            Value::Opaque(o) => TypeKey::Named(o.type_name().to_owned()),
            other => TypeKey::Kind(other.kind()),
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKey::Kind(kind) => write!(f, "{kind:?}"),
            TypeKey::Named(name) => f.write_str(name),
        }
    }
}

/// Registered capability records.
#[derive(Default)]
pub struct DispatchRegistry {
    records: FxHashMap<TypeKey, Arc<dyn Dispatch>>,
}

impl DispatchRegistry {
    pub fn new() -> Self {
        DispatchRegistry::default()
    }

    /// Registry pre-populated with the records for bytes and booleans.
    pub fn with_defaults() -> Self {
        let mut registry = DispatchRegistry::new();
        registry.register(TypeKey::Kind(ValueKind::Byte), ByteOrder);
        registry.register(TypeKey::Kind(ValueKind::Bool), BoolLogic);
        registry
    }

    /// Register (or replace) the record for `key`.
    pub fn register(&mut self, key: TypeKey, record: impl Dispatch + 'static) {
        tracing::debug!(%key, "registering dispatch record");
        self.records.insert(key, Arc::new(record));
    }

    pub fn remove(&mut self, key: &TypeKey) -> bool {
        self.records.remove(key).is_some()
    }

    /// Record for `v`'s type. The handle outlives any lock around the registry.
    pub fn lookup(&self, v: &Value) -> Option<Arc<dyn Dispatch>> {
        if self.records.is_empty() {
            return None;
        }
        self.records.get(&TypeKey::of(v)).cloned()
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl fmt::Debug for DispatchRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.records.keys()).finish()
    }
}

/// Numeric ordering of bytes; makes byte ranges and byte comparison work.
struct ByteOrder;

impl Dispatch for ByteOrder {
    fn order(&self, a: &Value, b: &Value) -> Option<Result<Ordering, EvalError>> {
        match (a, b) {
            (Value::Byte(x), Value::Byte(y)) => Some(Ok(x.cmp(y))),
            _ => None,
        }
    }
}

/// `not`, `and`, `or` on already-evaluated booleans.
struct BoolLogic;

impl Dispatch for BoolLogic {
    fn unary(&self, op: Op, operand: &Value) -> Option<EvalResult> {
        match (op, operand) {
            (Op::Not, Value::Bool(b)) => Some(Ok(Value::Bool(!b))),
            _ => None,
        }
    }

    fn binary(&self, op: Op, left: &Value, right: &Value) -> Option<EvalResult> {
        let (Value::Bool(a), Value::Bool(b)) = (left, right) else {
            return None;
        };
        match op {
            Op::And => Some(Ok(Value::Bool(*a && *b))),
            Op::Or => Some(Ok(Value::Bool(*a || *b))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests;
