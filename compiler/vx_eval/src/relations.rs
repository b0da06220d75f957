//! Ordering, membership, type tests and dispatch-aware equality.

use std::cmp::Ordering;

use memchr::memmem;
use vx_ir::Op;
use vx_value::list::elements;
use vx_value::{
    equal_by, mismatched_types, type_error, unsupported_type, BaseType, EvalError, GenericIter,
    Heap, TypeValue, Value,
};

use crate::Evaluator;

impl Evaluator {
    /// Three-way comparison. Operands must have the same type.
    pub(crate) fn compare(&self, a: &Value, b: &Value) -> Result<Ordering, EvalError> {
        if a.kind() != b.kind() {
            return Err(mismatched_types("compare()"));
        }
        if let (Value::Opaque(x), Value::Opaque(y)) = (a, b) {
            if x.type_name() != y.type_name() {
                return Err(mismatched_types("compare()"));
            }
        }

        if let Some(record) = self.record_for(a) {
            if let Some(ord) = record.order(a, b) {
                return ord;
            }
        }

        match (a, b) {
            (Value::Number(x), Value::Number(y)) => Ok((**x).cmp(&**y)),
            (Value::Str(x), Value::Str(y)) | (Value::Packed(x), Value::Packed(y)) => {
                Ok((**x).cmp(&**y))
            }
            _ => Err(unsupported_type("compare()")),
        }
    }

    /// Structural equality; user values with an ordering record compare
    /// through it, including inside lists and composites.
    pub(crate) fn values_equal(&self, a: &Value, b: &Value) -> Result<bool, EvalError> {
        equal_by(a, b, &|x, y| {
            let ord = self.record_for(x)?.order(x, y)?;
            Some(ord.map(Ordering::is_eq))
        })
    }

    /// `v in container`.
    pub(crate) fn contains(&self, v: &Value, container: &Value) -> Result<bool, EvalError> {
        if let Some(e) = container.as_expr() {
            match e.op {
                Op::Gamut | Op::Delta => {
                    let above = self.compare(v, &e.left)? != Ordering::Less;
                    let upper = self.compare(v, &e.right)?;
                    let below = upper == Ordering::Less
                        || (e.op == Op::Gamut && upper == Ordering::Equal);
                    return Ok(above && below);
                }
                Op::Array => return self.in_list(v, &e.right),
                Op::Empower if container.is_table() => return self.in_mapping_keys(v, &e.right),
                Op::Module => return self.in_mapping_keys(v, &e.right),
                _ => {}
            }
        }

        match container {
            Value::EmptyList => Ok(false),
            Value::Str(s) | Value::Packed(s) => in_bytes(v, s),
            _ => Err(type_error("unsupported container type for `in`")),
        }
    }

    fn in_list(&self, v: &Value, list: &Value) -> Result<bool, EvalError> {
        for item in elements(list) {
            if self.values_equal(v, &item)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn in_mapping_keys(&self, v: &Value, array: &Value) -> Result<bool, EvalError> {
        for mapping in GenericIter::new(array)? {
            if let Some((key, _)) = mapping.as_mapping() {
                if self.values_equal(key, v)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// `v isa t`.
    pub(crate) fn isa(&self, v: &Value, t: &Value) -> Result<bool, EvalError> {
        vx_stack::ensure_sufficient_stack(|| match t {
            Value::Type(TypeValue::Base(base)) => Ok(base.accepts(v)),
            Value::Type(TypeValue::Named(info)) => Ok(match v {
                Value::Opaque(o) => Heap::ptr_eq(&o.type_info, info) || o.type_name() == info.name,
                _ => false,
            }),
            Value::Expr(e) if t.is_type() => match e.op {
                // T[]
                Op::Subscript => match v.array_items() {
                    Some(items) => self.all_isa(items, &e.left),
                    None => Ok(false),
                },
                // *T
                Op::Deref => {
                    if v.is_array() {
                        return Ok(false);
                    }
                    self.all_isa(v, &e.right)
                }
                Op::Union => Ok(self.isa(v, &e.left)? || self.isa(v, &e.right)?),
                Op::Intersection => Ok(self.isa(v, &e.left)? && self.isa(v, &e.right)?),
                // K ^ V
                Op::Empower => match v.as_table() {
                    Some((_, array)) => self.table_matches(array, &e.left, &e.right),
                    None => Ok(false),
                },
                _ => Err(type_error("unsupported type expression in `isa`")),
            },
            _ => Err(type_error(format!(
                "`isa` requires a type, not {}",
                t.type_name()
            ))),
        })
    }

    fn all_isa(&self, list: &Value, t: &Value) -> Result<bool, EvalError> {
        for item in elements(list) {
            if !self.isa(&item, t)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn table_matches(&self, array: &Value, key_type: &Value, value_type: &Value) -> Result<bool, EvalError> {
        for mapping in GenericIter::new(array)? {
            let Some((key, value)) = mapping.as_mapping() else {
                return Ok(false);
            };
            if !self.isa(key, key_type)? || !self.isa(value, value_type)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Byte or substring search.
fn in_bytes(needle: &Value, haystack: &[u8]) -> Result<bool, EvalError> {
    match needle {
        Value::Byte(b) => Ok(memchr::memchr(*b, haystack).is_some()),
        Value::Str(n) | Value::Packed(n) => Ok(memmem::find(haystack, n).is_some()),
        _ => Err(type_error(
            "unsupported pattern type for `in` with string/pack",
        )),
    }
}

/// The type named by `typeof`.
pub(crate) fn type_of(v: &Value) -> Result<Value, EvalError> {
    if let Some(base) = BaseType::of(v) {
        return Ok(Value::base_type(base));
    }
    match v {
        Value::Opaque(o) => Ok(Value::Type(TypeValue::Named(o.type_info.clone()))),
        Value::Pair(_) => {
            let types: Result<Vec<Value>, EvalError> = elements(v).map(|item| type_of(&item)).collect();
            Ok(Value::list(types?))
        }
        _ if v.is_functional() => Ok(Value::base_type(BaseType::Function)),
        _ if v.is_array() => Ok(Value::expr(
            Value::base_type(BaseType::Any),
            Op::Subscript,
            Value::EmptyList,
        )),
        _ => match v.as_table() {
            Some((key_type, _)) => Ok(Value::expr(
                key_type.clone(),
                Op::Empower,
                Value::base_type(BaseType::Any),
            )),
            None => Err(type_error(format!("no type descriptor for {}", v.type_name()))),
        },
    }
}
