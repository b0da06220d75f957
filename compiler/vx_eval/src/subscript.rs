//! `container[index]`.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use smallvec::SmallVec;
use vx_ir::Op;
use vx_value::list::ListBuilder;
use vx_value::{index_out_of_range, no_such_key, type_error, EvalError, GenericIter, Value};

use crate::Evaluator;

impl Evaluator {
    pub(crate) fn subscript(&self, left: &Value, right: &Value) -> Result<Value, EvalError> {
        if let Some((_, array)) = left.as_table() {
            return self.associative_subscript(array, right);
        }
        if let Some(e) = left.as_expr().filter(|_| left.is_module()) {
            return self.associative_subscript(&e.right, right);
        }

        let v = linear_subscript(left, right)?;

        // Slices of strings and packed values keep their type.
        if left.is_bytes() && (right.is_empty_list() || right.as_expr().is_some()) {
            let bytes: Vec<u8> = GenericIter::new(&v)?
                .filter_map(|item| match item {
                    Value::Byte(b) => Some(b),
                    _ => None,
                })
                .collect();
            return Ok(left.rewrap_bytes(bytes));
        }
        Ok(v)
    }

    /// Value of the mapping whose key equals `key`.
    pub(crate) fn associative_subscript(&self, array: &Value, key: &Value) -> Result<Value, EvalError> {
        for mapping in GenericIter::new(array)? {
            if let Some((k, v)) = mapping.as_mapping() {
                if self.values_equal(k, key)? {
                    return Ok(v.clone());
                }
            }
        }
        Err(no_such_key(key))
    }
}

fn linear_subscript(container: &Value, index: &Value) -> Result<Value, EvalError> {
    let indexable = container.array_items().is_some() || container.is_bytes() || container.is_range();
    if !indexable {
        return Err(type_error(format!("cannot subscript {}", container.type_name())));
    }

    match index {
        Value::Number(n) => Indexed::new(container)?
            .get(n)
            .ok_or_else(|| index_out_of_range(&**n)),
        Value::EmptyList => Ok(Value::EmptyList),
        _ if index.is_array() || index.is_range() => {
            let items = Indexed::new(container)?;
            let mut slice = ListBuilder::new();
            for i in GenericIter::new(index)? {
                let Value::Number(n) = &i else {
                    return Err(type_error("subscript indices must be integers"));
                };
                slice.append(items.get(n).ok_or_else(|| index_out_of_range(&**n))?);
            }
            Ok(slice.finish_array())
        }
        _ => Err(type_error(format!(
            "cannot subscript with {}",
            index.type_name()
        ))),
    }
}

/// Random access into a subscriptable container. Ranges and byte strings
/// are indexed in place; only arrays are gathered.
enum Indexed<'a> {
    Items(SmallVec<[Value; 8]>),
    Bytes(&'a [u8]),
    Numbers { lower: &'a BigInt, len: BigInt },
    ByteRange { lower: u8, len: u16 },
}

impl<'a> Indexed<'a> {
    fn new(container: &'a Value) -> Result<Self, EvalError> {
        if let Some(bytes) = container.as_bytes() {
            return Ok(Indexed::Bytes(bytes));
        }
        let Some((lower, op, upper)) = container.as_range() else {
            return Ok(Indexed::Items(GenericIter::new(container)?.collect()));
        };
        let inclusive = op == Op::Gamut;
        match (lower, upper) {
            (Value::Number(lo), Value::Number(hi)) => {
                let end = &**hi + BigInt::from(u8::from(inclusive));
                let len = (end - &**lo).max(BigInt::zero());
                Ok(Indexed::Numbers { lower: &**lo, len })
            }
            (Value::Byte(lo), Value::Byte(hi)) => {
                let end = u16::from(*hi) + u16::from(inclusive);
                Ok(Indexed::ByteRange {
                    lower: *lo,
                    len: end.saturating_sub(u16::from(*lo)),
                })
            }
            _ => Err(type_error("range bounds must be integers or bytes")),
        }
    }

    fn get(&self, i: &BigInt) -> Option<Value> {
        if i.is_negative() {
            return None;
        }
        match self {
            Indexed::Items(items) => items.get(i.to_usize()?).cloned(),
            Indexed::Bytes(bytes) => bytes.get(i.to_usize()?).copied().map(Value::Byte),
            Indexed::Numbers { lower, len } => (i < len).then(|| Value::number(*lower + i)),
            Indexed::ByteRange { lower, len } => {
                let i = i.to_u16().filter(|i| i < len)?;
                u8::try_from(u16::from(*lower) + i).ok().map(Value::Byte)
            }
        }
    }
}
