//! `value.name`.

use num_bigint::BigInt;
use vx_value::list::{count, ListBuilder};
use vx_value::{malformed, no_such_member, type_error, EvalError, GenericIter, Value};

use crate::Evaluator;

impl Evaluator {
    pub(crate) fn calc_member(&self, left: &Value, right: &Value) -> Result<Value, EvalError> {
        let Value::Str(name) = right else {
            return Err(malformed("non-string member name"));
        };
        let name = String::from_utf8_lossy(name);

        if let Some(items) = left.array_items() {
            return array_member(items, &name);
        }
        if let Some((key, value)) = left.as_mapping() {
            return match &*name {
                "key" => Ok(key.clone()),
                "value" => Ok(value.clone()),
                _ => Err(no_such_member("mapping", name)),
            };
        }
        if let Some((_, array)) = left.as_table() {
            return table_member(array, &name);
        }
        if let Some(e) = left.as_expr().filter(|_| left.is_module()) {
            // A module answers like a table keyed by strings.
            return self.associative_subscript(&e.right, right);
        }

        match left {
            Value::Str(bytes) | Value::Packed(bytes) => {
                if name == "length" {
                    return Ok(Value::number(bytes.len()));
                }
                let container = if matches!(left, Value::Str(_)) {
                    "string"
                } else {
                    "packed"
                };
                Err(no_such_member(container, name))
            }
            Value::Opaque(o) => match o.type_info.member {
                Some(member) => member(left, &name),
                None => Err(no_such_member(o.type_name(), name)),
            },
            _ => Err(type_error("unsupported type for member access")),
        }
    }
}

fn array_member(items: &Value, name: &str) -> Result<Value, EvalError> {
    match name {
        "length" => Ok(Value::number(BigInt::from(count(items)))),
        _ => Err(no_such_member("array", name)),
    }
}

fn table_member(array: &Value, name: &str) -> Result<Value, EvalError> {
    let keys = match name {
        "length" => return array_member(array.array_items().unwrap_or(&Value::EmptyList), name),
        "keys" => true,
        "values" => false,
        _ => return Err(no_such_member("table", name)),
    };

    let mut result = ListBuilder::new();
    for mapping in GenericIter::new(array)? {
        if let Some((key, value)) = mapping.as_mapping() {
            result.append(if keys { key.clone() } else { value.clone() });
        }
    }
    Ok(result.finish_array())
}
