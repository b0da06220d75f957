//! Structural equality.

use crate::errors::{mismatched_types, EvalError};
use crate::list::{first, rest};
use crate::value::{Heap, Value};

/// Host-supplied equality for two user values of the same type. `None`
/// falls back to payload identity.
pub type OpaqueEq<'a> = dyn Fn(&Value, &Value) -> Option<Result<bool, EvalError>> + 'a;

/// Structural equality. User values compare by payload identity.
pub fn equal(a: &Value, b: &Value) -> Result<bool, EvalError> {
    equal_by(a, b, &|_, _| None)
}

/// Structural equality, asking `opaque_eq` about every pair of user values
/// met at any depth.
///
/// Lists are compared element by element along both spines at once; the
/// walk is iterative, so list length does not consume stack. Lists of
/// different lengths end up comparing an element against `EmptyList`,
/// which is unequal rather than an error.
pub fn equal_by(a: &Value, b: &Value, opaque_eq: &OpaqueEq<'_>) -> Result<bool, EvalError> {
    let mut a = a;
    let mut b = b;

    loop {
        if let (Value::Pair(x), Value::Pair(y)) = (a, b) {
            if Heap::ptr_eq(x, y) {
                return Ok(true);
            }
        }

        if !equal_atoms(first(a), first(b), opaque_eq)? {
            return Ok(false);
        }

        if !a.is_pair() && !b.is_pair() {
            return Ok(true);
        }

        a = rest(a);
        b = rest(b);
    }
}

fn equal_atoms(a: &Value, b: &Value, opaque_eq: &OpaqueEq<'_>) -> Result<bool, EvalError> {
    if a.kind() != b.kind() {
        if a.is_empty_list() || b.is_empty_list() {
            return Ok(false);
        }
        return Err(mismatched_types("equality relation"));
    }

    Ok(match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Byte(x), Value::Byte(y)) => x == y,
        (Value::Str(x), Value::Str(y)) | (Value::Packed(x), Value::Packed(y)) => x == y,
        (Value::Function(x), Value::Function(y)) => Heap::ptr_eq(x, y),
        (Value::Builtin(x), Value::Builtin(y)) => x == y,
        (Value::Type(x), Value::Type(y)) => x == y,
        (Value::Opaque(x), Value::Opaque(y)) => {
            if x.type_name() != y.type_name() {
                return Err(mismatched_types("equality relation"));
            }
            match opaque_eq(a, b) {
                Some(result) => result?,
                None => Heap::ptr_eq(&x.payload, &y.payload),
            }
        }
        (Value::Expr(x), Value::Expr(y)) => {
            if Heap::ptr_eq(x, y) {
                return Ok(true);
            }
            if x.op != y.op {
                return Ok(false);
            }
            // Composite children nest; each level is a fresh spine walk.
            vx_stack::ensure_sufficient_stack(|| -> Result<bool, EvalError> {
                Ok(equal_by(&x.left, &y.left, opaque_eq)?
                    && equal_by(&x.right, &y.right, opaque_eq)?)
            })?
        }
        // Same kind, no payload: EmptyList, Nothing.
        _ => true,
    })
}
