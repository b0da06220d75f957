//! Function calls: closures, blocks, builtins and type construction.

use std::borrow::Cow;
use std::fmt::Write as _;

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use vx_value::list::{first, make_list, rest};
use vx_value::{
    domain_error, not_callable, type_error, BaseType, Builtin, ControlAction, EvalError,
    EvalResult, TypeValue, Value,
};

use crate::relations::type_of;
use crate::{Evaluator, Reducer};

impl Evaluator {
    /// `f(argument)`. A `return` escaping a closure body ends the call.
    ///
    /// Bound functions prepend their bound arguments, innermost binding
    /// first, before the underlying callee sees the call.
    pub(crate) fn call_function(
        &self,
        host: &mut dyn Reducer,
        f: &Value,
        argument: &Value,
    ) -> EvalResult {
        let mut f = f;
        let mut argument = Cow::Borrowed(argument);
        while let Some((callee, bound)) = f.as_bound_function() {
            argument = Cow::Owned(make_list(bound, &argument));
            f = callee;
        }
        let argument: &Value = &argument;

        match f {
            Value::Function(_) => {
                match vx_stack::ensure_sufficient_stack(|| host.apply(self, f, argument)) {
                    Err(ControlAction::Return(v)) => {
                        tracing::debug!("return caught at call boundary");
                        Ok(v)
                    }
                    other => other,
                }
            }
            _ if f.is_block() => vx_stack::ensure_sufficient_stack(|| host.apply(self, f, argument)),
            Value::Builtin(builtin) => Ok(call_builtin(*builtin, argument)?),
            Value::Type(ty) => Ok(construct(ty, argument)?),
            _ => Err(not_callable(f.type_name()).into()),
        }
    }
}

pub(crate) fn call_builtin(builtin: Builtin, arg: &Value) -> Result<Value, EvalError> {
    match builtin {
        Builtin::Abs => match arg {
            Value::Number(n) => Ok(Value::number(n.abs())),
            _ => Err(type_error("invalid argument to abs()")),
        },
        Builtin::Bool => Ok(Value::Bool(truthy(arg))),
        Builtin::Half => match arg {
            Value::Number(n) => Ok(Value::number(&**n / 2)),
            _ => Err(type_error("invalid argument to half()")),
        },
        Builtin::Hex => match arg {
            Value::Number(n) => {
                let digits = n.magnitude().to_str_radix(16);
                let sign = if n.is_negative() { "-" } else { "" };
                Ok(Value::string(format!("{sign}{digits}")))
            }
            Value::Str(bytes) | Value::Packed(bytes) => Ok(Value::string(hex_bytes(bytes))),
            _ => Err(type_error("invalid argument to hex()")),
        },
        Builtin::Str => Ok(Value::string(arg.to_text())),
        Builtin::Join => join(arg),
        Builtin::Typeof => type_of(arg),
    }
}

fn truthy(v: &Value) -> bool {
    match v {
        Value::EmptyList | Value::Nothing => false,
        Value::Bool(b) => *b,
        Value::Number(n) => !n.is_zero(),
        Value::Str(bytes) | Value::Packed(bytes) => !bytes.is_empty(),
        _ => true,
    }
}

fn hex_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// `join(glue, pieces...)`.
fn join(args: &Value) -> Result<Value, EvalError> {
    let Value::Str(glue) = first(args) else {
        return Err(type_error("join glue must be a string"));
    };
    let mut out = Vec::new();
    for (i, piece) in vx_value::list::elements(rest(args)).enumerate() {
        if i > 0 {
            out.extend_from_slice(glue);
        }
        match &piece {
            Value::Str(bytes) | Value::Packed(bytes) => out.extend_from_slice(bytes),
            other => out.extend_from_slice(other.to_text().as_bytes()),
        }
    }
    Ok(Value::string(out))
}

/// Calling a type converts its argument.
fn construct(ty: &TypeValue, arg: &Value) -> Result<Value, EvalError> {
    let base = match ty {
        TypeValue::Base(base) => *base,
        TypeValue::Named(info) => {
            return match info.construct {
                Some(construct) => construct(arg),
                None => Err(not_callable(info.name.clone())),
            };
        }
    };

    let converted = match (base, arg) {
        (_, v) if base.accepts(v) => Some(v.clone()),
        (BaseType::Integer, Value::Bool(b)) => Some(Value::number(u8::from(*b))),
        (BaseType::Integer, Value::Byte(b)) => Some(Value::number(*b)),
        (BaseType::Integer, Value::Str(s)) => Some(parse_integer(s)?),
        (BaseType::Boolean, v) => Some(Value::Bool(truthy(v))),
        (BaseType::String, v) => Some(Value::string(v.to_text())),
        (BaseType::Packed, Value::Str(s)) => Some(Value::packed(&**s)),
        (BaseType::Packed, Value::Byte(b)) => Some(Value::packed([*b])),
        (BaseType::Packed, Value::EmptyList) => Some(Value::packed(b"")),
        (BaseType::Byte, Value::Number(n)) => match n.to_u8() {
            Some(b) => Some(Value::Byte(b)),
            None => return Err(domain_error(format!("byte value {} out of range", &**n))),
        },
        (BaseType::Byte, Value::Str(s)) if s.len() == 1 => Some(Value::Byte(s[0])),
        _ => None,
    };

    converted.ok_or_else(|| {
        type_error(format!(
            "cannot convert {} to {}",
            arg.type_name(),
            base.name()
        ))
    })
}

fn parse_integer(text: &[u8]) -> Result<Value, EvalError> {
    BigInt::parse_bytes(text, 10)
        .map(Value::number)
        .ok_or_else(|| type_error(format!("invalid integer literal \"{}\"", text.escape_ascii())))
}
