//! List repetition `(*)` and byte-string repetition `*`.
//!
//! Both are bounded by [`EvalConfig::max_repeat_length`](crate::EvalConfig)
//! before anything is allocated, and the byte buffer is reserved fallibly.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use vx_value::list::{count, ListBuilder};
use vx_value::{
    excessive_factor, negative_factor, non_numeric_factor, type_error, EvalError, Value,
};

use crate::Evaluator;

impl Evaluator {
    pub(crate) fn repeat_list(&self, list: &Value, factor: &Value) -> Result<Value, EvalError> {
        let n = match factor {
            Value::Bool(true) => return Ok(list.clone()),
            Value::Bool(false) => return Ok(Value::EmptyList),
            Value::Number(n) => n,
            _ => return Err(non_numeric_factor()),
        };

        if n.is_negative() {
            return Err(negative_factor("list"));
        }
        if n.is_zero() || list.is_empty_list() {
            return Ok(Value::EmptyList);
        }
        let factor = n
            .to_u64()
            .filter(|&factor| factor <= self.config.max_list_repetition)
            .ok_or_else(|| excessive_factor("list"))?;
        if factor == 1 {
            return Ok(list.clone());
        }
        self.check_repeat_length(count(list), factor, "list")?;

        let mut result = ListBuilder::new();
        for _ in 0..factor {
            result.append(list.clone());
        }
        Ok(result.finish())
    }

    /// `bytes * factor` for a `Str` or `Packed` left operand.
    pub(crate) fn repeat_bytes(
        &self,
        left: &Value,
        bytes: &[u8],
        factor: &Value,
    ) -> Result<Value, EvalError> {
        let n = match factor {
            Value::Bool(true) => return Ok(left.clone()),
            Value::Bool(false) => return Ok(left.rewrap_bytes(b"")),
            Value::Number(n) => n,
            _ => return Err(type_error("string/pack repetition requires int or bool")),
        };
        let factor = string_factor(n)?;
        if factor == 0 || bytes.is_empty() {
            return Ok(left.rewrap_bytes(b""));
        }
        let total = self.check_repeat_length(bytes.len(), factor, "string")?;

        let mut out = Vec::new();
        out.try_reserve_exact(total)
            .map_err(|_| excessive_factor("string"))?;
        for _ in 0..factor {
            out.extend_from_slice(bytes);
        }
        Ok(left.rewrap_bytes(out))
    }

    /// `len * factor`, or an "excessively large" error when it passes the
    /// configured ceiling.
    fn check_repeat_length(
        &self,
        len: usize,
        factor: u64,
        noun: &'static str,
    ) -> Result<usize, EvalError> {
        u64::try_from(len)
            .ok()
            .and_then(|len| len.checked_mul(factor))
            .filter(|&total| total <= self.config.max_repeat_length)
            .and_then(|total| usize::try_from(total).ok())
            .ok_or_else(|| excessive_factor(noun))
    }
}

fn string_factor(n: &BigInt) -> Result<u64, EvalError> {
    if n.is_negative() {
        return Err(negative_factor("string"));
    }
    n.to_u64().ok_or_else(|| excessive_factor("string"))
}

#[cfg(test)]
mod tests;
