//! Binary operators.
//!
//! [`Evaluator::calc`] handles everything that needs the host (control
//! keywords, calls, `map` and `reduce`); [`Evaluator::safe_calc`] is the pure remainder
//! and never calls back into the reducer.

use std::cmp::Ordering;

use vx_ir::Op;
use vx_value::list::make_list;
use vx_value::{
    malformed, mixed_types, operator_not_defined, type_error, ControlAction, EvalError,
    EvalResult, GenericIter, Value,
};

use crate::{Evaluator, Reducer};

impl Evaluator {
    pub(crate) fn calc(
        &self,
        host: &mut dyn Reducer,
        left: &Value,
        op: Op,
        right: &Value,
    ) -> EvalResult {
        if let Some(record) = self.record_for(left) {
            if let Some(result) = record.binary(op, left, right) {
                tracing::trace!(%op, "binary dispatch hit");
                return result;
            }
        }

        match op {
            Op::If => self.calc_if(host, left),
            Op::While => self.calc_while(host, left),
            Op::Do => self.calc_do(host, left),
            Op::Break => Err(ControlAction::Break),
            Op::Continue => Err(ControlAction::Continue),
            Op::Try => self.calc_try(host, left),
            Op::Function | Op::NamedUnary => self.call_function(host, left, right),
            Op::Map => self.map(host, left, right),
            Op::Reduce => self.reduce(host, left, right),
            _ => Ok(self.safe_calc(left, op, right)?),
        }
    }

    pub(crate) fn safe_calc(&self, left: &Value, op: Op, right: &Value) -> Result<Value, EvalError> {
        match op {
            Op::Lambda => return Ok(Value::function(left.clone(), right.clone())),
            Op::Member => return self.calc_member(left, right),
            Op::Gamut | Op::Delta => {
                self.compare(left, right)?;
                return Ok(Value::range(left.clone(), op, right.clone()));
            }
            Op::In => return Ok(Value::Bool(self.contains(left, right)?)),
            Op::Isa => return Ok(Value::Bool(self.isa(left, right)?)),
            Op::Equal => return Ok(Value::Bool(self.values_equal(left, right)?)),
            Op::Unequal => return Ok(Value::Bool(!self.values_equal(left, right)?)),
            Op::Lt => return Ok(Value::Bool(self.compare(left, right)?.is_lt())),
            Op::Lte => return Ok(Value::Bool(self.compare(left, right)?.is_le())),
            Op::Gt => return Ok(Value::Bool(self.compare(left, right)?.is_gt())),
            Op::Gte => return Ok(Value::Bool(self.compare(left, right)?.is_ge())),
            Op::Cmp => {
                let n = match self.compare(left, right)? {
                    Ordering::Less => -1,
                    Ordering::Equal => 0,
                    Ordering::Greater => 1,
                };
                return Ok(Value::number(n));
            }
            Op::List => return Ok(make_list(left, right)),
            Op::Mapping => {
                if !left.is_single() || left.is_empty_list() {
                    return Err(malformed("mapping keys must be singular and non-null"));
                }
                if !right.is_single() {
                    return Err(malformed("mapping values must be singular"));
                }
            }
            _ => {}
        }

        if op.is_deferred() {
            return Ok(Value::expr(left.clone(), op, right.clone()));
        }

        if left.is_type() {
            match op {
                // T[], A | B, A & B, K ^ V
                Op::Subscript if right.is_empty_list() => {
                    return Ok(Value::expr(left.clone(), op, right.clone()));
                }
                Op::Union | Op::Intersection | Op::Empower if right.is_type() => {
                    return Ok(Value::expr(left.clone(), op, right.clone()));
                }
                Op::Empower if right.array_items().is_some() => return self.make_table(left, right),
                _ => {}
            }
        }

        match op {
            Op::Repeat => return self.repeat_list(left, right),
            Op::BindArgs if left.is_functional() => {
                return Ok(Value::bound_function(left.clone(), right.clone()));
            }
            Op::Subscript => return self.subscript(left, right),
            _ => {}
        }

        if left.kind() == right.kind() {
            return match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::number(self.calc_integers(a, op, b)?)),
                (Value::Bool(_), _) => Err(operator_not_defined("boolean values")),
                _ => Err(operator_not_defined(left.type_name())),
            };
        }

        if op == Op::Multiply {
            if let Some(bytes) = left.as_bytes() {
                return self.repeat_bytes(left, bytes, right);
            }
        }

        Err(mixed_types())
    }

    /// `key_type ^ [mappings...]`.
    fn make_table(&self, key_type: &Value, array: &Value) -> Result<Value, EvalError> {
        for element in GenericIter::new(array)? {
            let Some((key, _)) = element.as_mapping() else {
                return Err(type_error(format!(
                    "table elements must be mappings, not {}",
                    element.type_name()
                )));
            };
            if !self.isa(key, key_type)? {
                return Err(type_error(format!("table key {key} is not a {key_type}")));
            }
        }
        Ok(Value::table(key_type.clone(), array.clone()))
    }
}
