//! Unary operators.

use vx_ir::Op;
use vx_value::list::{make_array, reverse_list, ListBuilder};
use vx_value::{
    internal_error, malformed, unary_not_defined, ControlAction, EvalResult, GenericIter, Value,
};

use crate::{Evaluator, Reducer};

impl Evaluator {
    pub(crate) fn calc_unary(&self, host: &mut dyn Reducer, op: Op, v: &Value) -> EvalResult {
        if let Some(record) = self.record_for(v) {
            if let Some(result) = record.unary(op, v) {
                tracing::trace!(%op, "unary dispatch hit");
                return result;
            }
        }

        match op {
            // Keywords in prefix position take their operand on the left.
            Op::If | Op::While | Op::Do | Op::Try | Op::Break | Op::Continue => {
                return self.calc(host, v, op, &Value::EmptyList);
            }
            Op::Lambda => return Ok(Value::function(Value::EmptyList, v.clone())),
            Op::Array => return Ok(make_array(v.clone())),
            Op::Block => return Ok(Value::block(Value::EmptyList, v.clone())),
            Op::Count => {
                let n = GenericIter::new(v)?.remaining();
                return Ok(Value::number(n));
            }
            Op::Deref => return self.generic_deref(host, v),
            Op::Return => return Err(ControlAction::Return(v.clone())),
            Op::Throw => return Err(ControlAction::Raise(v.clone())),
            _ => {}
        }

        if let Value::Expr(e) = v {
            return match e.op {
                Op::Array => {
                    if op == Op::UnaryMinus {
                        Ok(make_array(reverse_list(&e.right)))
                    } else {
                        Err(unary_not_defined("arrays").into())
                    }
                }
                Op::Empower if v.is_table() => {
                    if op == Op::UnaryMinus {
                        let items = e.right.array_items().unwrap_or(&Value::EmptyList);
                        let reversed = make_array(reverse_list(items));
                        Ok(Value::table(e.left.clone(), reversed))
                    } else {
                        Err(unary_not_defined("tables").into())
                    }
                }
                Op::Gamut | Op::Delta => {
                    if op == Op::UnaryMinus {
                        let items = self.generic_deref(host, v)?;
                        Ok(make_array(reverse_list(&items)))
                    } else {
                        Err(unary_not_defined("ranges").into())
                    }
                }
                Op::Invocation | Op::Mapping | Op::Module | Op::Refer => {
                    Err(unary_not_defined(v.type_name()).into())
                }
                _ if v.is_type() => Err(unary_not_defined("types").into()),
                other => Err(internal_error(format!(
                    "unary operator not defined for `{other}` expressions"
                ))
                .into()),
            };
        }

        match (op, v) {
            (Op::UnaryPlus, Value::Number(_)) => Ok(v.clone()),
            (Op::UnaryMinus, Value::Number(n)) => Ok(Value::number(-&**n)),
            // The empty array reversed.
            (Op::UnaryMinus, Value::EmptyList) => Ok(Value::EmptyList),
            (Op::Const | Op::Var, _) => Err(malformed("const/var operand not a symbol").into()),
            _ => Err(unary_not_defined(v.type_name()).into()),
        }
    }

    /// Unary `*`: flatten a container into a list.
    pub(crate) fn generic_deref(&self, host: &mut dyn Reducer, v: &Value) -> EvalResult {
        if v.is_type() {
            return Ok(Value::unary_expr(Op::Deref, v.clone()));
        }

        if let Value::Expr(e) = v {
            match e.op {
                Op::Array => return Ok(e.right.clone()),
                Op::Empower if v.is_table() => return self.generic_deref(host, &e.right),
                Op::Refer => {
                    return host.resolve_reference(&e.right).ok_or_else(|| {
                        vx_value::type_error("undefined value in dereference").into()
                    });
                }
                _ => {}
            }
        }

        let mut result = ListBuilder::new();
        for item in GenericIter::new(v)? {
            result.append(item);
        }
        Ok(result.finish())
    }
}
