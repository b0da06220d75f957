//! Conditionals, loops, `try`, `map` and `reduce`.
//!
//! Loops observe `break` and `continue` coming back from the reducer as
//! [`ControlAction`]s; `try` observes `Raise`. Everything else passes
//! through untouched.

use vx_ir::Op;
use vx_value::list::{make_list, ListBuilder};
use vx_value::{malformed, type_error, ControlAction, EvalResult, ExprNode, GenericIter, Value};

use crate::evaluator::truth;
use crate::{Evaluator, Reducer};

/// What a loop does after one run of its body.
enum Step {
    Next(Value),
    Exit,
}

fn body_step(result: EvalResult) -> Result<Step, ControlAction> {
    match result {
        Ok(v) => Ok(Step::Next(v)),
        Err(ControlAction::Break) => {
            tracing::debug!("break caught by loop");
            Ok(Step::Exit)
        }
        Err(ControlAction::Continue) => {
            tracing::debug!("continue caught by loop");
            Ok(Step::Next(Value::Nothing))
        }
        Err(other) => Err(other),
    }
}

/// `false` when the host asked the loop to stop.
fn keep_going(host: &mut dyn Reducer) -> Result<bool, ControlAction> {
    match host.periodic_yield() {
        Ok(()) => Ok(true),
        Err(ControlAction::Break) => Ok(false),
        Err(other) => Err(other),
    }
}

fn expr_of(v: &Value, op: Op) -> Option<&ExprNode> {
    v.as_expr().filter(|e| e.is(op))
}

impl Evaluator {
    /// `if cond then {a}` / `if cond then {a} else {b}`.
    pub(crate) fn calc_if(&self, host: &mut dyn Reducer, then: &Value) -> EvalResult {
        let expr = expr_of(then, Op::Then).ok_or_else(|| malformed("`if` requires `then`"))?;

        let (affirm, negate) = if expr.right.is_block() {
            (&expr.right, None)
        } else if let Some(branches) = expr_of(&expr.right, Op::Else) {
            if !branches.left.is_block() || !branches.right.is_block() {
                return Err(malformed("`if ... then ... else` requires blocks").into());
            }
            (&branches.left, Some(&branches.right))
        } else {
            return Err(malformed("`if ... then` requires a block").into());
        };

        if truth(&expr.left, "`if`")? {
            self.do_block(host, affirm)
        } else if let Some(negate) = negate {
            self.do_block(host, negate)
        } else {
            Ok(Value::EmptyList)
        }
    }

    /// `while {cond} do {body}`.
    pub(crate) fn calc_while(&self, host: &mut dyn Reducer, operand: &Value) -> EvalResult {
        let expr = expr_of(operand, Op::WhileDo).ok_or_else(|| malformed("`while` requires `do`"))?;
        if !expr.left.is_block() || !expr.right.is_block() {
            return Err(malformed("`while ... do` requires a block").into());
        }

        let mut result = Value::Nothing;
        let mut iterations = 0u64;
        while truth(&self.do_block(host, &expr.left)?, "`while`")? {
            if !keep_going(host)? {
                return Ok(Value::Nothing);
            }
            match body_step(self.do_block(host, &expr.right))? {
                Step::Next(v) => result = v,
                Step::Exit => return Ok(Value::Nothing),
            }
            iterations += 1;
        }
        tracing::debug!(iterations, "while loop finished");
        Ok(result)
    }

    /// `do {body}` or `do {body} while {cond}`.
    pub(crate) fn calc_do(&self, host: &mut dyn Reducer, operand: &Value) -> EvalResult {
        if operand.is_block() {
            return self.do_block(host, operand);
        }
        let expr = expr_of(operand, Op::DoWhile).ok_or_else(|| malformed("`do` requires a block"))?;
        if !expr.left.is_block() || !expr.right.is_block() {
            return Err(malformed("`do ... while` requires blocks").into());
        }

        let mut iterations = 0u64;
        let result = loop {
            if !keep_going(host)? {
                return Ok(Value::Nothing);
            }
            let value = match body_step(self.do_block(host, &expr.left))? {
                Step::Next(v) => v,
                Step::Exit => return Ok(Value::Nothing),
            };
            iterations += 1;
            if !truth(&self.do_block(host, &expr.right)?, "`do ... while`")? {
                break value;
            }
        };
        tracing::debug!(iterations, "do loop finished");
        Ok(result)
    }

    /// `try {attempt} catch {handler}`: only raised values are caught.
    pub(crate) fn calc_try(&self, host: &mut dyn Reducer, operand: &Value) -> EvalResult {
        let expr = expr_of(operand, Op::Catch).ok_or_else(|| malformed("`try` requires catch"))?;
        if !expr.left.is_block() {
            return Err(malformed("`try` requires a block").into());
        }
        if !expr.right.is_block() {
            return Err(malformed("`catch` requires a block").into());
        }

        match self.do_block(host, &expr.left) {
            Err(ControlAction::Raise(thrown)) => {
                tracing::debug!(%thrown, "exception caught");
                self.call_function(host, &expr.right, &thrown)
            }
            other => other,
        }
    }

    /// `container map f`: an array of `f(x)` for each element.
    pub(crate) fn map(&self, host: &mut dyn Reducer, container: &Value, f: &Value) -> EvalResult {
        if !f.is_functional() {
            return Err(type_error("map requires a function").into());
        }

        let mut result = ListBuilder::new();
        for x in GenericIter::new(container)? {
            result.append(self.call_function(host, f, &x)?);
        }
        Ok(result.finish_array())
    }

    /// `container reduce f`: folds left, calling `f((acc, x))` with the
    /// running result and each later element. The first element seeds the
    /// fold; an empty container reduces to the empty list.
    pub(crate) fn reduce(&self, host: &mut dyn Reducer, container: &Value, f: &Value) -> EvalResult {
        if !f.is_functional() {
            return Err(type_error("reduce requires a function").into());
        }

        let mut items = GenericIter::new(container)?;
        let Some(mut acc) = items.next() else {
            return Ok(Value::EmptyList);
        };
        for x in items {
            acc = self.call_function(host, f, &make_list(&acc, &x))?;
        }
        Ok(acc)
    }
}
