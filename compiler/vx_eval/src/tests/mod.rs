//! Tests that drive the evaluator through a [`Reducer`].
//!
//! [`TestHost`] stands in for a real interpreter: a block or closure body
//! is a number indexing a table of Rust closures, so tests can script what
//! each body does (including raising signals) without a parser.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

mod binary_tests;
mod call_tests;

use std::rc::Rc;

use num_traits::ToPrimitive;

use crate::{ControlAction, EvalResult, Evaluator, Reducer, Value};

type Body = Rc<dyn Fn(&Evaluator, &mut TestHost, &Value) -> EvalResult>;

#[derive(Default)]
pub(crate) struct TestHost {
    bodies: Vec<Body>,
    references: Vec<(Value, Value)>,
    /// Number of `periodic_yield` calls so far.
    pub(crate) yields: usize,
    /// Ask loops to stop on this yield.
    pub(crate) stop_at_yield: Option<usize>,
}

impl TestHost {
    pub(crate) fn new() -> Self {
        TestHost::default()
    }

    fn body(&mut self, f: impl Fn(&Evaluator, &mut TestHost, &Value) -> EvalResult + 'static) -> Value {
        self.bodies.push(Rc::new(f));
        Value::number(self.bodies.len() - 1)
    }

    /// A block whose body runs `f` (the argument is `EmptyList` when invoked).
    pub(crate) fn block(
        &mut self,
        f: impl Fn(&Evaluator, &mut TestHost, &Value) -> EvalResult + 'static,
    ) -> Value {
        let body = self.body(f);
        Value::block(Value::EmptyList, body)
    }

    /// A block that always evaluates to `v`.
    pub(crate) fn constant(&mut self, v: Value) -> Value {
        self.block(move |_, _, _| Ok(v.clone()))
    }

    /// A closure whose body runs `f` on the argument.
    pub(crate) fn closure(
        &mut self,
        f: impl Fn(&Evaluator, &mut TestHost, &Value) -> EvalResult + 'static,
    ) -> Value {
        let body = self.body(f);
        Value::function(Value::EmptyList, body)
    }

    pub(crate) fn bind_reference(&mut self, target: Value, value: Value) {
        self.references.push((target, value));
    }

    fn run(&mut self, ev: &Evaluator, body: &Value, argument: &Value) -> EvalResult {
        let f = body
            .as_number()
            .and_then(ToPrimitive::to_usize)
            .and_then(|i| self.bodies.get(i))
            .cloned();
        match f {
            Some(f) => f(ev, self, argument),
            None => panic!("unknown test body {body}"),
        }
    }
}

impl Reducer for TestHost {
    fn invoke_block(&mut self, ev: &Evaluator, _invoker: &Value, body: &Value) -> EvalResult {
        self.run(ev, body, &Value::EmptyList)
    }

    fn apply(&mut self, ev: &Evaluator, callee: &Value, argument: &Value) -> EvalResult {
        let body = match callee {
            Value::Function(f) => f.body.clone(),
            _ => match callee.as_expr() {
                Some(e) => e.right.clone(),
                None => panic!("cannot apply {callee}"),
            },
        };
        self.run(ev, &body, argument)
    }

    fn resolve_reference(&mut self, target: &Value) -> Option<Value> {
        self.references
            .iter()
            .find(|(t, _)| t == target)
            .map(|(_, v)| v.clone())
    }

    fn periodic_yield(&mut self) -> Result<(), ControlAction> {
        self.yields += 1;
        if self.stop_at_yield == Some(self.yields) {
            return Err(ControlAction::Break);
        }
        Ok(())
    }
}

/// Evaluate `left op right` with a fresh evaluator and no scripted bodies.
pub(crate) fn binary(left: &Value, op: crate::Op, right: &Value) -> EvalResult {
    Evaluator::new().evaluate_binary(&mut TestHost::new(), left, op, right)
}

pub(crate) fn unary(op: crate::Op, operand: &Value) -> EvalResult {
    Evaluator::new().evaluate_unary(&mut TestHost::new(), op, operand)
}

/// The message of an error result.
pub(crate) fn message(result: EvalResult) -> String {
    match Evaluator::settle(result) {
        Ok(v) => panic!("expected an error, got {v}"),
        Err(e) => e.to_string(),
    }
}

pub(crate) fn ints(ns: &[i64]) -> Value {
    Value::array(ns.iter().map(|&n| Value::number(n)))
}
