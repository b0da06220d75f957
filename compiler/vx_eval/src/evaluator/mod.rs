//! The evaluator handle and its entry points.
//!
//! `Evaluator` holds only configuration and the dispatch registry; all
//! evaluation state (bindings, the body being reduced) lives in the host's
//! [`Reducer`]. The operator rules themselves are split across
//! `impl Evaluator` blocks in the sibling modules:
//!
//! - `unary`: `calc_unary`
//! - `binary`: `calc` and `safe_calc`
//! - `relations`: `compare`, `in`, `isa` and equality
//! - `member`, `subscript`, `repeat`, `arith`
//! - `control`: `if`, loops, `try`, `map`
//! - `call`: function calls, builtins and type construction

mod builder;

use std::sync::Arc;

use vx_ir::Op;
use vx_value::{
    internal_error, ControlAction, Dispatch, DispatchRegistry, EvalError, EvalResult, TypeKey,
    Value,
};

use crate::{EvalConfig, Reducer, SharedMutableRegistry};

pub use builder::EvaluatorBuilder;

/// Operator evaluation engine.
#[derive(Clone, Debug)]
pub struct Evaluator {
    pub(crate) registry: SharedMutableRegistry<DispatchRegistry>,
    pub(crate) config: EvalConfig,
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::builder().build()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator::default()
    }

    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn registry(&self) -> &SharedMutableRegistry<DispatchRegistry> {
        &self.registry
    }

    /// Register a dispatch record; takes effect for subsequent evaluations.
    pub fn register(&self, key: TypeKey, record: impl Dispatch + 'static) {
        self.registry.write().register(key, record);
    }

    /// Apply a unary operator.
    #[tracing::instrument(level = "trace", skip_all, fields(%op))]
    pub fn evaluate_unary(&self, host: &mut dyn Reducer, op: Op, operand: &Value) -> EvalResult {
        vx_stack::ensure_sufficient_stack(|| self.calc_unary(host, op, operand))
    }

    /// Apply a binary operator (or a control keyword, whose operand is `left`).
    #[tracing::instrument(level = "trace", skip_all, fields(%op))]
    pub fn evaluate_binary(
        &self,
        host: &mut dyn Reducer,
        left: &Value,
        op: Op,
        right: &Value,
    ) -> EvalResult {
        vx_stack::ensure_sufficient_stack(|| self.calc(host, left, op, right))
    }

    /// Final result of a top-level evaluation: signals that escaped every
    /// construct become errors.
    pub fn settle(result: EvalResult) -> Result<Value, EvalError> {
        result.map_err(|action| {
            let err = action.into_eval_error();
            tracing::debug!(error = %err, "evaluation failed");
            err
        })
    }

    /// Dispatch record for `v`'s type. The lock is released on return.
    pub(crate) fn record_for(&self, v: &Value) -> Option<Arc<dyn Dispatch>> {
        self.registry.read().lookup(v)
    }

    /// Run a block value with no argument.
    pub(crate) fn do_block(&self, host: &mut dyn Reducer, block: &Value) -> EvalResult {
        match block.as_expr() {
            Some(e) if e.is(Op::Invocation) => {
                vx_stack::ensure_sufficient_stack(|| host.invoke_block(self, &e.left, &e.right))
            }
            _ => Err(internal_error("not a block invocation").into()),
        }
    }
}

/// A boolean control value, or a type error naming the construct.
pub(crate) fn truth(v: &Value, construct: &str) -> Result<bool, ControlAction> {
    match v {
        Value::Bool(b) => Ok(*b),
        other => Err(vx_value::type_error(format!(
            "{construct} condition must be a boolean, not {}",
            other.type_name()
        ))
        .into()),
    }
}
