//! The host-side half of evaluation.

use vx_value::{ControlAction, EvalResult, Value};

use crate::Evaluator;

/// Evaluates what the operator core treats as opaque: block bodies,
/// closure bodies and reference targets.
///
/// Implementations call back into the [`Evaluator`] for every operator
/// they meet while reducing a body.
pub trait Reducer {
    /// Run a block body with no argument (`if` branches, loop bodies and
    /// conditions, `try`).
    fn invoke_block(&mut self, ev: &Evaluator, invoker: &Value, body: &Value) -> EvalResult;

    /// Apply a closure or block to an argument. A `return` inside a closure
    /// surfaces here as `ControlAction::Return`; the evaluator catches it.
    fn apply(&mut self, ev: &Evaluator, callee: &Value, argument: &Value) -> EvalResult;

    /// Current value behind a reference, or `None` if undefined.
    fn resolve_reference(&mut self, _target: &Value) -> Option<Value> {
        None
    }

    /// Called once per loop iteration. `Err(ControlAction::Break)` ends the
    /// loop; any other error aborts the evaluation.
    fn periodic_yield(&mut self) -> Result<(), ControlAction> {
        Ok(())
    }
}
