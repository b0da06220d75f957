//! Operator evaluation for the vx expression language.
//!
//! The host parses source into [`Value`] trees and reduces them; whenever it
//! meets an operator it hands the already-evaluated operands to the
//! [`Evaluator`]:
//!
//! - [`Evaluator::evaluate_unary`] / [`Evaluator::evaluate_binary`]: apply
//!   one operator, consulting the dispatch registry first
//! - [`Reducer`]: the callbacks the evaluator needs from the host (running
//!   blocks, applying closures, resolving references, yielding in loops)
//! - [`Evaluator::settle`]: turn a top-level result into a value or a
//!   reportable error
//!
//! # Re-exports
//!
//! Value types come from `vx_value`, operators from `vx_ir`.

mod arith;
mod binary;
mod call;
mod config;
mod control;
mod evaluator;
mod member;
mod reducer;
mod relations;
mod repeat;
mod shared;
mod subscript;
mod unary;

#[cfg(test)]
mod tests;

use std::sync::Once;

pub use config::{
    EvalConfig, DEFAULT_MAX_INTEGER_BITS, DEFAULT_MAX_LIST_REPETITION, DEFAULT_MAX_REPEAT_LENGTH,
};
pub use evaluator::{Evaluator, EvaluatorBuilder};
pub use reducer::Reducer;
pub use shared::SharedMutableRegistry;

pub use vx_ir::{decreasing_op_precedence, op_precedence, Op, Precedence};
pub use vx_value::{
    BaseType, Builtin, ControlAction, Dispatch, DispatchRegistry, ErrorCategory, EvalError,
    EvalErrorKind, EvalResult, TypeInfo, TypeKey, Value,
};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=vx_eval=debug` or
/// `RUST_LOG=vx_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
