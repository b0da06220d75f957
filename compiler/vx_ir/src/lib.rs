//! Operator vocabulary for the vx expression language.
//!
//! The parser and the evaluator agree on a single operator enum, [`Op`].
//! Binary applications, unary applications and the composite values that
//! reuse the expression node (arrays, ranges, tables, mappings, blocks)
//! are all tagged with an `Op`.
//!
//! - [`OpFlags`]: static per-operator classification
//! - [`Precedence`]: binding-strength levels consumed by the parser

mod op;
mod precedence;

pub use op::{Op, OpFlags};
pub use precedence::{decreasing_op_precedence, is_right_associative, op_precedence, Precedence};
