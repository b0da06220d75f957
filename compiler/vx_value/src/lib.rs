//! Runtime values for the vx expression language.
//!
//! This crate holds everything the evaluator needs that does not depend on
//! operator semantics:
//!
//! - [`Value`]: the immutable, cheaply clonable tagged union
//! - [`EvalError`] and [`ControlAction`]: the error taxonomy and the
//!   non-local exits (`return`, `break`, `continue`, user exceptions)
//! - [`Dispatch`] and [`DispatchRegistry`]: per-type operator overrides
//! - [`equal`] and [`equal_by`]: iterative structural equality
//! - [`GenericIter`]: the single-pass iteration protocol over containers
//! - [`list`]: flat list construction and traversal

mod dispatch;
mod equal;
mod errors;
mod iter;
pub mod list;
mod value;

pub use dispatch::{Dispatch, DispatchRegistry, TypeKey};
pub use equal::{equal, equal_by, OpaqueEq};
pub use errors::{ControlAction, ErrorCategory, EvalError, EvalErrorKind, EvalResult};
pub use iter::GenericIter;
pub use value::{
    BaseType, Builtin, ConstructFn, ExprNode, FunctionValue, Heap, MemberFn, OpaqueValue, PairCell,
    TypeInfo, TypeValue, Value, ValueKind,
};

// Re-export error constructors for use by the evaluator
pub use errors::{
    bigint_overflow, division_by_zero, excessive_factor, index_out_of_range, internal_error,
    malformed, mismatched_types, mixed_types, negative_exponent, negative_factor,
    no_such_key, no_such_member, non_numeric_factor, not_callable, operator_not_defined,
    type_error, unary_not_defined, unsupported_type, domain_error,
};

pub use num_bigint::BigInt;
