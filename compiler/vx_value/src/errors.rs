//! Evaluation errors and control-transfer signals.
//!
//! Every evaluation step returns [`EvalResult`]. The error side is a
//! [`ControlAction`]: either a real error, or one of the non-local exits
//! (`return`, `break`, `continue`, a raised user exception) travelling up
//! to the construct that intercepts it. Signals that reach the top of an
//! evaluation unmatched are turned into errors by
//! [`ControlAction::into_eval_error`].
//!
//! Factory functions (e.g. [`division_by_zero`]) are the construction path
//! used by the evaluator; they are `#[cold]` since errors are rare.

use crate::value::Value;
use std::fmt;

/// Result of evaluation.
pub type EvalResult = Result<Value, ControlAction>;

/// Error category surfaced to the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Operator or member not defined for the operand types.
    Type,
    /// Malformed construct: `if` without `then`, non-block branch, bad mapping.
    Syntax,
    /// Numeric domain violation: zero divisor, bad factor, overflow.
    Domain,
    /// A core invariant was violated.
    Internal,
    /// A control signal escaped every construct that could intercept it.
    Uncaught,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorCategory::Type => "type error",
            ErrorCategory::Syntax => "syntax error",
            ErrorCategory::Domain => "domain error",
            ErrorCategory::Internal => "internal error",
            ErrorCategory::Uncaught => "uncaught signal",
        })
    }
}

/// Structured error kind.
///
/// The `Display` output is the user-visible message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Domain
    #[error("division by zero")]
    DivisionByZero,
    #[error("bigint overflow")]
    BigintOverflow,
    #[error("negative exponent")]
    NegativeExponent,
    #[error("negative {}", negative_factor_noun(.what))]
    NegativeFactor { what: &'static str },
    #[error("excessively large {what} multiplier")]
    ExcessiveFactor { what: &'static str },
    #[error("index {index} out of range")]
    IndexOutOfRange { index: String },

    // Type
    #[error("non-numeric list repetition factor")]
    NonNumericFactor,
    #[error("mismatched types in {context}")]
    MismatchedTypes { context: &'static str },
    #[error("unsupported type in {context}")]
    UnsupportedType { context: &'static str },
    #[error("unary operator not defined for {type_name}")]
    UnaryNotDefined { type_name: String },
    #[error("operator not defined for {type_name}")]
    OperatorNotDefined { type_name: String },
    #[error("operator not defined on mixed types")]
    MixedTypes,
    #[error("cannot call {type_name}")]
    NotCallable { type_name: String },
    #[error("nonexistent {container} member `{name}`")]
    NoSuchMember { container: String, name: String },
    #[error("key not found: {key}")]
    NoSuchKey { key: String },

    // Syntax
    #[error("{message}")]
    Malformed { message: String },

    // Internal
    #[error("internal error: {message}")]
    Internal { message: String },

    // Escaped signals
    #[error("`break` outside of a loop")]
    StrayBreak,
    #[error("`continue` outside of a loop")]
    StrayContinue,
    #[error("`return` outside of a function")]
    StrayReturn,
    #[error("uncaught exception: {value}")]
    UncaughtException { value: String },

    /// Free-form message with an explicit category.
    #[error("{message}")]
    Custom {
        category: ErrorCategory,
        message: String,
    },
}

impl EvalErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DivisionByZero
            | Self::BigintOverflow
            | Self::NegativeExponent
            | Self::NegativeFactor { .. }
            | Self::ExcessiveFactor { .. }
            | Self::IndexOutOfRange { .. } => ErrorCategory::Domain,

            Self::NonNumericFactor
            | Self::MismatchedTypes { .. }
            | Self::UnsupportedType { .. }
            | Self::UnaryNotDefined { .. }
            | Self::OperatorNotDefined { .. }
            | Self::MixedTypes
            | Self::NotCallable { .. }
            | Self::NoSuchMember { .. }
            | Self::NoSuchKey { .. } => ErrorCategory::Type,

            Self::Malformed { .. } => ErrorCategory::Syntax,
            Self::Internal { .. } => ErrorCategory::Internal,

            Self::StrayBreak
            | Self::StrayContinue
            | Self::StrayReturn
            | Self::UncaughtException { .. } => ErrorCategory::Uncaught,

            Self::Custom { category, .. } => *category,
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// The thrown value, for exceptions that escaped every `try`.
    pub payload: Option<Value>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            payload: None,
        }
    }

    /// Create an error with an explicit category and message.
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            category,
            message: message.into(),
        })
    }

    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

/// Non-local exits and errors, propagated with `?`.
///
/// `Return` is intercepted at a closure-call boundary, `Break` and
/// `Continue` by the nearest loop, `Raise` by `try`. `Error` is only
/// intercepted by the host.
#[derive(Clone, Debug)]
pub enum ControlAction {
    Error(Box<EvalError>),
    Return(Value),
    Break,
    Continue,
    Raise(Value),
}

impl ControlAction {
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, ControlAction::Error(_))
    }

    /// Convert an action that reached the top of an evaluation into an error.
    #[cold]
    pub fn into_eval_error(self) -> EvalError {
        match self {
            ControlAction::Error(e) => *e,
            ControlAction::Return(_) => EvalError::from_kind(EvalErrorKind::StrayReturn),
            ControlAction::Break => EvalError::from_kind(EvalErrorKind::StrayBreak),
            ControlAction::Continue => EvalError::from_kind(EvalErrorKind::StrayContinue),
            ControlAction::Raise(value) => EvalError {
                kind: EvalErrorKind::UncaughtException {
                    value: value.to_string(),
                },
                payload: Some(value),
            },
        }
    }
}

impl From<EvalError> for ControlAction {
    #[inline]
    fn from(err: EvalError) -> Self {
        ControlAction::Error(Box::new(err))
    }
}

// Domain errors

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

/// An integer result exceeded the configured size limit.
#[cold]
pub fn bigint_overflow() -> EvalError {
    EvalError::from_kind(EvalErrorKind::BigintOverflow)
}

#[cold]
pub fn negative_exponent() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NegativeExponent)
}

fn negative_factor_noun(what: &str) -> &'static str {
    if what == "list" {
        "list repetition factor"
    } else {
        "string multiplier"
    }
}

/// `what` is `"list"` or `"string"`.
#[cold]
pub fn negative_factor(what: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NegativeFactor { what })
}

#[cold]
pub fn excessive_factor(what: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ExcessiveFactor { what })
}

#[cold]
pub fn index_out_of_range(index: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange {
        index: index.to_string(),
    })
}

#[cold]
pub fn domain_error(message: impl Into<String>) -> EvalError {
    EvalError::new(ErrorCategory::Domain, message)
}

// Type errors

#[cold]
pub fn non_numeric_factor() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonNumericFactor)
}

/// `context` names the relation, e.g. `"compare()"`.
#[cold]
pub fn mismatched_types(context: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MismatchedTypes { context })
}

#[cold]
pub fn unsupported_type(context: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedType { context })
}

#[cold]
pub fn unary_not_defined(type_name: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnaryNotDefined {
        type_name: type_name.into(),
    })
}

#[cold]
pub fn operator_not_defined(type_name: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OperatorNotDefined {
        type_name: type_name.into(),
    })
}

#[cold]
pub fn mixed_types() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MixedTypes)
}

#[cold]
pub fn not_callable(type_name: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.into(),
    })
}

#[cold]
pub fn no_such_member(container: impl Into<String>, name: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSuchMember {
        container: container.into(),
        name: name.into(),
    })
}

#[cold]
pub fn no_such_key(key: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSuchKey {
        key: key.to_string(),
    })
}

#[cold]
pub fn type_error(message: impl Into<String>) -> EvalError {
    EvalError::new(ErrorCategory::Type, message)
}

// Syntax and internal errors

#[cold]
pub fn malformed(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Malformed {
        message: message.into(),
    })
}

#[cold]
pub fn internal_error(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Internal {
        message: message.into(),
    })
}
