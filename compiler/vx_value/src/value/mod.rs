//! Runtime values.
//!
//! # Heap enforcement
//!
//! Every heap payload is wrapped in [`Heap<T>`], whose constructor is private
//! to this crate. Values are built through factory methods on [`Value`]:
//!
//! ```text
//! let s = Value::string("hello");               // OK
//! let a = Value::array(Value::list([x, y]));    // OK
//! let s = Value::Str(Heap::new(...));           // ERROR: Heap::new is pub(crate)
//! ```
//!
//! # Sharing
//!
//! Payloads are `Arc`-shared and never mutated after construction, so
//! cloning a `Value` is a reference-count bump and `Value` is `Send + Sync`.

mod composite;
mod heap;
mod types;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;
use vx_ir::Op;

pub use composite::{ExprNode, FunctionValue, PairCell};
pub use heap::Heap;
pub use types::{BaseType, Builtin, ConstructFn, MemberFn, OpaqueValue, TypeInfo, TypeValue};

use crate::list;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    /// The empty list; also the empty array and the null value.
    EmptyList,
    /// Result of a loop that never ran, was broken out of, or ended on `continue`.
    Nothing,
    Bool(bool),
    /// Exact integer.
    Number(Heap<BigInt>),
    Byte(u8),
    /// Bytes interpreted as text.
    Str(Heap<[u8]>),
    /// Opaque binary bytes.
    Packed(Heap<[u8]>),
    Function(Heap<FunctionValue>),
    Builtin(Builtin),
    Type(TypeValue),
    /// Value of a user-registered type.
    Opaque(OpaqueValue),
    /// Cons cell.
    Pair(Heap<PairCell>),
    /// Expression node; see [`ExprNode`] for the composite roles.
    Expr(Heap<ExprNode>),
}

/// Variant tag, used as the dispatch key for builtin kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    EmptyList,
    Nothing,
    Bool,
    Number,
    Byte,
    Str,
    Packed,
    Function,
    Builtin,
    Type,
    Opaque,
    Pair,
    Expr,
}

impl Value {
    // Factories

    #[inline]
    pub fn number(n: impl Into<BigInt>) -> Value {
        Value::Number(Heap::new(n.into()))
    }

    pub fn string(bytes: impl AsRef<[u8]>) -> Value {
        Value::Str(Heap::from_arc(Arc::from(bytes.as_ref())))
    }

    pub fn packed(bytes: impl AsRef<[u8]>) -> Value {
        Value::Packed(Heap::from_arc(Arc::from(bytes.as_ref())))
    }

    /// Same byte kind (`Str` or `Packed`) as `self`, holding `bytes`.
    pub fn rewrap_bytes(&self, bytes: impl AsRef<[u8]>) -> Value {
        match self {
            Value::Packed(_) => Value::packed(bytes),
            _ => Value::string(bytes),
        }
    }

    /// A single cons cell. Prefer [`list::make_list`] unless `tail` is
    /// already a valid list.
    pub fn pair(head: Value, tail: Value) -> Value {
        Value::Pair(Heap::new(PairCell { head, tail }))
    }

    /// Flat list of `items`.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Value {
        let mut builder = list::ListBuilder::new();
        for item in items {
            builder.append(item);
        }
        builder.finish()
    }

    /// Array of `items`; no items gives the empty array (`EmptyList`).
    pub fn array(items: impl IntoIterator<Item = Value>) -> Value {
        list::make_array(Value::list(items))
    }

    pub fn expr(left: Value, op: Op, right: Value) -> Value {
        Value::Expr(Heap::new(ExprNode { op, left, right }))
    }

    pub fn unary_expr(op: Op, operand: Value) -> Value {
        Value::expr(Value::EmptyList, op, operand)
    }

    pub fn mapping(key: Value, value: Value) -> Value {
        Value::expr(key, Op::Mapping, value)
    }

    /// `op` is [`Op::Gamut`] (inclusive) or [`Op::Delta`] (exclusive).
    pub fn range(lower: Value, op: Op, upper: Value) -> Value {
        debug_assert!(matches!(op, Op::Gamut | Op::Delta));
        Value::expr(lower, op, upper)
    }

    pub fn table(key_type: Value, array: Value) -> Value {
        Value::expr(key_type, Op::Empower, array)
    }

    pub fn module(array: Value) -> Value {
        Value::unary_expr(Op::Module, array)
    }

    pub fn block(invoker: Value, body: Value) -> Value {
        Value::expr(invoker, Op::Invocation, body)
    }

    pub fn reference(target: Value) -> Value {
        Value::unary_expr(Op::Refer, target)
    }

    pub fn function(params: Value, body: Value) -> Value {
        Value::Function(Heap::new(FunctionValue { params, body }))
    }

    /// `f` with `args` bound ahead of whatever it is later called with.
    pub fn bound_function(f: Value, args: Value) -> Value {
        Value::expr(f, Op::BindArgs, args)
    }

    pub fn base_type(base: BaseType) -> Value {
        Value::Type(TypeValue::Base(base))
    }

    pub fn named_type(info: TypeInfo) -> Value {
        Value::Type(TypeValue::Named(Heap::new(info)))
    }

    /// A value of the user type `ty` (a [`Value::Type`] built by
    /// [`Value::named_type`]). Returns `None` for any other `ty`.
    pub fn opaque<T: std::any::Any + Send + Sync>(ty: &Value, payload: T) -> Option<Value> {
        match ty {
            Value::Type(TypeValue::Named(info)) => {
                let payload: Arc<dyn std::any::Any + Send + Sync> = Arc::new(payload);
                Some(Value::Opaque(OpaqueValue {
                    type_info: info.clone(),
                    payload: Heap::from_arc(payload),
                }))
            }
            _ => None,
        }
    }

    // Accessors

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::EmptyList => ValueKind::EmptyList,
            Value::Nothing => ValueKind::Nothing,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::Byte(_) => ValueKind::Byte,
            Value::Str(_) => ValueKind::Str,
            Value::Packed(_) => ValueKind::Packed,
            Value::Function(_) => ValueKind::Function,
            Value::Builtin(_) => ValueKind::Builtin,
            Value::Type(_) => ValueKind::Type,
            Value::Opaque(_) => ValueKind::Opaque,
            Value::Pair(_) => ValueKind::Pair,
            Value::Expr(_) => ValueKind::Expr,
        }
    }

    /// Human-readable type name, used in error messages.
    pub fn type_name(&self) -> Cow<'static, str> {
        let name = match self {
            Value::EmptyList => "empty list",
            Value::Nothing => "nothing",
            Value::Bool(_) => "booleans",
            Value::Number(_) => "integers",
            Value::Byte(_) => "bytes",
            Value::Str(_) => "string values",
            Value::Packed(_) => "packed values",
            Value::Function(_) | Value::Builtin(_) => "functions",
            Value::Type(_) => "types",
            Value::Opaque(o) => return Cow::Owned(o.type_name().to_owned()),
            Value::Pair(_) => "lists",
            Value::Expr(e) => match e.op {
                Op::Array => "arrays",
                Op::Gamut | Op::Delta => "ranges",
                Op::Empower if e.left.is_type() => "tables",
                Op::Mapping => "mappings",
                Op::Invocation => "blocks",
                Op::BindArgs => "functions",
                Op::Module => "modules",
                Op::Refer => "references",
                _ => "expressions",
            },
        };
        Cow::Borrowed(name)
    }

    #[inline]
    pub fn is_empty_list(&self) -> bool {
        matches!(self, Value::EmptyList)
    }

    #[inline]
    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_))
    }

    #[inline]
    pub fn as_expr(&self) -> Option<&ExprNode> {
        match self {
            Value::Expr(e) => Some(e),
            _ => None,
        }
    }

    /// The node's operator, if this is an expression node.
    #[inline]
    pub fn expr_op(&self) -> Option<Op> {
        self.as_expr().map(|e| e.op)
    }

    #[inline]
    pub fn as_number(&self) -> Option<&BigInt> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Bytes of a `Str` or `Packed` value.
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Str(b) | Value::Packed(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    pub fn is_bytes(&self) -> bool {
        matches!(self, Value::Str(_) | Value::Packed(_))
    }

    /// A non-empty array (the empty array is `EmptyList`).
    #[inline]
    pub fn is_array(&self) -> bool {
        self.expr_op() == Some(Op::Array)
    }

    /// Inner list of an array; `EmptyList` for the empty array.
    pub fn array_items(&self) -> Option<&Value> {
        match self {
            Value::EmptyList => Some(self),
            Value::Expr(e) if e.op == Op::Array => Some(&e.right),
            _ => None,
        }
    }

    #[inline]
    pub fn is_range(&self) -> bool {
        matches!(self.expr_op(), Some(Op::Gamut | Op::Delta))
    }

    /// `(lower, op, upper)` of a range.
    pub fn as_range(&self) -> Option<(&Value, Op, &Value)> {
        match self.as_expr() {
            Some(e) if matches!(e.op, Op::Gamut | Op::Delta) => Some((&e.left, e.op, &e.right)),
            _ => None,
        }
    }

    /// `(key_type, array)` of a table.
    pub fn as_table(&self) -> Option<(&Value, &Value)> {
        if self.is_table() {
            self.as_expr().map(|e| (&e.left, &e.right))
        } else {
            None
        }
    }

    /// `(key, value)` of a mapping.
    pub fn as_mapping(&self) -> Option<(&Value, &Value)> {
        match self.as_expr() {
            Some(e) if e.op == Op::Mapping => Some((&e.left, &e.right)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_mapping(&self) -> bool {
        self.expr_op() == Some(Op::Mapping)
    }

    /// `type ^ array`.
    pub fn is_table(&self) -> bool {
        match self.as_expr() {
            Some(e) => e.op == Op::Empower && e.left.is_type() && !e.right.is_type(),
            None => false,
        }
    }

    #[inline]
    pub fn is_block(&self) -> bool {
        self.expr_op() == Some(Op::Invocation)
    }

    #[inline]
    pub fn is_module(&self) -> bool {
        self.expr_op() == Some(Op::Module)
    }

    /// Partially applied function built by [`Value::bound_function`].
    #[inline]
    pub fn as_bound_function(&self) -> Option<(&Value, &Value)> {
        self.as_expr().filter(|e| e.op == Op::BindArgs).map(|e| (&e.left, &e.right))
    }

    /// Callable with an argument: closures, builtins, blocks and bound
    /// functions.
    pub fn is_functional(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Builtin(_))
            || matches!(self.expr_op(), Some(Op::Invocation | Op::BindArgs))
    }

    /// A type value or a type expression (`T[]`, `A | B`, `A & B`, `K ^ V`, `*T`).
    pub fn is_type(&self) -> bool {
        match self {
            Value::Type(_) => true,
            Value::Expr(e) => match e.op {
                Op::Subscript => e.right.is_empty_list() && e.left.is_type(),
                Op::Union | Op::Intersection | Op::Empower => {
                    e.left.is_type() && e.right.is_type()
                }
                Op::Deref => e.right.is_type(),
                _ => false,
            },
            _ => false,
        }
    }

    /// Neither a list nor an array.
    #[inline]
    pub fn is_single(&self) -> bool {
        !self.is_pair() && !self.is_array()
    }

    /// Text rendering used by `str` and `join`: strings unquoted, bytes as
    /// characters, lists concatenated.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Value::EmptyList => {}
            Value::Str(b) | Value::Packed(b) => out.push_str(&String::from_utf8_lossy(b)),
            Value::Byte(b) => out.push(char::from(*b)),
            Value::Pair(_) => {
                for item in list::elements(self) {
                    item.write_text(out);
                }
            }
            other => out.push_str(&other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        vx_stack::ensure_sufficient_stack(|| match self {
            Value::EmptyList => f.write_str("()"),
            Value::Nothing => f.write_str("nothing"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{}", &**n),
            Value::Byte(b) => write!(f, "'{}'", char::from(*b).escape_default()),
            Value::Str(s) => write!(f, "\"{}\"", s.escape_ascii()),
            Value::Packed(p) => {
                f.write_str("x\"")?;
                for byte in p.iter() {
                    write!(f, "{byte:02x}")?;
                }
                f.write_str("\"")
            }
            Value::Function(_) => f.write_str("<function>"),
            Value::Builtin(b) => f.write_str(b.name()),
            Value::Type(t) => f.write_str(t.name()),
            Value::Opaque(o) => write!(f, "<{}>", o.type_name()),
            Value::Pair(_) => {
                for (i, item) in list::elements(self).enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Expr(e) => fmt_expr(e, f),
        })
    }
}

fn fmt_expr(e: &ExprNode, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match e.op {
        Op::Array => write!(f, "[{}]", e.right),
        Op::Invocation => write!(f, "{{{}}}", e.right),
        Op::Module => write!(f, "module[{}]", e.right),
        Op::Refer => write!(f, "&{}", e.right),
        Op::Mapping => write!(f, "{} => {}", e.left, e.right),
        Op::Subscript if e.right.is_empty_list() => write!(f, "{}[]", e.left),
        Op::Empower if e.right.is_array() || e.right.is_empty_list() => {
            write!(f, "{}^[{}]", e.left, e.right.array_items().unwrap_or(&Value::EmptyList))
        }
        op if e.left.is_empty_list() && op.flags().contains(vx_ir::OpFlags::UNARY) => {
            write!(f, "({op} {})", e.right)
        }
        op => write!(f, "({} {op} {})", e.left, e.right),
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::EmptyList => f.write_str("EmptyList"),
            Value::Nothing => f.write_str("Nothing"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({})", &**n),
            Value::Byte(b) => write!(f, "Byte({b})"),
            Value::Str(_) => write!(f, "Str({self})"),
            Value::Packed(_) => write!(f, "Packed({self})"),
            Value::Function(_) => f.write_str("Function"),
            Value::Builtin(b) => write!(f, "Builtin({})", b.name()),
            Value::Type(t) => write!(f, "Type({})", t.name()),
            Value::Opaque(o) => write!(f, "Opaque({})", o.type_name()),
            Value::Pair(_) => write!(f, "List({self})"),
            Value::Expr(e) => write!(f, "Expr[{:?}]({self})", e.op),
        }
    }
}

/// Structural equality; mismatched types compare unequal instead of erroring.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::equal(self, other).unwrap_or(false)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::number(n)
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}
