//! Operator enum and static operator classification.

use bitflags::bitflags;

bitflags! {
    /// Static operator properties.
    ///
    /// Computed by [`Op::flags`] from a fixed table; never stored per node.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OpFlags: u16 {
        /// Applied to a single operand.
        const UNARY = 1 << 0;
        /// Groups right-to-left at equal precedence.
        const RIGHT_ASSOC = 1 << 1;
        /// Left symbolic by the evaluator; builds an unevaluated node.
        const DEFERRED = 1 << 2;
        /// Intercepted by the evaluator before generic rules (if, loops, try).
        const CONTROL = 1 << 3;
        /// Produces a boolean or three-way ordering.
        const COMPARISON = 1 << 4;
        /// Exact integer arithmetic.
        const ARITHMETIC = 1 << 5;
        /// Tags a composite value rather than a pending application.
        const COMPOSITE = 1 << 6;
        /// Mutates a binding; handled by the host, never by the evaluator.
        const ASSIGNMENT = 1 << 7;
    }
}

/// Every operator known to the language.
///
/// Binary, unary and composite-value tags share one enum because expression
/// nodes carry both unevaluated syntax and evaluated composite values.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Op {
    // Declarators
    Export,
    Const,
    Var,
    Def,

    // Adjacency
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
    /// Call: `f(x)`.
    Function,
    Subscript,
    Member,
    Denote,

    /// `^`: exponentiation, and `type ^ array` tables.
    Empower,

    // Unary math
    Lambda,
    NamedUnary,
    UnaryPlus,
    UnaryMinus,
    Count,
    Deref,

    Multiply,
    Divide,
    /// `%`: truncating remainder.
    Remain,
    /// `mod`: floored modulo.
    Modulo,
    Add,
    Subtract,

    /// Inclusive range.
    Gamut,
    /// Exclusive-upper range.
    Delta,

    Intersection,
    Union,
    In,
    Not,
    Repeat,
    /// Partial application: binds leading arguments to a function.
    BindArgs,
    Try,
    Catch,
    Map,
    Reduce,

    Cmp,
    Lt,
    Lte,
    Gt,
    Gte,
    Isa,
    Equal,
    Unequal,
    And,
    Or,

    Mapping,
    List,

    Move,
    Swap,

    // Assignment
    Duplicate,
    Approximate,
    IncreaseBy,
    DecreaseBy,
    MultiplyBy,
    DivideBy,
    RemainBy,
    Push,

    // Conditional
    If,
    Then,
    Else,
    For,
    While,
    Do,
    /// The `do` half of `while cond do body`.
    WhileDo,
    /// The `while` half of `do body while cond`.
    DoWhile,

    // Commands
    Assert,
    Return,
    Throw,

    End,

    // Grouping
    Parens,
    Brackets,
    Braces,

    // Composite tags (never produced by the tokenizer)
    Array,
    Block,
    Invocation,
    Module,
    Refer,
    Break,
    Continue,
}

impl Op {
    /// Source symbol for the operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Op::Export => "export",
            Op::Const => "const",
            Op::Var => "var",
            Op::Def => "def",
            Op::PreIncrement | Op::PostIncrement => "++",
            Op::PreDecrement | Op::PostDecrement => "--",
            Op::Function => "()",
            Op::Subscript => "[]",
            Op::Member => ".",
            Op::Denote => "::",
            Op::Empower => "^",
            Op::Lambda => "lambda",
            Op::NamedUnary => "(unary)",
            Op::UnaryPlus | Op::Add => "+",
            Op::UnaryMinus | Op::Subtract => "-",
            Op::Count => "count",
            Op::Deref | Op::Multiply => "*",
            Op::Divide => "/",
            Op::Remain => "%",
            Op::Modulo => "mod",
            Op::Gamut => "...",
            Op::Delta => "..",
            Op::Intersection => "&",
            Op::Union => "|",
            Op::In => "in",
            Op::Not => "not",
            Op::Repeat => "(*)",
            Op::BindArgs => "(bind)",
            Op::Try => "try",
            Op::Catch => "catch",
            Op::Map => "map",
            Op::Reduce => "reduce",
            Op::Cmp => "<=>",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Isa => "isa",
            Op::Equal => "==",
            Op::Unequal => "!=",
            Op::And => "and",
            Op::Or => "or",
            Op::Mapping => "=>",
            Op::List => ",",
            Op::Move => "<-",
            Op::Swap => "<->",
            Op::Duplicate => "=",
            Op::Approximate => ":=",
            Op::IncreaseBy => "+=",
            Op::DecreaseBy => "-=",
            Op::MultiplyBy => "*=",
            Op::DivideBy => "/=",
            Op::RemainBy => "%=",
            Op::Push => "<--",
            Op::If => "if",
            Op::Then => "then",
            Op::Else => "else",
            Op::For => "for",
            Op::While | Op::DoWhile => "while",
            Op::Do | Op::WhileDo => "do",
            Op::Assert => "assert",
            Op::Return => "return",
            Op::Throw => "throw",
            Op::End => ";",
            Op::Parens => "(",
            Op::Brackets => "[",
            Op::Braces => "{",
            Op::Array => "[...]",
            Op::Block => "{...}",
            Op::Invocation => "(invoke)",
            Op::Module => "module",
            Op::Refer => "&",
            Op::Break => "break",
            Op::Continue => "continue",
        }
    }

    /// Static classification of the operator.
    pub const fn flags(self) -> OpFlags {
        match self {
            Op::PreIncrement
            | Op::PreDecrement
            | Op::PostIncrement
            | Op::PostDecrement
            | Op::Lambda
            | Op::UnaryPlus
            | Op::UnaryMinus
            | Op::Count
            | Op::Deref
            | Op::Not
            | Op::Assert
            | Op::Return
            | Op::Throw
            | Op::Refer => OpFlags::UNARY,

            Op::Add
            | Op::Subtract
            | Op::Multiply
            | Op::Divide
            | Op::Remain
            | Op::Modulo
            | Op::Empower => OpFlags::ARITHMETIC,

            Op::Cmp
            | Op::Lt
            | Op::Lte
            | Op::Gt
            | Op::Gte
            | Op::Isa
            | Op::Equal
            | Op::Unequal
            | Op::In => OpFlags::COMPARISON,

            Op::Mapping => OpFlags::DEFERRED.union(OpFlags::COMPOSITE),
            Op::Then | Op::Else | Op::Catch | Op::WhileDo | Op::DoWhile => {
                OpFlags::DEFERRED.union(OpFlags::RIGHT_ASSOC)
            }
            Op::Denote => OpFlags::DEFERRED,
            Op::Invocation | Op::Module => OpFlags::DEFERRED.union(OpFlags::COMPOSITE),

            Op::Array | Op::Block | Op::Gamut | Op::Delta | Op::BindArgs => OpFlags::COMPOSITE,

            Op::If | Op::While | Op::Do | Op::For => OpFlags::CONTROL.union(OpFlags::RIGHT_ASSOC),
            Op::Try
            | Op::Break
            | Op::Continue
            | Op::Function
            | Op::NamedUnary
            | Op::Map
            | Op::Reduce => OpFlags::CONTROL,

            Op::Move
            | Op::Swap
            | Op::Duplicate
            | Op::Approximate
            | Op::IncreaseBy
            | Op::DecreaseBy
            | Op::MultiplyBy
            | Op::DivideBy
            | Op::RemainBy
            | Op::Push => OpFlags::ASSIGNMENT.union(OpFlags::RIGHT_ASSOC),

            Op::Export
            | Op::Const
            | Op::Var
            | Op::Def
            | Op::Subscript
            | Op::Member
            | Op::Intersection
            | Op::Union
            | Op::Repeat
            | Op::And
            | Op::Or
            | Op::List
            | Op::End
            | Op::Parens
            | Op::Brackets
            | Op::Braces => OpFlags::empty(),
        }
    }

    /// Left symbolic by the evaluator (the operand shapes of `if`, `while`,
    /// `try` and friends, plus mappings and blocks).
    #[inline]
    pub const fn is_deferred(self) -> bool {
        self.flags().contains(OpFlags::DEFERRED)
    }

    /// Tags an evaluated composite value.
    #[inline]
    pub const fn is_composite(self) -> bool {
        self.flags().contains(OpFlags::COMPOSITE)
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_symbol())
    }
}
