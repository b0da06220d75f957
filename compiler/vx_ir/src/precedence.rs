//! Operator precedence table.
//!
//! Levels start at 1 and *increase* numerically as binding strength
//! *decreases*: member access is the tightest level, grouping the loosest.
//! The parser asks [`decreasing_op_precedence`] whether a newly read
//! operator must close out the pending one.

use crate::op::{Op, OpFlags};

/// Binding-strength level. Lower binds tighter.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Precedence {
    None = 0,
    /// `const var def export`
    Declarator,
    /// `. f(x) a[i] ++ --`
    Adjacency,
    /// `^`
    Exponentiation,
    /// `+ - count * lambda` (prefix)
    UnaryMath,
    /// `* / % mod`
    Multiplication,
    /// `+ -`
    Addition,
    /// `.. ...`
    Range,
    /// `&`
    Intersection,
    /// `|`
    Union,
    /// `in`
    In,
    /// `not`
    Not,
    /// `(*)`
    Repeat,
    /// `try catch`
    Try,
    /// `map`
    Map,
    /// `<=>`
    Comparison,
    /// `< <= > >=`
    Inequality,
    /// `== != isa`
    Equality,
    /// `and`
    And,
    /// `or`
    Or,
    /// `=>`
    Mapping,
    /// `,`
    List,
    /// `<- <->`
    Move,
    /// `= := += -= *= /= %= <--`
    Assignment,
    /// `if then else while do for`
    Conditional,
    /// `assert return throw`
    Command,
    /// `;`
    End,
    /// `( [ {`
    Group,
}

impl Precedence {
    #[inline]
    pub const fn level(self) -> u8 {
        self as u8
    }
}

/// Precedence level of `op`; [`Precedence::None`] for operators that never
/// appear between operands (composite tags, `break`, `continue`).
pub const fn op_precedence(op: Op) -> Precedence {
    match op {
        Op::Export | Op::Const | Op::Var | Op::Def => Precedence::Declarator,

        Op::PreIncrement
        | Op::PreDecrement
        | Op::PostIncrement
        | Op::PostDecrement
        | Op::Function
        | Op::Subscript
        | Op::Member
        | Op::Denote => Precedence::Adjacency,

        Op::Empower => Precedence::Exponentiation,

        Op::Lambda
        | Op::NamedUnary
        | Op::UnaryPlus
        | Op::UnaryMinus
        | Op::Count
        | Op::Deref => Precedence::UnaryMath,

        Op::Multiply | Op::Divide | Op::Remain | Op::Modulo => Precedence::Multiplication,
        Op::Add | Op::Subtract => Precedence::Addition,
        Op::Gamut | Op::Delta => Precedence::Range,
        Op::Intersection => Precedence::Intersection,
        Op::Union => Precedence::Union,
        Op::In => Precedence::In,
        Op::Not => Precedence::Not,
        Op::Repeat | Op::BindArgs => Precedence::Repeat,
        Op::Try | Op::Catch => Precedence::Try,
        Op::Map | Op::Reduce => Precedence::Map,
        Op::Cmp => Precedence::Comparison,
        Op::Lt | Op::Lte | Op::Gt | Op::Gte => Precedence::Inequality,
        Op::Isa | Op::Equal | Op::Unequal => Precedence::Equality,
        Op::And => Precedence::And,
        Op::Or => Precedence::Or,
        Op::Mapping => Precedence::Mapping,
        Op::List => Precedence::List,
        Op::Move | Op::Swap => Precedence::Move,

        Op::Duplicate
        | Op::Approximate
        | Op::IncreaseBy
        | Op::DecreaseBy
        | Op::MultiplyBy
        | Op::DivideBy
        | Op::RemainBy
        | Op::Push => Precedence::Assignment,

        Op::If
        | Op::Then
        | Op::Else
        | Op::For
        | Op::While
        | Op::Do
        | Op::WhileDo
        | Op::DoWhile => Precedence::Conditional,

        Op::Assert | Op::Return | Op::Throw => Precedence::Command,
        Op::End => Precedence::End,
        Op::Parens | Op::Brackets | Op::Braces => Precedence::Group,

        Op::Array
        | Op::Block
        | Op::Invocation
        | Op::Module
        | Op::Refer
        | Op::Break
        | Op::Continue => Precedence::None,
    }
}

/// Assignment, move and conditional operators group right-to-left.
#[inline]
pub const fn is_right_associative(op: Op) -> bool {
    op.flags().contains(OpFlags::RIGHT_ASSOC)
}

/// Does reading `right` after `left` require closing out `left` first?
///
/// True when `right` binds no tighter than `left`. A right-associative
/// `right` needs a strictly looser level, so equal levels nest instead.
pub const fn decreasing_op_precedence(left: Op, right: Op) -> bool {
    let pr_left = op_precedence(left).level();
    let pr_right = op_precedence(right).level();

    let fudge = if is_right_associative(right) { 1 } else { 0 };

    pr_right >= pr_left + fudge
}
