//! Generic iteration over container-like values.
//!
//! One lazy, single-pass iterator covers list spines, arrays, ranges,
//! strings and packed bytes, tables and modules. Ranges are stepped without
//! materializing their elements. Consumers see only [`GenericIter::has_more`]
//! and [`GenericIter::take_next`] (or the `Iterator` impl built on them).

use num_bigint::BigInt;
use num_traits::One;
use vx_ir::Op;

use crate::errors::{type_error, EvalError};
use crate::value::{Heap, Value};

/// Lazy, non-restartable traversal of a container.
pub struct GenericIter {
    state: State,
}

enum State {
    Done,
    /// Remaining list spine.
    Spine(Value),
    Bytes { bytes: Heap<[u8]>, pos: usize },
    /// Integer range; `last` is inclusive.
    Numbers { next: BigInt, last: BigInt },
    /// Byte range; `end` is exclusive.
    ByteRange { next: u16, end: u16 },
    Once(Value),
}

impl GenericIter {
    /// Start iterating `container`.
    ///
    /// Fails only for ranges whose bounds are neither integers nor bytes.
    pub fn new(container: &Value) -> Result<Self, EvalError> {
        let state = match container {
            Value::EmptyList | Value::Nothing => State::Done,
            Value::Pair(_) => State::Spine(container.clone()),
            Value::Str(b) | Value::Packed(b) => State::Bytes {
                bytes: b.clone(),
                pos: 0,
            },
            Value::Expr(e) => match e.op {
                Op::Array => State::Spine(e.right.clone()),
                Op::Module => return GenericIter::new(&e.right),
                Op::Empower if container.is_table() => return GenericIter::new(&e.right),
                Op::Gamut | Op::Delta => range_state(&e.left, e.op, &e.right)?,
                _ => State::Once(container.clone()),
            },
            single => State::Once(single.clone()),
        };
        Ok(GenericIter { state })
    }

    pub fn has_more(&self) -> bool {
        match &self.state {
            State::Done => false,
            State::Spine(rest) => !rest.is_empty_list(),
            State::Bytes { bytes, pos } => *pos < bytes.len(),
            State::Numbers { next, last } => next <= last,
            State::ByteRange { next, end } => next < end,
            State::Once(_) => true,
        }
    }

    pub fn take_next(&mut self) -> Option<Value> {
        match &mut self.state {
            State::Done => None,
            State::Spine(rest) => match std::mem::replace(rest, Value::EmptyList) {
                Value::EmptyList => {
                    self.state = State::Done;
                    None
                }
                Value::Pair(cell) => {
                    *rest = cell.tail.clone();
                    Some(cell.head.clone())
                }
                last => {
                    self.state = State::Done;
                    Some(last)
                }
            },
            State::Bytes { bytes, pos } => {
                let byte = bytes.get(*pos).copied();
                *pos += 1;
                byte.map(Value::Byte)
            }
            State::Numbers { next, last } => {
                if next > last {
                    return None;
                }
                let current = next.clone();
                *next += BigInt::one();
                Some(Value::number(current))
            }
            State::ByteRange { next, end } => {
                if next >= end {
                    return None;
                }
                let current = u8::try_from(*next).ok();
                *next += 1;
                current.map(Value::Byte)
            }
            State::Once(_) => match std::mem::replace(&mut self.state, State::Done) {
                State::Once(v) => Some(v),
                _ => None,
            },
        }
    }

    /// Remaining element count. Consumes the iterator; ranges are counted
    /// without stepping.
    pub fn remaining(self) -> BigInt {
        let direct = match &self.state {
            State::Numbers { next, last } if next <= last => Some(last - next + BigInt::one()),
            State::Numbers { .. } => Some(BigInt::default()),
            State::ByteRange { next, end } => Some(BigInt::from(end.saturating_sub(*next))),
            State::Bytes { bytes, pos } => Some(BigInt::from(bytes.len().saturating_sub(*pos))),
            _ => None,
        };
        direct.unwrap_or_else(|| BigInt::from(self.count()))
    }
}

impl Iterator for GenericIter {
    type Item = Value;

    #[inline]
    fn next(&mut self) -> Option<Value> {
        self.take_next()
    }
}

fn range_state(lower: &Value, op: Op, upper: &Value) -> Result<State, EvalError> {
    let inclusive = op == Op::Gamut;
    match (lower, upper) {
        (Value::Number(lo), Value::Number(hi)) => {
            let last = if inclusive {
                (**hi).clone()
            } else {
                &**hi - BigInt::one()
            };
            Ok(State::Numbers {
                next: (**lo).clone(),
                last,
            })
        }
        (Value::Byte(lo), Value::Byte(hi)) => Ok(State::ByteRange {
            next: u16::from(*lo),
            end: u16::from(*hi) + u16::from(inclusive),
        }),
        _ => Err(type_error("range bounds must be integers or bytes")),
    }
}
