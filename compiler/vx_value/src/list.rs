//! Flat list construction and traversal.
//!
//! Lists are flat: a chain of pairs whose last tail is the final element
//! (not a terminating `EmptyList`), a one-element list is the element
//! itself, and `EmptyList` is the empty list. Construction concatenates,
//! so an element is never itself a list.

use smallvec::SmallVec;
use vx_ir::Op;

use crate::value::Value;

/// Iterator over the elements of a list spine.
pub struct Elements {
    rest: Value,
}

impl Iterator for Elements {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match std::mem::replace(&mut self.rest, Value::EmptyList) {
            Value::EmptyList => None,
            Value::Pair(cell) => {
                self.rest = cell.tail.clone();
                Some(cell.head.clone())
            }
            last => Some(last),
        }
    }
}

/// Elements of `list`; a non-list value yields itself once.
pub fn elements(list: &Value) -> Elements {
    Elements { rest: list.clone() }
}

pub fn first(list: &Value) -> &Value {
    match list {
        Value::Pair(cell) => &cell.head,
        other => other,
    }
}

pub fn rest(list: &Value) -> &Value {
    match list {
        Value::Pair(cell) => &cell.tail,
        _ => &Value::EmptyList,
    }
}

pub fn count(list: &Value) -> usize {
    let mut n = 0;
    let mut cur = list;
    loop {
        match cur {
            Value::EmptyList => return n,
            Value::Pair(cell) => {
                n += 1;
                cur = &cell.tail;
            }
            _ => return n + 1,
        }
    }
}

/// `left, right`: concatenation, with `EmptyList` as identity on either side.
pub fn make_list(left: &Value, right: &Value) -> Value {
    if left.is_empty_list() {
        return right.clone();
    }
    if right.is_empty_list() {
        return left.clone();
    }
    if !left.is_pair() {
        return Value::pair(left.clone(), right.clone());
    }

    let mut builder = ListBuilder::new();
    builder.append(left.clone());
    builder.finish_onto(right.clone())
}

pub fn reverse_list(list: &Value) -> Value {
    let mut items: SmallVec<[Value; 8]> = elements(list).collect();
    items.reverse();
    Value::list(items)
}

/// Wrap `list` as an array. The empty list is already the empty array.
pub fn make_array(list: Value) -> Value {
    if list.is_empty_list() {
        list
    } else {
        Value::unary_expr(Op::Array, list)
    }
}

/// Accumulates elements and builds the spine back to front.
#[derive(Default)]
pub struct ListBuilder {
    items: SmallVec<[Value; 8]>,
}

impl ListBuilder {
    pub fn new() -> Self {
        ListBuilder::default()
    }

    /// Append `v`, splicing its elements if it is a list.
    pub fn append(&mut self, v: Value) {
        match v {
            Value::EmptyList => {}
            Value::Pair(_) => self.items.extend(elements(&v)),
            single => self.items.push(single),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn finish(mut self) -> Value {
        match self.items.pop() {
            Some(last) => self.finish_onto(last),
            None => Value::EmptyList,
        }
    }

    /// Build the list with `tail` as its remainder.
    pub fn finish_onto(self, tail: Value) -> Value {
        if tail.is_empty_list() {
            return self.finish();
        }
        self.items
            .into_iter()
            .rev()
            .fold(tail, |acc, head| Value::pair(head, acc))
    }

    pub fn finish_array(self) -> Value {
        make_array(self.finish())
    }
}
