//! Cons cells, expression nodes and closures.

use smallvec::SmallVec;
use vx_ir::Op;

use super::Value;

/// A cons cell. Lists are right-leaning chains of cells.
pub struct PairCell {
    pub head: Value,
    pub tail: Value,
}

impl Drop for PairCell {
    // Unlink the spine one cell at a time so dropping a long list does not
    // recurse once per element.
    fn drop(&mut self) {
        let mut tail = std::mem::replace(&mut self.tail, Value::EmptyList);
        while let Value::Pair(cell) = tail {
            match cell.into_inner() {
                Some(mut inner) => tail = std::mem::replace(&mut inner.tail, Value::EmptyList),
                None => break,
            }
        }
    }
}

/// Shared immutable `{ op, left, right }` node.
///
/// Carries both pending applications and evaluated composites; consumers
/// branch on `op`:
///
/// | `op` | role | `left` | `right` |
/// |---|---|---|---|
/// | `Array` | array | empty | non-empty list |
/// | `Gamut`, `Delta` | range | lower bound | upper bound |
/// | `Empower` (type left) | table | key type | array of mappings |
/// | `Mapping` | key/value pair | key | value |
/// | `Invocation` | block | invoker | body |
/// | `Module` | module | empty | array of mappings |
/// | `Refer` | reference | empty | target |
///
/// Unary nodes keep their operand in `right` with `EmptyList` on the left.
pub struct ExprNode {
    pub op: Op,
    pub left: Value,
    pub right: Value,
}

impl ExprNode {
    #[inline]
    pub fn is(&self, op: Op) -> bool {
        self.op == op
    }
}

impl Drop for ExprNode {
    // Arrays of arrays and other nested composites are torn down from an
    // explicit worklist. Children still shared elsewhere just lose a count.
    fn drop(&mut self) {
        if !is_nested(&self.left) && !is_nested(&self.right) {
            return;
        }
        let mut pending: SmallVec<[Value; 8]> = SmallVec::new();
        pending.push(std::mem::replace(&mut self.left, Value::EmptyList));
        pending.push(std::mem::replace(&mut self.right, Value::EmptyList));

        while let Some(value) = pending.pop() {
            match value {
                Value::Expr(node) => {
                    if let Some(mut inner) = node.into_inner() {
                        pending.push(std::mem::replace(&mut inner.left, Value::EmptyList));
                        pending.push(std::mem::replace(&mut inner.right, Value::EmptyList));
                    }
                }
                Value::Pair(cell) => {
                    if let Some(mut inner) = cell.into_inner() {
                        pending.push(std::mem::replace(&mut inner.head, Value::EmptyList));
                        pending.push(std::mem::replace(&mut inner.tail, Value::EmptyList));
                    }
                }
                _ => {}
            }
        }
    }
}

#[inline]
fn is_nested(v: &Value) -> bool {
    matches!(v, Value::Expr(_) | Value::Pair(_))
}

/// A closure: parameter pattern and body, both opaque to the evaluator.
#[derive(Clone)]
pub struct FunctionValue {
    pub params: Value,
    pub body: Value,
}
