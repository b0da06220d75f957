//! Stack growth for recursive evaluation.
//!
//! Structural equality over nested composites, reduction of nested blocks
//! and iteration of nested ranges all recurse on the shape of the value.
//! Values built by a host can nest arbitrarily deep, so every such recursion
//! goes through [`ensure_sufficient_stack`].
//!
//! Native targets grow the stack on demand via `stacker`. On wasm32 the guard
//! is a passthrough.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// wasm32 manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
