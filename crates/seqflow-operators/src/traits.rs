//! Operator trait + the pull protocol every traversal speaks.
//!
//! A traversal is: `rewind`, then repeatedly `valid` / `current` / `advance`.
//! `advance` is cheap and defers work; the next `valid` does whatever pulling
//! is needed to settle on an element. That keeps `take(n)` from touching
//! anything past its last element.

use std::rc::Rc;

use seqflow_memo::Cursor;

/// A resumable traversal of one operator node.
pub trait Pull<T> {
    /// Start (or restart) from the first element.
    fn rewind(&mut self);

    /// Whether the current position holds an element. May pull upstream.
    fn valid(&mut self) -> bool;

    /// The element at the current position, `None` past the end.
    fn current(&mut self) -> Option<T>;

    /// Step past the current element.
    fn advance(&mut self);
}

pub type BoxedPull<T> = Box<dyn Pull<T>>;

/// Trait that all operator nodes implement.
///
/// Invariants:
/// - nodes are immutable once built; all traversal state lives in the `Pull`
///   returned by `open`;
/// - two pulls opened from the same node never observe each other.
pub trait Operator<T>: 'static {
    /// Human-readable operator name (stable).
    fn name(&self) -> &'static str;

    fn open(&self) -> BoxedPull<T>;

    /// Operator names in post-order: every input's lineage, left to right,
    /// then this node.
    fn lineage(&self, out: &mut Vec<&'static str>) {
        out.push(self.name());
    }

    /// Backing storage when the node is plain in-memory data.
    fn materialized(&self) -> Option<Rc<[T]>> {
        None
    }
}

impl<T: Clone + 'static> Pull<T> for Cursor<T> {
    fn rewind(&mut self) {
        Cursor::rewind(self);
    }

    fn valid(&mut self) -> bool {
        Cursor::valid(self)
    }

    fn current(&mut self) -> Option<T> {
        Cursor::current(self)
    }

    fn advance(&mut self) {
        Cursor::advance(self);
    }
}
