//! Leaf nodes: memoized single-pass sources, in-memory arrays, numeric ranges
//! and the empty sequence.

use std::marker::PhantomData;
use std::rc::Rc;

use seqflow_memo::{Cursor, MemoCache};

use crate::traits::{BoxedPull, Operator, Pull};

/// A single-pass source behind a shared memo cache. Every traversal gets its
/// own cursor.
pub struct SourceOp<T> {
    cache: Rc<MemoCache<T>>,
}

impl<T: Clone + 'static> SourceOp<T> {
    pub fn new(cache: Rc<MemoCache<T>>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Rc<MemoCache<T>> {
        &self.cache
    }
}

impl<T: Clone + 'static> Operator<T> for SourceOp<T> {
    fn name(&self) -> &'static str {
        "source"
    }

    fn open(&self) -> BoxedPull<T> {
        Box::new(Cursor::new(Rc::clone(&self.cache)))
    }
}

/// Fixed in-memory data; no cache needed.
pub struct ArrayOp<T> {
    items: Rc<[T]>,
}

impl<T> ArrayOp<T> {
    pub fn new(items: Rc<[T]>) -> Self {
        Self { items }
    }
}

struct ArrayPull<T> {
    items: Rc<[T]>,
    pos: usize,
}

impl<T: Clone> Pull<T> for ArrayPull<T> {
    fn rewind(&mut self) {
        self.pos = 0;
    }

    fn valid(&mut self) -> bool {
        self.pos < self.items.len()
    }

    fn current(&mut self) -> Option<T> {
        self.items.get(self.pos).cloned()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }
}

impl<T: Clone + 'static> Operator<T> for ArrayOp<T> {
    fn name(&self) -> &'static str {
        "array"
    }

    fn open(&self) -> BoxedPull<T> {
        Box::new(ArrayPull {
            items: Rc::clone(&self.items),
            pos: 0,
        })
    }

    fn materialized(&self) -> Option<Rc<[T]>> {
        Some(Rc::clone(&self.items))
    }
}

pub struct EmptyOp<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> EmptyOp<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for EmptyOp<T> {
    fn default() -> Self {
        Self::new()
    }
}

struct EmptyPull;

impl<T> Pull<T> for EmptyPull {
    fn rewind(&mut self) {}

    fn valid(&mut self) -> bool {
        false
    }

    fn current(&mut self) -> Option<T> {
        None
    }

    fn advance(&mut self) {}
}

impl<T: 'static> Operator<T> for EmptyOp<T> {
    fn name(&self) -> &'static str {
        "empty"
    }

    fn open(&self) -> BoxedPull<T> {
        Box::new(EmptyPull)
    }
}

/// Inclusive arithmetic range. `step` is a positive magnitude; the direction
/// comes from `start` and `end`.
pub struct RangeOp {
    start: i64,
    end: i64,
    step: i64,
}

impl RangeOp {
    /// Callers validate `step > 0`.
    pub fn new(start: i64, end: i64, step: i64) -> Self {
        Self { start, end, step }
    }
}

struct RangePull {
    start: i64,
    end: i64,
    step: i64,
    cur: Option<i64>,
}

impl RangePull {
    fn ascending(&self) -> bool {
        self.start <= self.end
    }
}

impl Pull<i64> for RangePull {
    fn rewind(&mut self) {
        self.cur = Some(self.start);
    }

    fn valid(&mut self) -> bool {
        match self.cur {
            Some(v) if self.ascending() => v <= self.end,
            Some(v) => v >= self.end,
            None => false,
        }
    }

    fn current(&mut self) -> Option<i64> {
        if self.valid() {
            self.cur
        } else {
            None
        }
    }

    fn advance(&mut self) {
        self.cur = match self.cur {
            Some(v) if self.ascending() => v.checked_add(self.step),
            Some(v) => v.checked_sub(self.step),
            None => None,
        };
    }
}

impl Operator<i64> for RangeOp {
    fn name(&self) -> &'static str {
        "range"
    }

    fn open(&self) -> BoxedPull<i64> {
        Box::new(RangePull {
            start: self.start,
            end: self.end,
            step: self.step,
            cur: None,
        })
    }
}
