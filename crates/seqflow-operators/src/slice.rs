//! Offset/count window (`skip`, `take`, `slice`).

use crate::sequence::Sequence;
use crate::traits::{BoxedPull, Operator, Pull};

pub struct SliceOp<T> {
    upstream: Sequence<T>,
    offset: usize,
    /// `None` means unbounded.
    count: Option<usize>,
}

impl<T> SliceOp<T> {
    pub fn new(upstream: Sequence<T>, offset: usize, count: Option<usize>) -> Self {
        Self {
            upstream,
            offset,
            count,
        }
    }
}

struct SlicePull<T> {
    upstream: BoxedPull<T>,
    offset: usize,
    count: Option<usize>,
    skipped: bool,
    taken: usize,
    done: bool,
}

impl<T> SlicePull<T> {
    fn skip_prefix(&mut self) {
        if self.skipped {
            return;
        }
        self.skipped = true;
        let mut n = 0;
        while n < self.offset && self.upstream.valid() {
            self.upstream.advance();
            n += 1;
        }
    }
}

impl<T> Pull<T> for SlicePull<T> {
    fn rewind(&mut self) {
        self.skipped = false;
        self.taken = 0;
        self.done = self.count == Some(0);
        self.upstream.rewind();
    }

    fn valid(&mut self) -> bool {
        if self.done {
            return false;
        }
        self.skip_prefix();
        self.upstream.valid()
    }

    fn current(&mut self) -> Option<T> {
        if !self.valid() {
            return None;
        }
        self.upstream.current()
    }

    fn advance(&mut self) {
        if self.done {
            return;
        }
        self.skip_prefix();
        self.taken += 1;
        // Past the last requested element: stop without moving upstream.
        if self.count.is_some_and(|c| self.taken >= c) {
            self.done = true;
        } else {
            self.upstream.advance();
        }
    }
}

impl<T: Clone + 'static> Operator<T> for SliceOp<T> {
    fn name(&self) -> &'static str {
        match (self.offset, self.count) {
            (_, None) => "skip",
            (0, Some(_)) => "take",
            _ => "slice",
        }
    }

    fn open(&self) -> BoxedPull<T> {
        Box::new(SlicePull {
            upstream: self.upstream.open(),
            offset: self.offset,
            count: self.count,
            skipped: false,
            taken: 0,
            done: false,
        })
    }

    fn lineage(&self, out: &mut Vec<&'static str>) {
        self.upstream.lineage_into(out);
        out.push(self.name());
    }
}
