//! Left then right.

use crate::sequence::Sequence;
use crate::traits::{BoxedPull, Operator, Pull};

pub struct ConcatOp<T> {
    first: Sequence<T>,
    second: Sequence<T>,
}

impl<T> ConcatOp<T> {
    pub fn new(first: Sequence<T>, second: Sequence<T>) -> Self {
        Self { first, second }
    }
}

struct ConcatPull<T> {
    first: BoxedPull<T>,
    second: BoxedPull<T>,
    on_second: bool,
}

impl<T> Pull<T> for ConcatPull<T> {
    fn rewind(&mut self) {
        self.on_second = false;
        self.first.rewind();
    }

    fn valid(&mut self) -> bool {
        if !self.on_second {
            if self.first.valid() {
                return true;
            }
            // The right side is only touched once the left is exhausted.
            self.on_second = true;
            self.second.rewind();
        }
        self.second.valid()
    }

    fn current(&mut self) -> Option<T> {
        if !self.valid() {
            return None;
        }
        if self.on_second {
            self.second.current()
        } else {
            self.first.current()
        }
    }

    fn advance(&mut self) {
        if self.on_second {
            self.second.advance();
        } else {
            self.first.advance();
        }
    }
}

impl<T: Clone + 'static> Operator<T> for ConcatOp<T> {
    fn name(&self) -> &'static str {
        "concat"
    }

    fn open(&self) -> BoxedPull<T> {
        Box::new(ConcatPull {
            first: self.first.open(),
            second: self.second.open(),
            on_second: false,
        })
    }

    fn lineage(&self, out: &mut Vec<&'static str>) {
        self.first.lineage_into(out);
        self.second.lineage_into(out);
        out.push(self.name());
    }
}
