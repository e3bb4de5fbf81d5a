//! Positional pairing of two sequences.

use std::rc::Rc;

use crate::sequence::Sequence;
use crate::traits::{BoxedPull, Operator, Pull};

/// Stops as soon as either side runs out. Zipping a sequence with itself is
/// fine: each side opens its own traversal.
pub struct ZipOp<T, U, R> {
    left: Sequence<T>,
    right: Sequence<U>,
    combine: Rc<dyn Fn(T, U) -> R>,
}

impl<T, U, R> ZipOp<T, U, R> {
    pub fn new(left: Sequence<T>, right: Sequence<U>, combine: Rc<dyn Fn(T, U) -> R>) -> Self {
        Self {
            left,
            right,
            combine,
        }
    }
}

struct ZipPull<T, U, R> {
    left: BoxedPull<T>,
    right: BoxedPull<U>,
    combine: Rc<dyn Fn(T, U) -> R>,
    held: Option<R>,
}

impl<T, U, R: Clone> Pull<R> for ZipPull<T, U, R> {
    fn rewind(&mut self) {
        self.held = None;
        self.left.rewind();
        self.right.rewind();
    }

    fn valid(&mut self) -> bool {
        self.held.is_some() || (self.left.valid() && self.right.valid())
    }

    fn current(&mut self) -> Option<R> {
        if self.held.is_none() {
            if !(self.left.valid() && self.right.valid()) {
                return None;
            }
            let l = self.left.current()?;
            let r = self.right.current()?;
            self.held = Some((self.combine)(l, r));
        }
        self.held.clone()
    }

    fn advance(&mut self) {
        self.held = None;
        self.left.advance();
        self.right.advance();
    }
}

impl<T, U, R> Operator<R> for ZipOp<T, U, R>
where
    T: Clone + 'static,
    U: Clone + 'static,
    R: Clone + 'static,
{
    fn name(&self) -> &'static str {
        "zip"
    }

    fn open(&self) -> BoxedPull<R> {
        Box::new(ZipPull {
            left: self.left.open(),
            right: self.right.open(),
            combine: Rc::clone(&self.combine),
            held: None,
        })
    }

    fn lineage(&self, out: &mut Vec<&'static str>) {
        self.left.lineage_into(out);
        self.right.lineage_into(out);
        out.push(self.name());
    }
}
