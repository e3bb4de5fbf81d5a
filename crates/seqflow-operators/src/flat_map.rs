//! Flattening projection: each upstream element expands into zero or more
//! output elements, emitted in order.

use std::iter::Peekable;
use std::rc::Rc;

use crate::sequence::Sequence;
use crate::traits::{BoxedPull, Operator, Pull};

pub type Expand<T, U> = Rc<dyn Fn(T) -> Box<dyn Iterator<Item = U>>>;

pub struct FlatMapOp<T, U> {
    upstream: Sequence<T>,
    expand: Expand<T, U>,
}

impl<T, U> FlatMapOp<T, U> {
    pub fn new(upstream: Sequence<T>, expand: Expand<T, U>) -> Self {
        Self { upstream, expand }
    }
}

struct FlatMapPull<T, U> {
    upstream: BoxedPull<T>,
    expand: Expand<T, U>,
    /// Expansion of the current upstream element.
    inner: Option<Peekable<Box<dyn Iterator<Item = U>>>>,
}

impl<T, U> FlatMapPull<T, U> {
    /// Moves to the next non-empty expansion. Returns whether one exists.
    fn settle(&mut self) -> bool {
        loop {
            if let Some(inner) = self.inner.as_mut() {
                if inner.peek().is_some() {
                    return true;
                }
                self.inner = None;
                self.upstream.advance();
            }
            if !self.upstream.valid() {
                return false;
            }
            let Some(item) = self.upstream.current() else {
                return false;
            };
            self.inner = Some((self.expand)(item).peekable());
        }
    }
}

impl<T, U: Clone> Pull<U> for FlatMapPull<T, U> {
    fn rewind(&mut self) {
        self.inner = None;
        self.upstream.rewind();
    }

    fn valid(&mut self) -> bool {
        self.settle()
    }

    fn current(&mut self) -> Option<U> {
        if !self.settle() {
            return None;
        }
        self.inner.as_mut().and_then(|inner| inner.peek().cloned())
    }

    fn advance(&mut self) {
        if self.settle() {
            if let Some(inner) = self.inner.as_mut() {
                inner.next();
            }
        }
    }
}

impl<T: Clone + 'static, U: Clone + 'static> Operator<U> for FlatMapOp<T, U> {
    fn name(&self) -> &'static str {
        "flat_map"
    }

    fn open(&self) -> BoxedPull<U> {
        Box::new(FlatMapPull {
            upstream: self.upstream.open(),
            expand: Rc::clone(&self.expand),
            inner: None,
        })
    }

    fn lineage(&self, out: &mut Vec<&'static str>) {
        self.upstream.lineage_into(out);
        out.push(self.name());
    }
}
