//! Predicate filter. The predicate runs once per upstream element per traversal.

use std::rc::Rc;

use crate::sequence::Sequence;
use crate::traits::{BoxedPull, Operator, Pull};

pub struct FilterOp<T> {
    upstream: Sequence<T>,
    predicate: Rc<dyn Fn(&T) -> bool>,
}

impl<T> FilterOp<T> {
    pub fn new(upstream: Sequence<T>, predicate: Rc<dyn Fn(&T) -> bool>) -> Self {
        Self {
            upstream,
            predicate,
        }
    }
}

struct FilterPull<T> {
    upstream: BoxedPull<T>,
    predicate: Rc<dyn Fn(&T) -> bool>,
    held: Option<T>,
    settled: bool,
}

impl<T: Clone> FilterPull<T> {
    fn settle(&mut self) {
        if self.settled {
            return;
        }
        self.settled = true;
        while self.upstream.valid() {
            match self.upstream.current() {
                Some(item) if (self.predicate)(&item) => {
                    self.held = Some(item);
                    return;
                }
                Some(_) => self.upstream.advance(),
                None => return,
            }
        }
    }
}

impl<T: Clone> Pull<T> for FilterPull<T> {
    fn rewind(&mut self) {
        self.held = None;
        self.settled = false;
        self.upstream.rewind();
    }

    fn valid(&mut self) -> bool {
        self.settle();
        self.held.is_some()
    }

    fn current(&mut self) -> Option<T> {
        self.settle();
        self.held.clone()
    }

    fn advance(&mut self) {
        self.settle();
        if self.held.take().is_some() {
            self.upstream.advance();
        }
        self.settled = false;
    }
}

impl<T: Clone + 'static> Operator<T> for FilterOp<T> {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn open(&self) -> BoxedPull<T> {
        Box::new(FilterPull {
            upstream: self.upstream.open(),
            predicate: Rc::clone(&self.predicate),
            held: None,
            settled: false,
        })
    }

    fn lineage(&self, out: &mut Vec<&'static str>) {
        self.upstream.lineage_into(out);
        out.push(self.name());
    }
}
