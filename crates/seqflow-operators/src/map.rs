//! Element-wise projection.

use std::rc::Rc;

use crate::sequence::Sequence;
use crate::traits::{BoxedPull, Operator, Pull};

pub struct MapOp<T, U> {
    upstream: Sequence<T>,
    f: Rc<dyn Fn(T) -> U>,
}

impl<T, U> MapOp<T, U> {
    pub fn new(upstream: Sequence<T>, f: Rc<dyn Fn(T) -> U>) -> Self {
        Self { upstream, f }
    }
}

struct MapPull<T, U> {
    upstream: BoxedPull<T>,
    f: Rc<dyn Fn(T) -> U>,
    /// Projection of the current element, computed at most once.
    held: Option<U>,
}

impl<T, U: Clone> Pull<U> for MapPull<T, U> {
    fn rewind(&mut self) {
        self.held = None;
        self.upstream.rewind();
    }

    fn valid(&mut self) -> bool {
        self.held.is_some() || self.upstream.valid()
    }

    fn current(&mut self) -> Option<U> {
        if self.held.is_none() {
            let item = self.upstream.current()?;
            self.held = Some((self.f)(item));
        }
        self.held.clone()
    }

    fn advance(&mut self) {
        self.held = None;
        self.upstream.advance();
    }
}

impl<T: Clone + 'static, U: Clone + 'static> Operator<U> for MapOp<T, U> {
    fn name(&self) -> &'static str {
        "map"
    }

    fn open(&self) -> BoxedPull<U> {
        Box::new(MapPull {
            upstream: self.upstream.open(),
            f: Rc::clone(&self.f),
            held: None,
        })
    }

    fn lineage(&self, out: &mut Vec<&'static str>) {
        self.upstream.lineage_into(out);
        out.push(self.name());
    }
}
