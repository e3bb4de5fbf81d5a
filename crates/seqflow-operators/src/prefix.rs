//! Predicate-bounded prefixes: `skip_while` and `take_while`.

use std::rc::Rc;

use crate::sequence::Sequence;
use crate::traits::{BoxedPull, Operator, Pull};

pub type Predicate<T> = Rc<dyn Fn(&T) -> bool>;

/// Drops the leading run of elements matching `reject`, then passes
/// everything through (later matches included).
pub struct SkipWhileOp<T> {
    upstream: Sequence<T>,
    reject: Predicate<T>,
}

impl<T> SkipWhileOp<T> {
    pub fn new(upstream: Sequence<T>, reject: Predicate<T>) -> Self {
        Self { upstream, reject }
    }
}

struct SkipWhilePull<T> {
    upstream: BoxedPull<T>,
    reject: Predicate<T>,
    skipped: bool,
}

impl<T> SkipWhilePull<T> {
    fn skip_prefix(&mut self) {
        if self.skipped {
            return;
        }
        self.skipped = true;
        while self.upstream.valid() {
            match self.upstream.current() {
                Some(item) if (self.reject)(&item) => self.upstream.advance(),
                _ => break,
            }
        }
    }
}

impl<T> Pull<T> for SkipWhilePull<T> {
    fn rewind(&mut self) {
        self.skipped = false;
        self.upstream.rewind();
    }

    fn valid(&mut self) -> bool {
        self.skip_prefix();
        self.upstream.valid()
    }

    fn current(&mut self) -> Option<T> {
        self.skip_prefix();
        self.upstream.current()
    }

    fn advance(&mut self) {
        self.skip_prefix();
        self.upstream.advance();
    }
}

impl<T: Clone + 'static> Operator<T> for SkipWhileOp<T> {
    fn name(&self) -> &'static str {
        "skip_while"
    }

    fn open(&self) -> BoxedPull<T> {
        Box::new(SkipWhilePull {
            upstream: self.upstream.open(),
            reject: Rc::clone(&self.reject),
            skipped: false,
        })
    }

    fn lineage(&self, out: &mut Vec<&'static str>) {
        self.upstream.lineage_into(out);
        out.push(self.name());
    }
}

/// Passes elements through until the first one failing `accept`.
pub struct TakeWhileOp<T> {
    upstream: Sequence<T>,
    accept: Predicate<T>,
}

impl<T> TakeWhileOp<T> {
    pub fn new(upstream: Sequence<T>, accept: Predicate<T>) -> Self {
        Self { upstream, accept }
    }
}

struct TakeWhilePull<T> {
    upstream: BoxedPull<T>,
    accept: Predicate<T>,
    held: Option<T>,
    settled: bool,
    stopped: bool,
}

impl<T> TakeWhilePull<T> {
    fn settle(&mut self) {
        if self.settled || self.stopped {
            return;
        }
        self.settled = true;
        if !self.upstream.valid() {
            self.stopped = true;
            return;
        }
        match self.upstream.current() {
            Some(item) if (self.accept)(&item) => self.held = Some(item),
            _ => self.stopped = true,
        }
    }
}

impl<T: Clone> Pull<T> for TakeWhilePull<T> {
    fn rewind(&mut self) {
        self.held = None;
        self.settled = false;
        self.stopped = false;
        self.upstream.rewind();
    }

    fn valid(&mut self) -> bool {
        self.settle();
        !self.stopped
    }

    fn current(&mut self) -> Option<T> {
        self.settle();
        if self.stopped {
            return None;
        }
        self.held.clone()
    }

    fn advance(&mut self) {
        if self.stopped {
            return;
        }
        self.held = None;
        self.settled = false;
        self.upstream.advance();
    }
}

impl<T: Clone + 'static> Operator<T> for TakeWhileOp<T> {
    fn name(&self) -> &'static str {
        "take_while"
    }

    fn open(&self) -> BoxedPull<T> {
        Box::new(TakeWhilePull {
            upstream: self.upstream.open(),
            accept: Rc::clone(&self.accept),
            held: None,
            settled: false,
            stopped: false,
        })
    }

    fn lineage(&self, out: &mut Vec<&'static str>) {
        self.upstream.lineage_into(out);
        out.push(self.name());
    }
}
