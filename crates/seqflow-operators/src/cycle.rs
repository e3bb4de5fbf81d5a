//! Re-traversal of a sequence: a fixed number of rounds or forever.

use crate::sequence::Sequence;
use crate::traits::{BoxedPull, Operator, Pull};

/// `times == None` cycles forever. An empty upstream stays empty either way.
pub struct RepeatOp<T> {
    upstream: Sequence<T>,
    times: Option<usize>,
}

impl<T> RepeatOp<T> {
    pub fn new(upstream: Sequence<T>, times: Option<usize>) -> Self {
        Self { upstream, times }
    }
}

struct RepeatPull<T> {
    upstream: BoxedPull<T>,
    times: Option<usize>,
    round: usize,
    /// Whether the current round produced anything yet.
    produced: bool,
}

impl<T> Pull<T> for RepeatPull<T> {
    fn rewind(&mut self) {
        self.round = 0;
        self.produced = false;
        self.upstream.rewind();
    }

    fn valid(&mut self) -> bool {
        loop {
            if self.times.is_some_and(|t| self.round >= t) {
                return false;
            }
            if self.upstream.valid() {
                self.produced = true;
                return true;
            }
            if !self.produced {
                return false;
            }
            self.round += 1;
            self.produced = false;
            self.upstream.rewind();
        }
    }

    fn current(&mut self) -> Option<T> {
        if !self.valid() {
            return None;
        }
        self.upstream.current()
    }

    fn advance(&mut self) {
        self.upstream.advance();
    }
}

impl<T: Clone + 'static> Operator<T> for RepeatOp<T> {
    fn name(&self) -> &'static str {
        match self.times {
            Some(_) => "repeat",
            None => "infinite",
        }
    }

    fn open(&self) -> BoxedPull<T> {
        Box::new(RepeatPull {
            upstream: self.upstream.open(),
            times: self.times,
            round: 0,
            produced: false,
        })
    }

    fn lineage(&self, out: &mut Vec<&'static str>) {
        self.upstream.lineage_into(out);
        out.push(self.name());
    }
}
