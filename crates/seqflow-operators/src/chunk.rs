//! Fixed-size batching into `Collection`s; the last batch may be short.

use seqflow_collections::Collection;
use seqflow_core::SeqflowConfig;

use crate::sequence::Sequence;
use crate::traits::{BoxedPull, Operator, Pull};

pub struct ChunkOp<T> {
    upstream: Sequence<T>,
    size: usize,
}

impl<T> ChunkOp<T> {
    /// Callers validate `size >= 1`.
    pub fn new(upstream: Sequence<T>, size: usize) -> Self {
        Self { upstream, size }
    }
}

struct ChunkPull<T> {
    upstream: BoxedPull<T>,
    size: usize,
    prealloc: usize,
    held: Option<Collection<T>>,
    settled: bool,
}

impl<T> ChunkPull<T> {
    fn settle(&mut self) {
        if self.settled {
            return;
        }
        self.settled = true;
        let mut buf = Vec::with_capacity(self.prealloc);
        while buf.len() < self.size && self.upstream.valid() {
            match self.upstream.current() {
                Some(item) => buf.push(item),
                None => break,
            }
            self.upstream.advance();
        }
        self.held = if buf.is_empty() {
            None
        } else {
            Some(Collection::new(buf))
        };
    }
}

impl<T> Pull<Collection<T>> for ChunkPull<T> {
    fn rewind(&mut self) {
        self.held = None;
        self.settled = false;
        self.upstream.rewind();
    }

    fn valid(&mut self) -> bool {
        self.settle();
        self.held.is_some()
    }

    fn current(&mut self) -> Option<Collection<T>> {
        self.settle();
        self.held.clone()
    }

    fn advance(&mut self) {
        self.settle();
        self.held = None;
        self.settled = false;
    }
}

impl<T: Clone + 'static> Operator<Collection<T>> for ChunkOp<T> {
    fn name(&self) -> &'static str {
        "chunk"
    }

    fn open(&self) -> BoxedPull<Collection<T>> {
        let limit = SeqflowConfig::global().chunk_prealloc_limit;
        Box::new(ChunkPull {
            upstream: self.upstream.open(),
            size: self.size,
            prealloc: self.size.min(limit),
            held: None,
            settled: false,
        })
    }

    fn lineage(&self, out: &mut Vec<&'static str>) {
        self.upstream.lineage_into(out);
        out.push(self.name());
    }
}
