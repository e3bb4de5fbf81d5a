//! Index-addressable memo over a single-pass source.

use std::cell::RefCell;
use std::fmt;

use seqflow_core::error::{Error, Result};
use seqflow_core::{CacheId, SeqflowConfig};

use crate::tracking::PullTracker;

struct CacheState<T> {
    buf: Vec<T>,
    /// `None` once the source reported exhaustion (or for materialized data).
    source: Option<Box<dyn Iterator<Item = T>>>,
}

/// Buffers a source's elements by index.
///
/// Invariants:
/// - the source is pulled strictly in order, at most once per index;
/// - `buf[i]` never changes once written and the buffer never shrinks;
/// - after exhaustion the source is dropped and never touched again.
pub struct MemoCache<T> {
    id: CacheId,
    state: RefCell<CacheState<T>>,
    tracker: PullTracker,
}

impl<T: Clone + 'static> MemoCache<T> {
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::with_config(source, SeqflowConfig::global())
    }

    pub fn with_config<I>(source: I, cfg: &SeqflowConfig) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self {
            id: CacheId::next(),
            state: RefCell::new(CacheState {
                buf: Vec::with_capacity(cfg.cache_initial_capacity),
                source: Some(Box::new(source.into_iter())),
            }),
            tracker: PullTracker::new(),
        }
    }

    /// An already-exhausted cache over fixed data.
    pub fn materialized(items: Vec<T>) -> Self {
        Self {
            id: CacheId::next(),
            state: RefCell::new(CacheState {
                buf: items,
                source: None,
            }),
            tracker: PullTracker::new(),
        }
    }

    /// Whether index `i` exists, pulling the source forward as needed.
    /// Negative indexes never exist.
    pub fn has_index(&self, i: i64) -> bool {
        match usize::try_from(i) {
            Ok(i) => self.fill_to(i),
            Err(_) => false,
        }
    }

    pub fn get_index(&self, i: i64) -> Result<T> {
        usize::try_from(i)
            .ok()
            .and_then(|i| self.get(i))
            .ok_or_else(|| Error::out_of_range(format!("index {i} is past the end of {}", self.id)))
    }

    /// `has_index` for an already non-negative index.
    pub fn has(&self, i: usize) -> bool {
        self.fill_to(i)
    }

    pub fn get(&self, i: usize) -> Option<T> {
        if !self.fill_to(i) {
            return None;
        }
        self.state.borrow().buf.get(i).cloned()
    }

    /// Pull everything and return a snapshot of the buffer.
    pub fn fill_all(&self) -> Vec<T> {
        let mut i = self.buffered_len();
        while self.fill_to(i) {
            i += 1;
        }
        self.state.borrow().buf.clone()
    }

    fn fill_to(&self, index: usize) -> bool {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        while state.buf.len() <= index {
            let Some(source) = state.source.as_mut() else {
                return false;
            };
            match source.next() {
                Some(item) => {
                    state.buf.push(item);
                    self.tracker.record_pull();
                }
                None => {
                    state.source = None;
                    #[cfg(feature = "tracing")]
                    tracing::trace!(
                        cache = %self.id,
                        buffered = state.buf.len(),
                        "source exhausted"
                    );
                    return false;
                }
            }
        }
        self.tracker.record_lag(state.buf.len() - index - 1);
        true
    }
}

impl<T> MemoCache<T> {
    pub fn id(&self) -> CacheId {
        self.id
    }

    pub fn buffered_len(&self) -> usize {
        self.state.borrow().buf.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.state.borrow().source.is_none()
    }

    /// Elements pulled from the source so far.
    pub fn pulls(&self) -> usize {
        self.tracker.pulls()
    }

    pub fn tracker(&self) -> &PullTracker {
        &self.tracker
    }
}

impl<T> fmt::Debug for MemoCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCache")
            .field("id", &self.id)
            .field("buffered", &self.buffered_len())
            .field("exhausted", &self.is_exhausted())
            .finish()
    }
}
