//! Lightweight pull/cursor counters.
//!
//! Keep this optional and cheap. Tests use it to prove that a source was
//! pulled once per element no matter how many cursors read it.

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct PullTracker {
    pulls: AtomicUsize,
    cursors: AtomicUsize,
    peak_lag: AtomicUsize,
}

impl PullTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one element pulled from the source.
    pub fn record_pull(&self) {
        self.pulls.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cursor opened over the cache.
    pub fn record_cursor(&self) {
        self.cursors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record how far behind the buffer head a reader is; keeps the maximum.
    pub fn record_lag(&self, lag: usize) {
        let mut cur = self.peak_lag.load(Ordering::Relaxed);
        while lag > cur {
            match self
                .peak_lag
                .compare_exchange(cur, lag, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => break,
                Err(observed) => cur = observed,
            }
        }
    }

    pub fn pulls(&self) -> usize {
        self.pulls.load(Ordering::Relaxed)
    }

    pub fn cursors(&self) -> usize {
        self.cursors.load(Ordering::Relaxed)
    }

    pub fn peak_lag(&self) -> usize {
        self.peak_lag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let t = PullTracker::new();
        t.record_pull();
        t.record_pull();
        t.record_cursor();
        t.record_lag(3);
        t.record_lag(1);
        assert_eq!(t.pulls(), 2);
        assert_eq!(t.cursors(), 1);
        assert_eq!(t.peak_lag(), 3);
    }
}
