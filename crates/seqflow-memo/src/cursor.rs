//! Independent read positions over a shared `MemoCache`.

use std::rc::Rc;

use crate::cache::MemoCache;

/// A (cache, position) pair. Moving one cursor is invisible to every other
/// cursor over the same cache.
pub struct Cursor<T> {
    cache: Rc<MemoCache<T>>,
    position: usize,
}

impl<T: Clone + 'static> Cursor<T> {
    pub fn new(cache: Rc<MemoCache<T>>) -> Self {
        cache.tracker().record_cursor();
        Self { cache, position: 0 }
    }

    /// Back to position 0; makes sure the first element (if any) is buffered.
    pub fn rewind(&mut self) {
        self.position = 0;
        self.cache.has(0);
    }

    pub fn valid(&self) -> bool {
        self.cache.has(self.position)
    }

    pub fn current(&self) -> Option<T> {
        self.cache.get(self.position)
    }

    pub fn advance(&mut self) {
        self.position += 1;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn cache(&self) -> &Rc<MemoCache<T>> {
        &self.cache
    }
}

/// A clone is a new cursor at the same position.
impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        self.cache.tracker().record_cursor();
        Self {
            cache: Rc::clone(&self.cache),
            position: self.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursors_are_independent() {
        let cache = Rc::new(MemoCache::new(vec![10, 20, 30]));
        let mut a = Cursor::new(Rc::clone(&cache));
        let mut b = Cursor::new(Rc::clone(&cache));
        a.rewind();
        b.rewind();
        a.advance();
        a.advance();
        assert_eq!(a.current(), Some(30));
        assert_eq!(b.current(), Some(10));
        a.advance();
        assert!(!a.valid());
        assert!(b.valid());
        assert_eq!(cache.tracker().cursors(), 2);
    }

    #[test]
    fn test_clone_counts_as_cursor() {
        let cache = Rc::new(MemoCache::new(vec!['x', 'y']));
        let mut a = Cursor::new(Rc::clone(&cache));
        a.rewind();
        a.advance();

        let mut b = a.clone();
        assert_eq!(cache.tracker().cursors(), 2);
        assert_eq!(b.current(), Some('y'));
        b.advance();
        assert!(!b.valid());
        assert_eq!(a.position(), 1);
    }
}
