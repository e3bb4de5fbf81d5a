//! An eagerly materialized, immutable sequence with O(1) length.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use seqflow_core::error::{Error, Result};
use seqflow_core::registry::{Extensible, TypeTag};

use crate::view::IndexedView;

pub struct Collection<T> {
    items: Rc<[T]>,
}

impl<T> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Rc::from(items),
        }
    }

    pub fn from_shared(items: Rc<[T]>) -> Self {
        Self { items }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The backing storage; cloning it does not copy elements.
    pub fn shared(&self) -> Rc<[T]> {
        Rc::clone(&self.items)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.items, &other.items)
    }
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
        }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Deref for Collection<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T: PartialEq> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items[..] == other.items[..]
    }
}

impl<T: Eq> Eq for Collection<T> {}

impl<T: PartialEq> PartialEq<Vec<T>> for Collection<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.items[..] == other[..]
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Collection<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.items[..] == other[..]
    }
}

impl<T: fmt::Debug> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Owning iterator; yields clones out of the shared storage.
pub struct IntoIter<T> {
    items: Rc<[T]>,
    pos: usize,
}

impl<T: Clone> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.items.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.items.len().saturating_sub(self.pos);
        (left, Some(left))
    }
}

impl<T: Clone> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            items: self.items,
            pos: 0,
        }
    }
}

impl<T: Clone> IndexedView<usize> for Collection<T> {
    type Output = T;

    fn view_name(&self) -> &'static str {
        "collection"
    }

    fn lookup(&self, key: &usize) -> Result<T> {
        self.items.get(*key).cloned().ok_or_else(|| {
            Error::out_of_range(format!(
                "index {key} out of bounds for collection of length {}",
                self.items.len()
            ))
        })
    }
}

impl<T: 'static> Extensible for Collection<T> {
    const TAG: TypeTag = TypeTag::Collection;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_storage() {
        let a = Collection::new(vec![1, 2, 3]);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a, vec![1, 2, 3]);
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn test_view_rejects_assignment() {
        let a: Collection<i32> = (1..=3).collect();
        assert_eq!(a.lookup(&1), Ok(2));
        assert!(matches!(a.lookup(&3), Err(Error::OutOfRange(_))));
        assert!(matches!(a.assign(&0, 9), Err(Error::UnsupportedOperation(_))));
        assert!(matches!(a.unassign(&0), Err(Error::UnsupportedOperation(_))));
    }
}
