//! Terminal reducers. Each one runs a fresh traversal and, where possible,
//! stops pulling as soon as its answer is known.

use std::fmt::{Display, Write as _};
use std::hash::Hash;

use seqflow_collections::{Collection, Dictionary, GroupedCollection, HashSet};
use seqflow_core::error::{Error, Result};
use seqflow_core::hash::Hashing;

use crate::sequence::Sequence;

/// `Ok(None)` for zero items, `Ok(Some)` for one, `Ambiguous` for more.
/// Stops after the second item.
fn single_of<T, I: Iterator<Item = T>>(mut items: I) -> Result<Option<T>> {
    let first = items.next();
    if first.is_some() && items.next().is_some() {
        return Err(Error::Ambiguous(
            "sequence contains more than one matching element".into(),
        ));
    }
    Ok(first)
}

fn empty() -> Error {
    Error::NotFound("sequence contains no elements".into())
}

fn no_match() -> Error {
    Error::NotFound("no element satisfies the predicate".into())
}

impl<T: Clone + 'static> Sequence<T> {
    pub fn fold<A, F>(&self, init: A, f: F) -> A
    where
        F: FnMut(A, T) -> A,
    {
        self.iter().fold(init, f)
    }

    /// Short-circuits on the first match.
    pub fn any<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().any(|x| predicate(&x))
    }

    /// Short-circuits on the first mismatch. True for an empty sequence.
    pub fn all<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().all(|x| predicate(&x))
    }

    pub fn count(&self) -> usize {
        match self.materialized() {
            Some(items) => items.len(),
            None => self.iter().count(),
        }
    }

    pub fn first(&self) -> Result<T> {
        self.first_or_none().ok_or_else(empty)
    }

    pub fn first_by<F>(&self, predicate: F) -> Result<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.first_or_none_by(predicate).ok_or_else(no_match)
    }

    pub fn first_or_none(&self) -> Option<T> {
        self.iter().next()
    }

    pub fn first_or_none_by<F>(&self, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|x| predicate(x))
    }

    pub fn last(&self) -> Result<T> {
        self.last_or_none().ok_or_else(empty)
    }

    pub fn last_by<F>(&self, predicate: F) -> Result<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.last_or_none_by(predicate).ok_or_else(no_match)
    }

    pub fn last_or_none(&self) -> Option<T> {
        match self.materialized() {
            Some(items) => items.last().cloned(),
            None => self.iter().last(),
        }
    }

    pub fn last_or_none_by<F>(&self, mut predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().filter(|x| predicate(x)).last()
    }

    /// Exactly one element: `NotFound` for none, `Ambiguous` for several.
    pub fn single(&self) -> Result<T> {
        self.single_or_none()?.ok_or_else(empty)
    }

    pub fn single_by<F>(&self, predicate: F) -> Result<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.single_or_none_by(predicate)?.ok_or_else(no_match)
    }

    /// `None` for an empty sequence; several elements are still `Ambiguous`.
    pub fn single_or_none(&self) -> Result<Option<T>> {
        single_of(self.iter())
    }

    pub fn single_or_none_by<F>(&self, mut predicate: F) -> Result<Option<T>>
    where
        F: FnMut(&T) -> bool,
    {
        single_of(self.iter().filter(|x| predicate(x)))
    }

    pub fn to_vec(&self) -> Vec<T> {
        match self.materialized() {
            Some(items) => items.to_vec(),
            None => self.iter().collect(),
        }
    }

    /// Materializes into a `Collection`. In-memory data is shared, not copied.
    pub fn collect(&self) -> Collection<T> {
        match self.materialized() {
            Some(items) => Collection::from_shared(items),
            None => Collection::new(self.iter().collect()),
        }
    }

    /// Keyed by `key`, valued by the element. Fails on a repeated key.
    pub fn to_dictionary<K, F>(&self, key: F) -> Result<Dictionary<K, T>>
    where
        K: Hash + Eq + Clone + 'static,
        F: Fn(&T) -> K,
    {
        Dictionary::from_pairs(self.iter().map(|x| (key(&x), x)))
    }

    pub fn to_dictionary_with<K, V, FK, FV>(&self, key: FK, value: FV) -> Result<Dictionary<K, V>>
    where
        K: Hash + Eq + Clone + 'static,
        V: Clone + 'static,
        FK: Fn(&T) -> K,
        FV: Fn(&T) -> V,
    {
        Dictionary::from_pairs(self.iter().map(|x| (key(&x), value(&x))))
    }

    pub fn as_set(&self) -> HashSet<T>
    where
        T: Hash + Eq,
    {
        self.as_set_with(Hashing::structural())
    }

    pub fn as_set_with(&self, hashing: Hashing<T>) -> HashSet<T> {
        HashSet::from_iter_with(self.iter(), hashing)
    }

    /// Elements rendered with `Display`, joined by `separator`.
    pub fn implode(&self, separator: &str) -> String
    where
        T: Display,
    {
        let mut out = String::new();
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            let _ = write!(&mut out, "{item}");
        }
        out
    }

    /// Eager: groups in first-seen key order, elements in source order.
    pub fn group_by<K, F>(&self, key: F) -> GroupedCollection<K, T>
    where
        K: Hash + Eq + Clone + 'static,
        F: Fn(&T) -> K,
    {
        let grouped = GroupedCollection::from_keyed(self.iter().map(|x| (key(&x), x)));
        #[cfg(feature = "tracing")]
        tracing::debug!(groups = grouped.len(), "group_by built");
        grouped
    }
}
