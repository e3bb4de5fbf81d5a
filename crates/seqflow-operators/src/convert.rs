//! Coercion of collections and sources into `Sequence`s (and sequences into
//! sets).
//!
//! In-memory data keeps sharing its storage where it can. Single-pass sources
//! go behind a memo cache. A `Sequence` passes through unwrapped.

use std::rc::Rc;

use seqflow_collections::{
    Collection, Dictionary, GroupedCollection, Grouping, HashSet, IntoHashSet,
};
use seqflow_core::hash::Hashing;

use crate::factory::Source;
use crate::sequence::Sequence;

pub trait IntoSequence<T> {
    fn into_sequence(self) -> Sequence<T>;
}

impl<T: Clone + 'static> IntoSequence<T> for Sequence<T> {
    fn into_sequence(self) -> Sequence<T> {
        self
    }
}

impl<T: Clone + 'static> IntoSequence<T> for &Sequence<T> {
    fn into_sequence(self) -> Sequence<T> {
        self.clone()
    }
}

impl<T: Clone + 'static> IntoSequence<T> for Vec<T> {
    fn into_sequence(self) -> Sequence<T> {
        Sequence::from_vec(self)
    }
}

impl<T: Clone + 'static, const N: usize> IntoSequence<T> for [T; N] {
    fn into_sequence(self) -> Sequence<T> {
        Sequence::from_vec(Vec::from(self))
    }
}

impl<T: Clone + 'static> IntoSequence<T> for &[T] {
    fn into_sequence(self) -> Sequence<T> {
        Sequence::from_vec(self.to_vec())
    }
}

impl<T: Clone + 'static> IntoSequence<T> for Collection<T> {
    fn into_sequence(self) -> Sequence<T> {
        Sequence::from_shared(self.shared())
    }
}

impl<T: Clone + 'static> IntoSequence<T> for &Collection<T> {
    fn into_sequence(self) -> Sequence<T> {
        Sequence::from_shared(self.shared())
    }
}

impl<T: Clone + 'static> IntoSequence<T> for HashSet<T> {
    fn into_sequence(self) -> Sequence<T> {
        Sequence::from_vec(self.to_vec())
    }
}

impl<T: Clone + 'static> IntoSequence<T> for &HashSet<T> {
    fn into_sequence(self) -> Sequence<T> {
        Sequence::from_vec(self.to_vec())
    }
}

impl<K, T: Clone + 'static> IntoSequence<T> for &Grouping<K, T> {
    fn into_sequence(self) -> Sequence<T> {
        self.items().into_sequence()
    }
}

impl<K, T: Clone + 'static> IntoSequence<T> for Rc<Grouping<K, T>> {
    fn into_sequence(self) -> Sequence<T> {
        self.items().into_sequence()
    }
}

impl<K, V> IntoSequence<(K, V)> for &Dictionary<K, V>
where
    K: std::hash::Hash + Eq + Clone + 'static,
    V: Clone + 'static,
{
    fn into_sequence(self) -> Sequence<(K, V)> {
        Sequence::from_vec(self.to_vec())
    }
}

impl<K, V> IntoSequence<(K, V)> for Dictionary<K, V>
where
    K: std::hash::Hash + Eq + Clone + 'static,
    V: Clone + 'static,
{
    fn into_sequence(self) -> Sequence<(K, V)> {
        Sequence::from_vec(self.to_vec())
    }
}

impl<T, I> IntoSequence<T> for Source<I>
where
    T: Clone + 'static,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'static,
{
    fn into_sequence(self) -> Sequence<T> {
        Sequence::from_source(self.0)
    }
}

impl<T: Clone + 'static> IntoHashSet<T> for Sequence<T> {
    fn into_hash_set(self, hashing: &Hashing<T>) -> HashSet<T> {
        self.as_set_with(hashing.clone())
    }
}

impl<T: Clone + 'static> IntoHashSet<T> for &Sequence<T> {
    fn into_hash_set(self, hashing: &Hashing<T>) -> HashSet<T> {
        self.as_set_with(hashing.clone())
    }
}

/// Sequence operations on the persistent collections.
pub trait AsSequence<T> {
    fn seq(&self) -> Sequence<T>;
}

impl<T: Clone + 'static> AsSequence<T> for Collection<T> {
    fn seq(&self) -> Sequence<T> {
        self.into_sequence()
    }
}

impl<T: Clone + 'static> AsSequence<T> for HashSet<T> {
    fn seq(&self) -> Sequence<T> {
        self.into_sequence()
    }
}

impl<K, T: Clone + 'static> AsSequence<T> for Grouping<K, T> {
    fn seq(&self) -> Sequence<T> {
        self.into_sequence()
    }
}

impl<K, V> AsSequence<(K, V)> for Dictionary<K, V>
where
    K: std::hash::Hash + Eq + Clone + 'static,
    V: Clone + 'static,
{
    fn seq(&self) -> Sequence<(K, V)> {
        self.into_sequence()
    }
}

/// The groupings, in key order.
impl<K: 'static, T: 'static> AsSequence<Rc<Grouping<K, T>>> for GroupedCollection<K, T> {
    fn seq(&self) -> Sequence<Rc<Grouping<K, T>>> {
        Sequence::from_vec(self.iter().cloned().collect())
    }
}
