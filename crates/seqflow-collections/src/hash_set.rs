//! Persistent hash set over a pluggable `Hashing` strategy.
//!
//! Layout: an ordered list of buckets (first-seen order) where each bucket
//! holds the members sharing one hash, in insertion order. Mutations copy the
//! bucket list but share every bucket they do not touch.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use seqflow_core::hash::Hashing;
use seqflow_core::registry::{Extensible, TypeTag};
use seqflow_core::SeqflowConfig;

use crate::collection::Collection;

struct Bucket<T> {
    hash: u64,
    items: Rc<Vec<T>>,
}

impl<T> Clone for Bucket<T> {
    fn clone(&self) -> Self {
        Self {
            hash: self.hash,
            items: Rc::clone(&self.items),
        }
    }
}

pub struct HashSet<T> {
    buckets: Rc<Vec<Bucket<T>>>,
    index: Rc<HashMap<u64, usize>>,
    hashing: Hashing<T>,
    len: usize,
}

/// Working copy for one batch of mutations.
struct Draft<T> {
    buckets: Vec<Bucket<T>>,
    index: HashMap<u64, usize>,
    len: usize,
    changed: bool,
}

impl<T: Clone + 'static> Draft<T> {
    fn of(set: &HashSet<T>) -> Self {
        Self {
            buckets: set.buckets.as_ref().clone(),
            index: set.index.as_ref().clone(),
            len: set.len,
            changed: false,
        }
    }

    fn insert(&mut self, hashing: &Hashing<T>, item: T) {
        let hash = hashing.hash(&item);
        match self.index.get(&hash) {
            Some(&pos) => {
                let bucket = &mut self.buckets[pos];
                if bucket.items.iter().any(|x| hashing.eq(x, &item)) {
                    return;
                }
                Rc::make_mut(&mut bucket.items).push(item);
            }
            None => {
                self.index.insert(hash, self.buckets.len());
                self.buckets.push(Bucket {
                    hash,
                    items: Rc::new(vec![item]),
                });
            }
        }
        self.len += 1;
        self.changed = true;
    }

    /// Drops every bucket member equal to `item`.
    fn remove(&mut self, hashing: &Hashing<T>, item: &T) {
        let hash = hashing.hash(item);
        let Some(&pos) = self.index.get(&hash) else {
            return;
        };
        let members = &self.buckets[pos].items;
        if !members.iter().any(|x| hashing.eq(x, item)) {
            return;
        }
        let kept: Vec<T> = members
            .iter()
            .filter(|x| !hashing.eq(x, item))
            .cloned()
            .collect();
        self.len -= members.len() - kept.len();
        self.changed = true;

        if kept.is_empty() {
            self.buckets.remove(pos);
            self.index.remove(&hash);
            for slot in self.index.values_mut() {
                if *slot > pos {
                    *slot -= 1;
                }
            }
        } else {
            self.buckets[pos].items = Rc::new(kept);
        }
    }

    fn finish(self, hashing: Hashing<T>) -> HashSet<T> {
        HashSet {
            buckets: Rc::new(self.buckets),
            index: Rc::new(self.index),
            hashing,
            len: self.len,
        }
    }
}

impl<T: Clone + 'static> HashSet<T> {
    /// Empty set with structural hashing.
    pub fn new() -> Self
    where
        T: Hash + Eq,
    {
        Self::with_hashing(Hashing::structural())
    }

    pub fn with_hashing(hashing: Hashing<T>) -> Self {
        let cap = SeqflowConfig::global().hash_initial_capacity;
        Self {
            buckets: Rc::new(Vec::new()),
            index: Rc::new(HashMap::with_capacity(cap)),
            hashing,
            len: 0,
        }
    }

    pub fn from_iter_with<I>(items: I, hashing: Hashing<T>) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let set = Self::with_hashing(hashing).add_many(items);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            len = set.len,
            buckets = set.buckets.len(),
            structural = set.hashing.is_structural(),
            "hash set built"
        );
        set
    }

    /// Returns `self` (pointer-equal) when `item` is already a member.
    pub fn add(&self, item: T) -> Self {
        self.add_many(std::iter::once(item))
    }

    pub fn add_many<I>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut draft = Draft::of(self);
        for item in items {
            draft.insert(&self.hashing, item);
        }
        self.settle(draft)
    }

    /// Returns `self` (pointer-equal) when nothing equal to `item` is a member.
    pub fn remove(&self, item: &T) -> Self {
        self.remove_many(std::iter::once(item))
    }

    pub fn remove_many<I, B>(&self, items: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Borrow<T>,
    {
        let mut draft = Draft::of(self);
        for item in items {
            draft.remove(&self.hashing, item.borrow());
        }
        self.settle(draft)
    }

    pub fn union(&self, other: &HashSet<T>) -> Self {
        self.add_many(other.iter().cloned())
    }

    /// Only the bucket of `item`'s hash is scanned.
    pub fn contains(&self, item: &T) -> bool {
        let hash = self.hashing.hash(item);
        match self.index.get(&hash) {
            Some(&pos) => self.buckets[pos]
                .items
                .iter()
                .any(|x| self.hashing.eq(x, item)),
            None => false,
        }
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    pub fn to_collection(&self) -> Collection<T> {
        self.iter().cloned().collect()
    }

    fn settle(&self, draft: Draft<T>) -> Self {
        if draft.changed {
            draft.finish(self.hashing.clone())
        } else {
            self.clone()
        }
    }
}

impl<T> HashSet<T> {
    /// Members in bucket order, insertion order within a bucket.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.buckets.iter().flat_map(|b| b.items.iter())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn hashing(&self) -> &Hashing<T> {
        &self.hashing
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.buckets, &other.buckets)
    }
}

impl<T> Clone for HashSet<T> {
    fn clone(&self) -> Self {
        Self {
            buckets: Rc::clone(&self.buckets),
            index: Rc::clone(&self.index),
            hashing: self.hashing.clone(),
            len: self.len,
        }
    }
}

impl<T: Hash + Eq + Clone + 'static> Default for HashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq + Clone + 'static> FromIterator<T> for HashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_with(iter, Hashing::structural())
    }
}

impl<T: fmt::Debug> fmt::Debug for HashSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: 'static> Extensible for HashSet<T> {
    const TAG: TypeTag = TypeTag::Set;
}

/// Conversion into a set under a given strategy.
///
/// A set that already uses the same strategy is returned as is.
pub trait IntoHashSet<T> {
    fn into_hash_set(self, hashing: &Hashing<T>) -> HashSet<T>;
}

impl<T: Clone + 'static> IntoHashSet<T> for HashSet<T> {
    fn into_hash_set(self, hashing: &Hashing<T>) -> HashSet<T> {
        if self.hashing.same_as(hashing) {
            self
        } else {
            HashSet::from_iter_with(self.iter().cloned(), hashing.clone())
        }
    }
}

impl<T: Clone + 'static> IntoHashSet<T> for &HashSet<T> {
    fn into_hash_set(self, hashing: &Hashing<T>) -> HashSet<T> {
        self.clone().into_hash_set(hashing)
    }
}

impl<T: Clone + 'static> IntoHashSet<T> for Vec<T> {
    fn into_hash_set(self, hashing: &Hashing<T>) -> HashSet<T> {
        HashSet::from_iter_with(self, hashing.clone())
    }
}

impl<T: Clone + 'static, const N: usize> IntoHashSet<T> for [T; N] {
    fn into_hash_set(self, hashing: &Hashing<T>) -> HashSet<T> {
        HashSet::from_iter_with(self, hashing.clone())
    }
}

impl<T: Clone + 'static> IntoHashSet<T> for &[T] {
    fn into_hash_set(self, hashing: &Hashing<T>) -> HashSet<T> {
        HashSet::from_iter_with(self.iter().cloned(), hashing.clone())
    }
}

impl<T: Clone + 'static> IntoHashSet<T> for Collection<T> {
    fn into_hash_set(self, hashing: &Hashing<T>) -> HashSet<T> {
        HashSet::from_iter_with(self.iter().cloned(), hashing.clone())
    }
}

impl<T: Clone + 'static> IntoHashSet<T> for &Collection<T> {
    fn into_hash_set(self, hashing: &Hashing<T>) -> HashSet<T> {
        HashSet::from_iter_with(self.iter().cloned(), hashing.clone())
    }
}
