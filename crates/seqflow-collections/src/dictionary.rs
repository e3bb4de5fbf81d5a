//! Insertion-ordered persistent dictionary with unique keys.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use seqflow_core::error::{Error, Result};
use seqflow_core::registry::{Extensible, TypeTag};
use seqflow_core::SeqflowConfig;

use crate::collection::Collection;
use crate::view::IndexedView;

pub struct Dictionary<K, V> {
    entries: Rc<Vec<(K, V)>>,
    index: Rc<HashMap<K, usize>>,
}

impl<K, V> Dictionary<K, V>
where
    K: Hash + Eq + Clone + 'static,
    V: Clone + 'static,
{
    pub fn new() -> Self {
        Self {
            entries: Rc::new(Vec::new()),
            index: Rc::new(HashMap::with_capacity(
                SeqflowConfig::global().hash_initial_capacity,
            )),
        }
    }

    /// Fails with `DuplicateKey` when a key repeats.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::new().add_many(pairs)
    }

    pub fn add(&self, key: K, value: V) -> Result<Self> {
        self.add_many(std::iter::once((key, value)))
    }

    /// All-or-nothing: a duplicate anywhere in the batch (against the
    /// dictionary or within the batch) leaves no new dictionary behind.
    pub fn add_many<I>(&self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut pairs = pairs.into_iter().peekable();
        if pairs.peek().is_none() {
            return Ok(self.clone());
        }
        let mut entries = self.entries.as_ref().clone();
        let mut index = self.index.as_ref().clone();
        for (key, value) in pairs {
            if let Some(&pos) = index.get(&key) {
                return Err(Error::DuplicateKey(format!(
                    "key already present at position {pos}"
                )));
            }
            index.insert(key.clone(), entries.len());
            entries.push((key, value));
        }
        Ok(Self::from_parts(entries, index))
    }

    /// Insert or replace. An existing key keeps its position.
    pub fn set(&self, key: K, value: V) -> Self {
        self.set_many(std::iter::once((key, value)))
    }

    pub fn set_many<I>(&self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut pairs = pairs.into_iter().peekable();
        if pairs.peek().is_none() {
            return self.clone();
        }
        let mut entries = self.entries.as_ref().clone();
        let mut index = self.index.as_ref().clone();
        for (key, value) in pairs {
            match index.get(&key) {
                Some(&pos) => entries[pos].1 = value,
                None => {
                    index.insert(key.clone(), entries.len());
                    entries.push((key, value));
                }
            }
        }
        Self::from_parts(entries, index)
    }

    /// Absent keys are ignored; removing nothing returns `self`.
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_many(std::iter::once(key))
    }

    pub fn remove_many<'q, I, Q>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = &'q Q>,
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
    {
        let doomed: Vec<usize> = keys
            .into_iter()
            .filter_map(|k| self.index.get(k).copied())
            .collect();
        if doomed.is_empty() {
            return self.clone();
        }
        let entries: Vec<(K, V)> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(pos, _)| !doomed.contains(pos))
            .map(|(_, kv)| kv.clone())
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(pos, (k, _))| (k.clone(), pos))
            .collect();
        Self::from_parts(entries, index)
    }

    /// Same keys and order, values run through `f`. The key index is shared.
    pub fn map<U, F>(&self, f: F) -> Dictionary<K, U>
    where
        U: Clone + 'static,
        F: Fn(&V) -> U,
    {
        Dictionary {
            entries: Rc::new(
                self.entries
                    .iter()
                    .map(|(k, v)| (k.clone(), f(v)))
                    .collect(),
            ),
            index: Rc::clone(&self.index),
        }
    }

    pub fn keys(&self) -> Collection<K> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn values(&self) -> Collection<V> {
        self.entries.iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn to_vec(&self) -> Vec<(K, V)> {
        self.entries.as_ref().clone()
    }

    /// Like `get`, but an absent key is an `OutOfRange` error.
    pub fn item<Q>(&self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key)
            .cloned()
            .ok_or_else(|| Error::out_of_range("key not present in dictionary"))
    }

    fn from_parts(entries: Vec<(K, V)>, index: HashMap<K, usize>) -> Self {
        Self {
            entries: Rc::new(entries),
            index: Rc::new(index),
        }
    }
}

impl<K: Hash + Eq, V> Dictionary<K, V> {
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}

impl<K, V> Clone for Dictionary<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
            index: Rc::clone(&self.index),
        }
    }
}

impl<K, V> Default for Dictionary<K, V>
where
    K: Hash + Eq + Clone + 'static,
    V: Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Equal when the same pairs appear in the same order.
impl<K: PartialEq, V: PartialEq> PartialEq for Dictionary<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Dictionary<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<K, V> IndexedView<K> for Dictionary<K, V>
where
    K: Hash + Eq + Clone + 'static,
    V: Clone + 'static,
{
    type Output = V;

    fn view_name(&self) -> &'static str {
        "dictionary"
    }

    fn lookup(&self, key: &K) -> Result<V> {
        self.item(key)
    }
}

impl<K: 'static, V: 'static> Extensible for Dictionary<K, V> {
    const TAG: TypeTag = TypeTag::Dictionary;
}
