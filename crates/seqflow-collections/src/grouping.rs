//! Key-partitioned views produced by `group_by`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::Deref;
use std::rc::Rc;

use seqflow_core::error::Result;
use seqflow_core::registry::{Extensible, TypeTag};
use seqflow_core::SeqflowConfig;

use crate::collection::Collection;
use crate::view::IndexedView;

/// One key and the elements that mapped to it, in source order.
#[derive(Clone)]
pub struct Grouping<K, T> {
    key: K,
    items: Collection<T>,
}

impl<K, T> Grouping<K, T> {
    pub fn new(key: K, items: Collection<T>) -> Self {
        Self { key, items }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn items(&self) -> &Collection<T> {
        &self.items
    }
}

impl<K, T> Deref for Grouping<K, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<K: fmt::Debug, T: fmt::Debug> fmt::Debug for Grouping<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grouping")
            .field("key", &self.key)
            .field("items", &self.items)
            .finish()
    }
}

impl<K: 'static, T: 'static> Extensible for Grouping<K, T> {
    const TAG: TypeTag = TypeTag::Grouping;
}

type EmptyCache<K, T> = Rc<RefCell<HashMap<K, Rc<Grouping<K, T>>>>>;

/// Immutable key -> `Grouping` map in first-seen key order.
///
/// Looking up a key with no group yields an empty `Grouping`. That empty
/// grouping is created once per key and handed out again on later lookups,
/// including lookups through clones of this collection.
pub struct GroupedCollection<K, T> {
    groups: Rc<Vec<Rc<Grouping<K, T>>>>,
    index: Rc<HashMap<K, usize>>,
    empties: EmptyCache<K, T>,
}

impl<K, T> GroupedCollection<K, T>
where
    K: Hash + Eq + Clone + 'static,
    T: 'static,
{
    /// Groups `(key, element)` pairs, preserving first-seen key order and
    /// element order within each group.
    pub fn from_keyed<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
    {
        Self::from_groups(pairs.into_iter().map(|(k, item)| (k, vec![item])))
    }

    /// Builds from explicit groups. Empty groups are kept; a repeated key
    /// extends the group it first appeared in.
    pub fn from_groups<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<T>)>,
    {
        let cap = SeqflowConfig::global().hash_initial_capacity;
        let mut index: HashMap<K, usize> = HashMap::with_capacity(cap);
        let mut acc: Vec<(K, Vec<T>)> = Vec::new();
        for (key, items) in groups {
            match index.get(&key) {
                Some(&pos) => acc[pos].1.extend(items),
                None => {
                    index.insert(key.clone(), acc.len());
                    acc.push((key, items));
                }
            }
        }
        let groups = acc
            .into_iter()
            .map(|(key, items)| Rc::new(Grouping::new(key, Collection::new(items))))
            .collect();
        Self {
            groups: Rc::new(groups),
            index: Rc::new(index),
            empties: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn get(&self, key: &K) -> Rc<Grouping<K, T>> {
        if let Some(&pos) = self.index.get(key) {
            return Rc::clone(&self.groups[pos]);
        }
        let mut empties = self.empties.borrow_mut();
        let empty = empties
            .entry(key.clone())
            .or_insert_with(|| Rc::new(Grouping::new(key.clone(), Collection::empty())));
        Rc::clone(empty)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }
}

impl<K, T> GroupedCollection<K, T> {
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.groups.iter().map(|g| g.key())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Grouping<K, T>>> + '_ {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<K, T> Clone for GroupedCollection<K, T> {
    fn clone(&self) -> Self {
        Self {
            groups: Rc::clone(&self.groups),
            index: Rc::clone(&self.index),
            empties: Rc::clone(&self.empties),
        }
    }
}

impl<K: fmt::Debug, T: fmt::Debug> fmt::Debug for GroupedCollection<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.groups.iter().map(|g| (&g.key, &g.items)))
            .finish()
    }
}

impl<K, T> IndexedView<K> for GroupedCollection<K, T>
where
    K: Hash + Eq + Clone + 'static,
    T: 'static,
{
    type Output = Rc<Grouping<K, T>>;

    fn view_name(&self) -> &'static str {
        "grouped collection"
    }

    fn lookup(&self, key: &K) -> Result<Rc<Grouping<K, T>>> {
        Ok(self.get(key))
    }

    fn has_key(&self, key: &K) -> bool {
        self.contains_key(key)
    }
}

impl<K: 'static, T: 'static> Extensible for GroupedCollection<K, T> {
    const TAG: TypeTag = TypeTag::GroupedCollection;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_key_order() {
        let g = GroupedCollection::from_keyed(vec![("b", 1), ("a", 2), ("b", 3)]);
        assert_eq!(g.keys().copied().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(g.get(&"b").items(), &vec![1, 3]);
    }

    #[test]
    fn test_empty_grouping_is_cached_per_key() {
        let g = GroupedCollection::<i32, i32>::from_keyed(vec![(1, 1)]);
        let a = g.get(&9);
        let b = g.clone().get(&9);
        assert!(Rc::ptr_eq(&a, &b));
        assert!(a.is_empty());
        assert_eq!(a.key(), &9);
        assert!(!Rc::ptr_eq(&a, &g.get(&8)));
    }

    #[test]
    fn test_explicit_empty_group_kept() {
        let g = GroupedCollection::from_groups(vec![("x", vec![]), ("y", vec![1])]);
        assert_eq!(g.len(), 2);
        assert!(g.contains_key(&"x"));
        assert!(g.get(&"x").is_empty());
    }
}
