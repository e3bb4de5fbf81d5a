//! `Sequence`: the public lazy pipeline handle.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use seqflow_collections::{Collection, IntoHashSet};
use seqflow_core::error::{Error, Result};
use seqflow_core::hash::Hashing;
use seqflow_core::registry::{Extensible, TypeTag};
use seqflow_memo::MemoCache;

use crate::chunk::ChunkOp;
use crate::concat::ConcatOp;
use crate::convert::IntoSequence;
use crate::filter::FilterOp;
use crate::flat_map::FlatMapOp;
use crate::join::HashJoinOp;
use crate::map::MapOp;
use crate::prefix::{SkipWhileOp, TakeWhileOp};
use crate::slice::SliceOp;
use crate::source::{ArrayOp, EmptyOp, SourceOp};
use crate::traits::{BoxedPull, Operator};
use crate::zip::ZipOp;

thread_local! {
    /// One canonical empty sequence per element type.
    static EMPTIES: RefCell<HashMap<TypeId, Box<dyn Any>>> = RefCell::new(HashMap::new());
}

/// A lazily evaluated, re-traversable sequence of `T`.
///
/// Cloning is cheap and yields the same pipeline (`ptr_eq` holds).
pub struct Sequence<T> {
    op: Rc<dyn Operator<T>>,
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self {
            op: Rc::clone(&self.op),
        }
    }
}

fn non_negative(value: i64, what: &str) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| Error::invalid(format!("{what} must be non-negative, got {value}")))
}

impl<T: Clone + 'static> Sequence<T> {
    pub fn from_operator(op: impl Operator<T>) -> Self {
        Self { op: Rc::new(op) }
    }

    /// Wraps a single-pass source. It is pulled lazily and at most once per
    /// element, however many times the sequence is traversed.
    pub fn from_source<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::from_operator(SourceOp::new(Rc::new(MemoCache::new(source))))
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self::from_shared(Rc::from(items))
    }

    pub fn from_shared(items: Rc<[T]>) -> Self {
        Self::from_operator(ArrayOp::new(items))
    }

    /// The canonical empty sequence for `T` on this thread.
    pub fn empty() -> Self {
        EMPTIES.with(|cell| {
            let mut map = cell.borrow_mut();
            let slot = map
                .entry(TypeId::of::<T>())
                .or_insert_with(|| {
                    Box::new(Self::from_operator(EmptyOp::<T>::new())) as Box<dyn Any>
                });
            (**slot)
                .downcast_ref::<Self>()
                .cloned()
                .unwrap_or_else(|| Self::from_operator(EmptyOp::<T>::new()))
        })
    }

    /// A fresh traversal.
    pub fn open(&self) -> BoxedPull<T> {
        self.op.open()
    }

    pub fn iter(&self) -> Iter<T> {
        Iter {
            pull: self.open(),
            started: false,
            done: false,
        }
    }

    pub fn map<U, F>(&self, f: F) -> Sequence<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> U + 'static,
    {
        Sequence::from_operator(MapOp::new(self.clone(), Rc::new(f)))
    }

    pub fn filter<F>(&self, predicate: F) -> Sequence<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        Self::from_operator(FilterOp::new(self.clone(), Rc::new(predicate)))
    }

    pub fn flat_map<U, I, F>(&self, f: F) -> Sequence<U>
    where
        U: Clone + 'static,
        I: IntoIterator<Item = U>,
        I::IntoIter: 'static,
        F: Fn(T) -> I + 'static,
    {
        let expand = move |item: T| -> Box<dyn Iterator<Item = U>> {
            Box::new(f(item).into_iter())
        };
        Sequence::from_operator(FlatMapOp::new(self.clone(), Rc::new(expand)))
    }

    pub fn flatten<U>(&self) -> Sequence<U>
    where
        T: IntoIterator<Item = U>,
        T::IntoIter: 'static,
        U: Clone + 'static,
    {
        self.flat_map(|item: T| item)
    }

    /// `self` followed by one more element.
    pub fn append(&self, item: T) -> Sequence<T> {
        self.concat(vec![item])
    }

    pub fn concat<S: IntoSequence<T>>(&self, other: S) -> Sequence<T> {
        Self::from_operator(ConcatOp::new(self.clone(), other.into_sequence()))
    }

    /// `skip(0)` is `self`.
    pub fn skip(&self, n: i64) -> Result<Sequence<T>> {
        let n = non_negative(n, "skip count")?;
        if n == 0 {
            return Ok(self.clone());
        }
        Ok(Self::from_operator(SliceOp::new(self.clone(), n, None)))
    }

    /// `take(0)` is the canonical empty sequence.
    pub fn take(&self, n: i64) -> Result<Sequence<T>> {
        let n = non_negative(n, "take count")?;
        if n == 0 {
            return Ok(Self::empty());
        }
        Ok(Self::from_operator(SliceOp::new(self.clone(), 0, Some(n))))
    }

    /// `count == -1` leaves the window unbounded.
    pub fn slice(&self, offset: i64, count: i64) -> Result<Sequence<T>> {
        let offset = non_negative(offset, "slice offset")?;
        let count = match count {
            -1 => None,
            c => Some(non_negative(c, "slice count")?),
        };
        match (offset, count) {
            (_, Some(0)) => Ok(Self::empty()),
            (0, None) => Ok(self.clone()),
            (offset, count) => Ok(Self::from_operator(SliceOp::new(self.clone(), offset, count))),
        }
    }

    pub fn skip_while<F>(&self, reject: F) -> Sequence<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        Self::from_operator(SkipWhileOp::new(self.clone(), Rc::new(reject)))
    }

    pub fn take_while<F>(&self, accept: F) -> Sequence<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        Self::from_operator(TakeWhileOp::new(self.clone(), Rc::new(accept)))
    }

    pub fn zip<U, R, S, F>(&self, other: S, combine: F) -> Sequence<R>
    where
        U: Clone + 'static,
        R: Clone + 'static,
        S: IntoSequence<U>,
        F: Fn(T, U) -> R + 'static,
    {
        Sequence::from_operator(ZipOp::new(
            self.clone(),
            other.into_sequence(),
            Rc::new(combine),
        ))
    }

    pub fn chunk(&self, size: i64) -> Result<Sequence<Collection<T>>> {
        if size < 1 {
            return Err(Error::invalid(format!(
                "chunk size must be at least 1, got {size}"
            )));
        }
        let size = non_negative(size, "chunk size")?;
        Ok(Sequence::from_operator(ChunkOp::new(self.clone(), size)))
    }

    /// Elements not in `items` (structural equality). Duplicates in `self`
    /// are kept.
    pub fn except<S>(&self, items: S) -> Sequence<T>
    where
        T: Hash + Eq,
        S: IntoHashSet<T>,
    {
        self.except_with(items, Hashing::structural())
    }

    pub fn except_with<S>(&self, items: S, hashing: Hashing<T>) -> Sequence<T>
    where
        S: IntoHashSet<T>,
    {
        let set = items.into_hash_set(&hashing);
        self.filter(move |x| !set.contains(x))
    }

    /// Elements also in `items` (structural equality). Duplicates in `self`
    /// are kept.
    pub fn intersect<S>(&self, items: S) -> Sequence<T>
    where
        T: Hash + Eq,
        S: IntoHashSet<T>,
    {
        self.intersect_with(items, Hashing::structural())
    }

    pub fn intersect_with<S>(&self, items: S, hashing: Hashing<T>) -> Sequence<T>
    where
        S: IntoHashSet<T>,
    {
        let set = items.into_hash_set(&hashing);
        self.filter(move |x| set.contains(x))
    }

    /// Inner hash join on `left_key(l) == right_key(r)`.
    pub fn join<R, K, O, S, LK, RK, F>(
        &self,
        right: S,
        left_key: LK,
        right_key: RK,
        result: F,
    ) -> Sequence<O>
    where
        R: Clone + 'static,
        K: Hash + Eq + Clone + 'static,
        O: Clone + 'static,
        S: IntoSequence<R>,
        LK: Fn(&T) -> K + 'static,
        RK: Fn(&R) -> K + 'static,
        F: Fn(T, R) -> O + 'static,
    {
        Sequence::from_operator(HashJoinOp::new(
            self.clone(),
            right.into_sequence(),
            Rc::new(left_key),
            Rc::new(right_key),
            Rc::new(result),
        ))
    }
}

impl<T: 'static> Sequence<T> {
    /// Operator names in post-order, inputs left to right, ending with this
    /// node.
    pub fn lineage(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        self.op.lineage(&mut out);
        out
    }

    pub(crate) fn lineage_into(&self, out: &mut Vec<&'static str>) {
        self.op.lineage(out);
    }

    pub(crate) fn materialized(&self) -> Option<Rc<[T]>> {
        self.op.materialized()
    }

    /// Whether both handles denote the same pipeline node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.op, &other.op)
    }
}

impl<T: Clone + 'static> Default for Sequence<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: 'static> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("lineage", &self.lineage())
            .finish()
    }
}

/// `Sequence[array -> map -> take]`. Never traverses.
impl<T: 'static> fmt::Display for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sequence[{}]", self.lineage().join(" -> "))
    }
}

impl<T: 'static> Extensible for Sequence<T> {
    const TAG: TypeTag = TypeTag::Sequence;
}

/// Std iterator over one traversal. Fused.
pub struct Iter<T> {
    pull: BoxedPull<T>,
    started: bool,
    done: bool,
}

impl<T> Iterator for Iter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.done {
            return None;
        }
        if self.started {
            self.pull.advance();
        } else {
            self.pull.rewind();
            self.started = true;
        }
        let item = if self.pull.valid() {
            self.pull.current()
        } else {
            None
        };
        if item.is_none() {
            self.done = true;
        }
        item
    }
}

impl<T> std::iter::FusedIterator for Iter<T> {}

impl<T: Clone + 'static> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

impl<T: Clone + 'static> IntoIterator for &Sequence<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

impl<T: Clone + 'static> FromIterator<T> for Sequence<T> {
    /// Materializes eagerly.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}
