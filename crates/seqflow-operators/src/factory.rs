//! Free-standing constructors.

use std::hash::Hash;

use seqflow_collections::{Collection, Dictionary, HashSet, IntoHashSet};
use seqflow_core::error::{Error, Result};
use seqflow_core::hash::Hashing;

use crate::convert::IntoSequence;
use crate::cycle::RepeatOp;
use crate::sequence::Sequence;
use crate::source::RangeOp;

/// Marks an iterator as a single-pass source to be memoized.
///
/// `sequence(source(rx.into_iter()))` pulls from `rx` lazily and once.
pub struct Source<I>(pub I);

pub fn source<I: IntoIterator>(iter: I) -> Source<I> {
    Source(iter)
}

pub fn sequence<T, S>(src: S) -> Sequence<T>
where
    T: Clone + 'static,
    S: IntoSequence<T>,
{
    src.into_sequence()
}

pub fn collect<T, S>(src: S) -> Collection<T>
where
    T: Clone + 'static,
    S: IntoSequence<T>,
{
    src.into_sequence().collect()
}

/// Structural set. An existing structural set is returned unchanged.
pub fn set<T, S>(src: S) -> HashSet<T>
where
    T: Hash + Eq + Clone + 'static,
    S: IntoHashSet<T>,
{
    src.into_hash_set(&Hashing::structural())
}

/// Set under `hashing`. An existing set with the same strategy is returned
/// unchanged.
pub fn set_with<T, S>(src: S, hashing: Hashing<T>) -> HashSet<T>
where
    T: Clone + 'static,
    S: IntoHashSet<T>,
{
    src.into_hash_set(&hashing)
}

pub fn dictionary<K, V, I>(pairs: I) -> Result<Dictionary<K, V>>
where
    K: Hash + Eq + Clone + 'static,
    V: Clone + 'static,
    I: IntoIterator<Item = (K, V)>,
{
    Dictionary::from_pairs(pairs)
}

/// Inclusive range from `start` to `end`. `step` is a positive magnitude;
/// counting runs downwards when `start > end`.
pub fn xrange(start: i64, end: i64, step: i64) -> Result<Sequence<i64>> {
    if step <= 0 {
        return Err(Error::invalid(format!(
            "xrange step must be positive, got {step}"
        )));
    }
    Ok(Sequence::from_operator(RangeOp::new(start, end, step)))
}

/// `src` traversed `count` times back to back.
pub fn repeat<T, S>(src: S, count: i64) -> Result<Sequence<T>>
where
    T: Clone + 'static,
    S: IntoSequence<T>,
{
    match count {
        0 => Ok(Sequence::empty()),
        c if c < 0 => Err(Error::invalid(format!(
            "repeat count must be non-negative, got {c}"
        ))),
        c => {
            let times = usize::try_from(c)
                .map_err(|_| Error::invalid(format!("repeat count {c} does not fit in usize")))?;
            Ok(Sequence::from_operator(RepeatOp::new(src.into_sequence(), Some(times))))
        }
    }
}

/// `src` cycled forever. An empty `src` gives an empty sequence.
pub fn infinite<T, S>(src: S) -> Sequence<T>
where
    T: Clone + 'static,
    S: IntoSequence<T>,
{
    Sequence::from_operator(RepeatOp::new(src.into_sequence(), None))
}

/// Eagerly takes up to `count` elements.
pub fn pick<T, S>(src: S, count: i64) -> Result<Vec<T>>
where
    T: Clone + 'static,
    S: IntoSequence<T>,
{
    Ok(src.into_sequence().take(count)?.to_vec())
}
