#![forbid(unsafe_code)]
//! seqflow-operators: lazy pipelines over memoized sources.
//!
//! Design intent:
//! - Every operator node is an immutable description (`Operator`). Building a
//!   pipeline does no work.
//! - `Operator::open` hands out a fresh `Pull` state machine per traversal, so
//!   one `Sequence` can be walked any number of times, even concurrently
//!   interleaved (e.g. zipped with itself).
//! - Single-pass sources sit behind a `MemoCache`; each element is pulled once
//!   no matter how many traversals read it.
//! - Terminal reducers and `group_by` are the only eager operations.

pub mod traits;

pub mod chunk;
pub mod concat;
pub mod cycle;
pub mod filter;
pub mod flat_map;
pub mod join;
pub mod map;
pub mod prefix;
pub mod slice;
pub mod source;
pub mod zip;

pub mod convert;
pub mod factory;
pub mod lambda;
pub mod reduce;
pub mod sequence;

pub use convert::{AsSequence, IntoSequence};
pub use factory::{
    collect, dictionary, infinite, pick, repeat, sequence, set, set_with, source, xrange, Source,
};
pub use sequence::{Iter, Sequence};
pub use traits::{BoxedPull, Operator, Pull};
