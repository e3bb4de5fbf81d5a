#![forbid(unsafe_code)]
//! seqflow: lazy, memoized sequence pipelines and persistent hash collections.
//!
//! ```ignore
//! use seqflow::prelude::*;
//!
//! let evens = xrange(1, 10, 1)?.filter(|x| x % 2 == 0).take(3)?;
//! assert_eq!(evens.to_vec(), vec![2, 4, 6]);
//! ```
//!
//! The member crates are re-exported for callers that need the lower layers
//! (`memo` for caches and cursors, `operators` for custom nodes).

pub use seqflow_collections as collections;
pub use seqflow_core::{config, error, hash, id, registry};
pub use seqflow_memo as memo;
pub use seqflow_operators as operators;
pub use seqflow_operators::lambda;

pub use seqflow_collections::{
    Collection, Dictionary, GroupedCollection, Grouping, HashSet, IndexedView, IntoHashSet,
};
pub use seqflow_core::{Error, Extensible, Hashing, Identity, Result, SeqflowConfig, TypeTag};
pub use seqflow_operators::{
    collect, dictionary, infinite, pick, repeat, sequence, set, set_with, source, xrange,
    AsSequence, IntoSequence, Sequence, Source,
};

pub mod prelude {
    //! Everything needed for day-to-day pipeline code.

    pub use seqflow_collections::{
        Collection, Dictionary, GroupedCollection, Grouping, HashSet, IndexedView, IntoHashSet,
    };
    pub use seqflow_core::prelude::*;
    pub use seqflow_operators::{
        collect, dictionary, infinite, pick, repeat, sequence, set, set_with, source, xrange,
        AsSequence, IntoSequence, Sequence, Source,
    };
}
