#![forbid(unsafe_code)]
//! seqflow-collections: persistent (copy-on-write) collections.
//!
//! Every "mutation" returns a new value and leaves the receiver untouched.
//! Unchanged results are the receiver itself, so `ptr_eq` can tell a no-op
//! from a real change. Storage is `Rc`-shared between versions.

pub mod collection;
pub mod dictionary;
pub mod grouping;
pub mod hash_set;
pub mod view;

pub use collection::Collection;
pub use dictionary::Dictionary;
pub use grouping::{GroupedCollection, Grouping};
pub use hash_set::{HashSet, IntoHashSet};
pub use view::IndexedView;
