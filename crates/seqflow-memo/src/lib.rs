#![forbid(unsafe_code)]
//! seqflow-memo: makes a single-pass source safely multi-consumable.
//!
//! A `MemoCache` owns one source and buffers what it produces by index, pulling
//! each element at most once. Any number of `Cursor`s read the buffer, each
//! with its own position, so traversals never disturb one another.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`).

pub mod cache;
pub mod cursor;
pub mod tracking;

pub use cache::MemoCache;
pub use cursor::Cursor;
pub use tracking::PullTracker;
