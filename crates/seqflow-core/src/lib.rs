#![forbid(unsafe_code)]
//! seqflow-core: shared vocabulary for the seqflow workspace.
//!
//! This crate holds the pieces every other crate agrees on:
//! - the error taxonomy and `Result` alias,
//! - runtime configuration (`SeqflowConfig`),
//! - hashing strategies used by the persistent collections,
//! - strongly-typed identity tokens,
//! - the process-wide extension registry.
//!
//! It performs no IO and does no logging.

pub mod config;
pub mod error;
pub mod hash;
pub mod id;
pub mod prelude;
pub mod registry;

pub use config::SeqflowConfig;
pub use error::{Error, Result};
pub use hash::{stable_hash, Hashing, Identity, StableHasher};
pub use id::{CacheId, ObjectId};
pub use registry::{Extensible, TypeTag};
