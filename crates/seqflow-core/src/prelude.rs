//! Convenient re-exports for downstream crates.

pub use crate::config::SeqflowConfig;
pub use crate::error::{Error, Result};
pub use crate::hash::{stable_hash, Hashing, Identity};
pub use crate::id::{CacheId, ObjectId};
pub use crate::registry::{Extensible, TypeTag};
