//! Strongly-typed identifiers.
//!
//! Caches and identity-hashed values carry an allocation-order token instead of
//! relying on addresses, so identity survives moves and is stable for tracing.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! new_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(v: u64) -> Self {
                Self(v)
            }
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Hand out the next token of this kind. Tokens are unique per process.
            pub fn next() -> Self {
                use std::sync::atomic::{AtomicU64, Ordering};
                static NEXT: AtomicU64 = AtomicU64::new(1);
                Self(NEXT.fetch_add(1, Ordering::Relaxed))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

new_id!(CacheId);
new_id!(ObjectId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_monotonic() {
        let a = ObjectId::next();
        let b = ObjectId::next();
        assert!(b > a);
        assert_ne!(CacheId::next(), CacheId::next());
    }

    #[test]
    fn test_display() {
        assert_eq!(CacheId::new(7).to_string(), "CacheId(7)");
    }
}
