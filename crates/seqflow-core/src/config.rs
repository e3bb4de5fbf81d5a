//! Runtime configuration shared by the seqflow crates.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static GLOBAL: Lazy<SeqflowConfig> = Lazy::new(SeqflowConfig::from_env);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeqflowConfig {
    /// Initial buffer capacity of a memo cache over a single-pass source.
    pub cache_initial_capacity: usize,

    /// Initial capacity of the hash indexes built by sets, dictionaries and groupings.
    pub hash_initial_capacity: usize,

    /// Upper bound on what `chunk(n)` pre-allocates per chunk. Larger chunks grow on demand.
    pub chunk_prealloc_limit: usize,
}

impl Default for SeqflowConfig {
    fn default() -> Self {
        Self {
            cache_initial_capacity: 16,
            hash_initial_capacity: 16,
            chunk_prealloc_limit: 1024,
        }
    }
}

impl SeqflowConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `SEQFLOW_CACHE_INITIAL_CAPACITY`: memo cache buffer capacity
    /// - `SEQFLOW_HASH_INITIAL_CAPACITY`: hash index capacity
    /// - `SEQFLOW_CHUNK_PREALLOC_LIMIT`: chunk pre-allocation cap
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(v) = env_usize("SEQFLOW_CACHE_INITIAL_CAPACITY") {
            cfg.cache_initial_capacity = v;
        }

        if let Some(v) = env_usize("SEQFLOW_HASH_INITIAL_CAPACITY") {
            cfg.hash_initial_capacity = v;
        }

        if let Some(v) = env_usize("SEQFLOW_CHUNK_PREALLOC_LIMIT") {
            cfg.chunk_prealloc_limit = v;
        }

        cfg
    }

    /// Process-wide snapshot, read from the environment on first use.
    pub fn global() -> &'static SeqflowConfig {
        &GLOBAL
    }
}

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok()?.trim().parse::<usize>().ok()
}
