//! Store Module
//!
//! Byte-oriented key-value store contract consumed by the pipeline stages,
//! plus an in-memory backend with sliding expiration and LRU eviction.

mod entry;
mod memory;
mod recency;
mod stats;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::CacheEntry;
pub use memory::MemoryStore;
pub use recency::RecencyTracker;
pub use stats::StoreStats;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed payload size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Entry Options ==
/// Expiration policy attached to a single `set`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryOptions {
    /// Window renewed on every successful read or write; `None` never expires
    pub sliding_expiration: Option<Duration>,
}

impl EntryOptions {
    pub fn sliding(window: Duration) -> Self {
        Self {
            sliding_expiration: Some(window),
        }
    }
}

// == Cache Store Contract ==
/// Key-value store the pipeline reads from and writes to.
///
/// A single call is atomic per key; nothing spans multiple keys.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the payload under `key`, renewing its sliding window.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous payload.
    async fn set(&self, key: &str, value: Vec<u8>, options: EntryOptions) -> Result<()>;

    /// Removes `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;
}
