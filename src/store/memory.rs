//! Memory Store Module
//!
//! In-process `CacheStore` backend: HashMap storage with recency tracking and
//! sliding expiration.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::store::{
    CacheEntry, CacheStore, EntryOptions, RecencyTracker, StoreStats, MAX_KEY_LENGTH,
    MAX_VALUE_SIZE,
};

#[derive(Debug, Default)]
struct StoreState {
    entries: HashMap<String, CacheEntry>,
    recency: RecencyTracker,
    stats: StoreStats,
}

impl StoreState {
    fn drop_key(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.recency.remove(key);
        self.stats.set_total_entries(self.entries.len());
        removed
    }
}

// == Memory Store ==
/// Bounded in-memory store. Reads renew the sliding window of live entries.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store that holds at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            max_entries,
        }
    }

    // == Stats ==
    /// Returns a snapshot of the store statistics.
    pub async fn stats(&self) -> StoreStats {
        let state = self.state.lock().await;
        let mut stats = state.stats.clone();
        stats.set_total_entries(state.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were dropped.
    pub async fn cleanup_expired(&self) -> usize {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        let expired: Vec<String> = state
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            state.drop_key(key);
        }
        state.stats.record_expirations(expired.len());
        expired.len()
    }

    /// Reports whether a live entry exists, without renewing it.
    pub async fn contains(&self, key: &str) -> bool {
        let state = self.state.lock().await;
        state
            .entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        let expired = match state.entries.get_mut(key) {
            None => {
                state.stats.record_miss();
                return Ok(None);
            }
            Some(entry) if entry.is_expired() => true,
            Some(entry) => {
                entry.renew();
                false
            }
        };

        if expired {
            state.drop_key(key);
            state.stats.record_expirations(1);
            state.stats.record_miss();
            debug!(key, "Entry expired on read");
            return Ok(None);
        }

        state.recency.touch(key);
        state.stats.record_hit();
        Ok(state.entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, options: EntryOptions) -> Result<()> {
        if key.is_empty() {
            return Err(PipelineError::InvalidRequest(
                "Key cannot be empty".to_string(),
            ));
        }

        if key.len() > MAX_KEY_LENGTH {
            return Err(PipelineError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        if value.len() > MAX_VALUE_SIZE {
            return Err(PipelineError::InvalidRequest(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        let mut state = self.state.lock().await;

        // Only a new key can push the store past capacity
        if !state.entries.contains_key(key) && state.entries.len() >= self.max_entries {
            match state.recency.evict_oldest() {
                Some(evicted) => {
                    state.entries.remove(&evicted);
                    state.stats.record_eviction();
                    debug!(key = %evicted, "Evicted least recently used entry");
                }
                None => {
                    return Err(PipelineError::Store(
                        "Store is full and eviction failed".to_string(),
                    ));
                }
            }
        }

        let entry = CacheEntry::new(value, options.sliding_expiration);
        state.entries.insert(key.to_string(), entry);
        state.recency.touch(key);

        let total = state.entries.len();
        state.stats.set_total_entries(total);

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        state.drop_key(key);
        Ok(())
    }
}
