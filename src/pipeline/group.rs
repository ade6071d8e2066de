//! Group Index
//!
//! Keeps, per group key, the set of member cache keys and the widest sliding
//! expiration any member asked for. Both live in the store:
//!
//! - `{group}` holds the membership set (JSON array of unique keys)
//! - `{group}SlidingExpiration` holds the expiration record (whole seconds)
//!
//! Updates are read-merge-write across two keys with no compare-and-swap, so
//! two members joining the same group concurrently can lose one addition.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::Result;
use crate::pipeline::{run_cancellable, CancelToken};
use crate::serializer::{JsonSerializer, Serializer};
use crate::store::{CacheStore, EntryOptions};

/// Suffix of the key holding a group's expiration record.
pub const EXPIRATION_RECORD_SUFFIX: &str = "SlidingExpiration";

/// Returns the store key of `group`'s expiration record.
pub fn expiration_record_key(group: &str) -> String {
    format!("{}{}", group, EXPIRATION_RECORD_SUFFIX)
}

// == Group Index ==
#[derive(Clone)]
pub struct GroupIndex<S = JsonSerializer> {
    store: Arc<dyn CacheStore>,
    serializer: S,
}

impl<S: Serializer> GroupIndex<S> {
    pub fn new(store: Arc<dyn CacheStore>, serializer: S) -> Self {
        Self { store, serializer }
    }

    // == Add Member ==
    /// Adds `member` to `group` and widens the group's expiration to at
    /// least `requested`.
    ///
    /// The record is kept in whole seconds; anything under a second counts
    /// as one so the group entry never gets a zero window.
    pub async fn add_member(
        &self,
        group: &str,
        member: &str,
        requested: Duration,
        cancel: &CancelToken,
    ) -> Result<()> {
        let mut members = self.members(group, cancel).await?;
        if !members.insert(member.to_string()) {
            debug!(group, member, "Key already in cache group");
        }

        let requested_secs = requested.as_secs().max(1);
        let widest = match self.expiration_secs(group, cancel).await? {
            Some(current) => current.max(requested_secs),
            None => requested_secs,
        };
        let options = EntryOptions::sliding(Duration::from_secs(widest));

        let payload = self.serializer.serialize(&members)?;
        run_cancellable(cancel, self.store.set(group, payload, options)).await?;
        info!(group, members = members.len(), "Added to cache group");

        let record_key = expiration_record_key(group);
        let record = self.serializer.serialize(&widest)?;
        run_cancellable(cancel, self.store.set(&record_key, record, options)).await?;
        debug!(key = %record_key, seconds = widest, "Updated group expiration record");

        Ok(())
    }

    // == Members ==
    /// Returns the current membership set; an absent group is empty.
    pub async fn members(&self, group: &str, cancel: &CancelToken) -> Result<BTreeSet<String>> {
        match run_cancellable(cancel, self.store.get(group)).await? {
            Some(bytes) if !bytes.is_empty() => self.serializer.deserialize(group, &bytes),
            _ => Ok(BTreeSet::new()),
        }
    }

    // == Expiration ==
    /// Returns the widest sliding expiration recorded for `group`.
    pub async fn expiration(&self, group: &str, cancel: &CancelToken) -> Result<Option<Duration>> {
        Ok(self
            .expiration_secs(group, cancel)
            .await?
            .map(Duration::from_secs))
    }

    async fn expiration_secs(&self, group: &str, cancel: &CancelToken) -> Result<Option<u64>> {
        let record_key = expiration_record_key(group);
        match run_cancellable(cancel, self.store.get(&record_key)).await? {
            Some(bytes) if !bytes.is_empty() => {
                self.serializer.deserialize(&record_key, &bytes).map(Some)
            }
            _ => Ok(None),
        }
    }

    // == Remove Group ==
    /// Removes every member entry, then the membership set and the
    /// expiration record. Returns the number of member keys removed.
    pub async fn remove_group(&self, group: &str, cancel: &CancelToken) -> Result<usize> {
        let members = self.members(group, cancel).await?;

        for member in &members {
            run_cancellable(cancel, self.store.remove(member)).await?;
            info!(key = %member, group, "Removed from cache");
        }

        run_cancellable(cancel, self.store.remove(group)).await?;
        run_cancellable(cancel, self.store.remove(&expiration_record_key(group))).await?;
        info!(group, removed = members.len(), "Removed cache group");

        Ok(members.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn setup() -> (Arc<MemoryStore>, GroupIndex) {
        let store = Arc::new(MemoryStore::new(100));
        let index = GroupIndex::new(store.clone(), JsonSerializer);
        (store, index)
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[tokio::test]
    async fn test_add_member_creates_group() {
        let (store, index) = setup();
        let cancel = CancelToken::new();

        index.add_member("brands-list", "brands:1", secs(60), &cancel).await.unwrap();

        let members = index.members("brands-list", &cancel).await.unwrap();
        assert_eq!(members.into_iter().collect::<Vec<_>>(), vec!["brands:1"]);
        assert_eq!(index.expiration("brands-list", &cancel).await.unwrap(), Some(secs(60)));
        assert!(store.contains("brands-listSlidingExpiration").await);
    }

    #[tokio::test]
    async fn test_add_member_is_idempotent() {
        let (_, index) = setup();
        let cancel = CancelToken::new();

        index.add_member("g", "k", secs(60), &cancel).await.unwrap();
        index.add_member("g", "k", secs(60), &cancel).await.unwrap();

        assert_eq!(index.members("g", &cancel).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_expiration_never_shrinks() {
        let (_, index) = setup();
        let cancel = CancelToken::new();

        index.add_member("g", "a", secs(600), &cancel).await.unwrap();
        index.add_member("g", "b", secs(60), &cancel).await.unwrap();

        assert_eq!(index.expiration("g", &cancel).await.unwrap(), Some(secs(600)));
        assert_eq!(index.members("g", &cancel).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_sub_second_expiration_rounds_up_to_one() {
        let (_, index) = setup();
        let cancel = CancelToken::new();

        index.add_member("g", "a", Duration::from_millis(250), &cancel).await.unwrap();

        assert_eq!(index.expiration("g", &cancel).await.unwrap(), Some(secs(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_record_resets() {
        let (_, index) = setup();
        let cancel = CancelToken::new();

        index.add_member("g", "a", secs(600), &cancel).await.unwrap();
        tokio::time::advance(secs(601)).await;

        index.add_member("g", "b", secs(30), &cancel).await.unwrap();

        assert_eq!(index.expiration("g", &cancel).await.unwrap(), Some(secs(30)));
        let members = index.members("g", &cancel).await.unwrap();
        assert_eq!(members.into_iter().collect::<Vec<_>>(), vec!["b"]);
    }

    #[tokio::test]
    async fn test_remove_group_clears_members_and_records() {
        let (store, index) = setup();
        let cancel = CancelToken::new();

        for key in ["brands:1", "brands:2"] {
            store.set(key, b"{}".to_vec(), EntryOptions::sliding(secs(60))).await.unwrap();
            index.add_member("brands-list", key, secs(60), &cancel).await.unwrap();
        }

        let removed = index.remove_group("brands-list", &cancel).await.unwrap();

        assert_eq!(removed, 2);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_remove_missing_group_is_noop() {
        let (_, index) = setup();
        let removed = index.remove_group("none", &CancelToken::new()).await.unwrap();
        assert_eq!(removed, 0);
    }

    #[tokio::test]
    async fn test_cancelled_add_member_writes_nothing() {
        let (store, index) = setup();
        let cancel = CancelToken::new();
        cancel.cancel();

        let result = index.add_member("g", "a", secs(60), &cancel).await;

        assert!(matches!(result, Err(crate::error::PipelineError::Cancelled)));
        assert!(store.is_empty().await);
    }
}
