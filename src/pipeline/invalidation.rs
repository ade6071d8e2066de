//! Invalidation Stage
//!
//! Runs a write-type handler and, only once it succeeds, removes the cache
//! entries its request names.

use std::future::Future;
use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::pipeline::{run_cancellable, CancelToken, GroupIndex};
use crate::request::CacheRemoverRequest;
use crate::serializer::{JsonSerializer, Serializer};
use crate::store::CacheStore;

pub struct InvalidationStage<S = JsonSerializer> {
    store: Arc<dyn CacheStore>,
    groups: GroupIndex<S>,
}

impl<S: Serializer> InvalidationStage<S> {
    pub fn new(store: Arc<dyn CacheStore>, serializer: S) -> Self {
        Self {
            groups: GroupIndex::new(store.clone(), serializer),
            store,
        }
    }

    // == Handle ==
    /// Runs `next`; on success removes the single key, then every member of
    /// the group, and returns the handler's response unchanged. A failed
    /// handler leaves the store untouched.
    pub async fn handle<Req, Resp, F, Fut>(
        &self,
        request: &Req,
        cancel: &CancelToken,
        next: F,
    ) -> Result<Resp>
    where
        Req: CacheRemoverRequest + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Resp>>,
    {
        let response = run_cancellable(cancel, next()).await?;

        if request.bypass_cache() {
            return Ok(response);
        }

        if let Some(key) = request.cache_key().filter(|key| !key.is_empty()) {
            run_cancellable(cancel, self.store.remove(&key)).await?;
            info!(key = %key, "Removed from cache");
        }

        if let Some(group) = request.cache_group_key().filter(|group| !group.is_empty()) {
            self.groups.remove_group(&group, cancel).await?;
        }

        Ok(response)
    }
}
