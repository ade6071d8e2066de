//! Caching Stage
//!
//! Get-or-compute-and-store around read-type handlers.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use crate::config::CacheSettings;
use crate::error::{PipelineError, Result};
use crate::pipeline::{run_cancellable, CancelToken, GroupIndex, SingleFlight};
use crate::request::CacheableRequest;
use crate::serializer::{JsonSerializer, Serializer};
use crate::store::{CacheStore, EntryOptions};

// == Caching Stage ==
/// Serves cached responses for [`CacheableRequest`]s and stores fresh ones.
///
/// Without single-flight two concurrent misses on one key both run the
/// handler and both write; the last write to land wins.
pub struct CachingStage<S = JsonSerializer> {
    store: Arc<dyn CacheStore>,
    serializer: S,
    groups: GroupIndex<S>,
    default_expiration: Duration,
    flights: Option<Arc<SingleFlight>>,
}

impl<S: Serializer + Clone> CachingStage<S> {
    // == Constructor ==
    /// Fails fast when the configured default expiration is unusable.
    pub fn new(store: Arc<dyn CacheStore>, serializer: S, settings: &CacheSettings) -> Result<Self> {
        if settings.sliding_expiration.is_zero() {
            return Err(PipelineError::Configuration(
                "default sliding expiration must be greater than zero".to_string(),
            ));
        }

        let stage = Self {
            groups: GroupIndex::new(store.clone(), serializer.clone()),
            store,
            serializer,
            default_expiration: settings.sliding_expiration,
            flights: None,
        };

        Ok(if settings.single_flight {
            stage.with_single_flight()
        } else {
            stage
        })
    }

    /// Collapses concurrent misses for the same key into one handler call.
    pub fn with_single_flight(mut self) -> Self {
        self.flights = Some(Arc::new(SingleFlight::new()));
        self
    }

    pub fn groups(&self) -> &GroupIndex<S> {
        &self.groups
    }

    // == Handle ==
    /// Returns the cached response for `request`, or runs `next`, stores
    /// its response and returns it.
    ///
    /// A cached payload that fails to decode is an error, not a miss.
    pub async fn handle<Req, Resp, F, Fut>(
        &self,
        request: &Req,
        cancel: &CancelToken,
        next: F,
    ) -> Result<Resp>
    where
        Req: CacheableRequest + ?Sized,
        Resp: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Resp>>,
    {
        if request.bypass_cache() {
            return run_cancellable(cancel, next()).await;
        }

        let key = request.cache_key();
        if let Some(response) = self.lookup(&key, cancel).await? {
            return Ok(response);
        }

        let Some(flights) = &self.flights else {
            return self.compute_and_store(request, &key, cancel, next).await;
        };

        let _flight = run_cancellable(cancel, async { Ok(flights.acquire(&key).await) }).await?;
        // Whoever held the gate before us may have filled the entry
        if let Some(response) = self.lookup(&key, cancel).await? {
            return Ok(response);
        }
        self.compute_and_store(request, &key, cancel, next).await
    }

    async fn lookup<Resp: DeserializeOwned>(
        &self,
        key: &str,
        cancel: &CancelToken,
    ) -> Result<Option<Resp>> {
        match run_cancellable(cancel, self.store.get(key)).await? {
            Some(bytes) if !bytes.is_empty() => {
                let response = self.serializer.deserialize(key, &bytes)?;
                info!(key, "Fetched from cache");
                Ok(Some(response))
            }
            _ => {
                debug!(key, "Cache miss");
                Ok(None)
            }
        }
    }

    async fn compute_and_store<Req, Resp, F, Fut>(
        &self,
        request: &Req,
        key: &str,
        cancel: &CancelToken,
        next: F,
    ) -> Result<Resp>
    where
        Req: CacheableRequest + ?Sized,
        Resp: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Resp>>,
    {
        let response = run_cancellable(cancel, next()).await?;

        let sliding = request
            .sliding_expiration()
            .unwrap_or(self.default_expiration);
        let payload = self.serializer.serialize(&response)?;

        run_cancellable(cancel, self.store.set(key, payload, EntryOptions::sliding(sliding)))
            .await?;
        info!(key, expiration_secs = sliding.as_secs(), "Added to cache");

        if let Some(group) = request.cache_group_key() {
            self.groups.add_member(&group, key, sliding, cancel).await?;
        }

        Ok(response)
    }
}
