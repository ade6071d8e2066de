//! Request Capabilities
//!
//! Traits a request type opts into to become eligible for the caching or
//! invalidation stage.

use std::time::Duration;

/// A read-type request whose response may be served from the cache.
pub trait CacheableRequest {
    /// Deterministic key for this request's response.
    fn cache_key(&self) -> String;

    /// When true the caching stage neither reads nor writes the store.
    fn bypass_cache(&self) -> bool {
        false
    }

    /// Group the cached response joins, if any.
    fn cache_group_key(&self) -> Option<String> {
        None
    }

    /// Overrides the configured default sliding expiration.
    fn sliding_expiration(&self) -> Option<Duration> {
        None
    }
}

/// A write-type request that invalidates cached responses once it succeeds.
pub trait CacheRemoverRequest {
    /// Single entry to remove. An empty key counts as absent.
    fn cache_key(&self) -> Option<String> {
        None
    }

    /// Group whose members are all removed. An empty key counts as absent.
    fn cache_group_key(&self) -> Option<String> {
        None
    }

    /// When true the invalidation stage leaves the store untouched.
    fn bypass_cache(&self) -> bool {
        false
    }
}
