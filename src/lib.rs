//! Cache Pipeline - cache-aside request pipeline stages
//!
//! Serves read-type requests from a key-value store, stores fresh responses
//! with sliding expiration, tracks cache groups, and invalidates entries or
//! whole groups after successful writes.

pub mod api;
pub mod brands;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod request;
pub mod serializer;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::{CacheSettings, Config};
pub use error::{PipelineError, Result};
pub use pipeline::{CachingStage, CancelToken, GroupIndex, InvalidationStage};
pub use request::{CacheRemoverRequest, CacheableRequest};
pub use serializer::{JsonSerializer, Serializer};
pub use store::{CacheStore, EntryOptions, MemoryStore};
pub use tasks::spawn_cleanup_task;
