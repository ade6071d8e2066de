//! Serializer Module
//!
//! Converts typed responses to and from the byte payloads kept in the store.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{PipelineError, Result};

/// Codec used by the pipeline stages for cached payloads.
///
/// `key` is passed to `deserialize` so decode failures can name the entry.
pub trait Serializer: Send + Sync {
    fn serialize<T: Serialize>(&self, value: &T) -> Result<Vec<u8>>;

    fn deserialize<T: DeserializeOwned>(&self, key: &str, bytes: &[u8]) -> Result<T>;
}

// == JSON Serializer ==
/// UTF-8 JSON codec backed by serde_json.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(PipelineError::Serialization)
    }

    fn deserialize<T: DeserializeOwned>(&self, key: &str, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|source| PipelineError::Deserialization {
            key: key.to_string(),
            source,
        })
    }
}
