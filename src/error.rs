//! Error types for the cache pipeline
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Pipeline Error Enum ==
/// Unified error type for the pipeline stages, the store and the demo host.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Caching configuration missing or unusable at construction time
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backing store failed or is unavailable
    #[error("Store unavailable: {0}")]
    Store(String),

    /// Backing store did not answer in time
    #[error("Store timeout: {0}")]
    Timeout(String),

    /// Response could not be encoded for storage
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Cached payload could not be decoded into the response type
    #[error("Failed to deserialize cached entry '{key}': {source}")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The originating request was cancelled mid-flight
    #[error("Operation cancelled")]
    Cancelled,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status = match &self {
            PipelineError::NotFound(_) => StatusCode::NOT_FOUND,
            PipelineError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            PipelineError::Cancelled => StatusCode::REQUEST_TIMEOUT,
            PipelineError::Store(_) | PipelineError::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            PipelineError::Configuration(_)
            | PipelineError::Serialization(_)
            | PipelineError::Deserialization { .. }
            | PipelineError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache pipeline.
pub type Result<T> = std::result::Result<T, PipelineError>;
