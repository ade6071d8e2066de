//! Brands Feature
//!
//! Demo host for the pipeline stages: an in-memory brand catalogue whose
//! reads go through the caching stage and whose writes invalidate it.

mod commands;
mod queries;
mod repository;
mod service;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use commands::{CreateBrandCommand, DeleteBrandCommand};
pub use queries::{GetBrandByIdQuery, GetBrandListQuery};
pub use repository::BrandRepository;
pub use service::BrandService;

/// Cache group shared by every brand list response.
pub const BRANDS_GROUP: &str = "GetBrands";

/// Cache key of a single brand's response.
pub fn brand_cache_key(id: Uuid) -> String {
    format!("brands:{}", id)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Brand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}
