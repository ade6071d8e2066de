//! Response DTOs for the demo brands API
//!
//! Brand responses double as cached payloads, so they round-trip through
//! serde in both directions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brands::Brand;
use crate::store::StoreStats;

/// Response body for POST /brands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedBrandResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Brand> for CreatedBrandResponse {
    fn from(brand: &Brand) -> Self {
        Self {
            id: brand.id,
            name: brand.name.clone(),
            created_at: brand.created_at,
        }
    }
}

/// Response body for GET /brands/:id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetByIdBrandResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Brand> for GetByIdBrandResponse {
    fn from(brand: &Brand) -> Self {
        Self {
            id: brand.id,
            name: brand.name.clone(),
            created_at: brand.created_at,
        }
    }
}

/// Response body for DELETE /brands/:id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedBrandResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<&Brand> for DeletedBrandResponse {
    fn from(brand: &Brand) -> Self {
        Self {
            id: brand.id,
            name: brand.name.clone(),
        }
    }
}

/// One row of GET /brands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandListItem {
    pub id: Uuid,
    pub name: String,
}

impl From<&Brand> for BrandListItem {
    fn from(brand: &Brand) -> Self {
        Self {
            id: brand.id,
            name: brand.name.clone(),
        }
    }
}

/// A page of items with paging metadata. `index` is zero-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetListResponse<T> {
    pub index: u32,
    pub size: u32,
    /// Total items across all pages
    pub count: usize,
    pub pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> GetListResponse<T> {
    /// Builds a page; `size` must be non-zero.
    pub fn new(items: Vec<T>, index: u32, size: u32, count: usize) -> Self {
        let pages = count.div_ceil(size.max(1) as usize) as u32;
        Self {
            index,
            size,
            count,
            pages,
            has_previous: index > 0,
            has_next: index.saturating_add(1) < pages,
            items,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<StoreStats> for StatsResponse {
    fn from(stats: StoreStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
