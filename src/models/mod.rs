//! Request and Response models for the demo brands API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP bodies and cached responses.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CacheParams, CreateBrandRequest, ListBrandsParams};
pub use responses::{
    BrandListItem, CreatedBrandResponse, DeletedBrandResponse, GetByIdBrandResponse,
    GetListResponse, HealthResponse, StatsResponse,
};
