//! Request DTOs for the demo brands API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

/// Longest brand name accepted
pub const MAX_NAME_LENGTH: usize = 100;

/// Largest page a list request may ask for
pub const MAX_PAGE_SIZE: u32 = 100;

/// Request body for POST /brands
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBrandRequest {
    pub name: String,
}

impl CreateBrandRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Some("Brand name cannot be empty".to_string());
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Some(format!(
                "Brand name exceeds maximum length of {} characters",
                MAX_NAME_LENGTH
            ));
        }
        None
    }
}

/// Query string accepted by cacheable GET endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheParams {
    /// Skip the cache entirely for this call
    #[serde(default)]
    pub bypass_cache: bool,
}

/// Query string for GET /brands
#[derive(Debug, Clone, Deserialize)]
pub struct ListBrandsParams {
    #[serde(default)]
    pub page_index: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub bypass_cache: bool,
}

fn default_page_size() -> u32 {
    10
}

impl ListBrandsParams {
    pub fn validate(&self) -> Option<String> {
        if self.page_size == 0 {
            return Some("Page size must be greater than zero".to_string());
        }
        if self.page_size > MAX_PAGE_SIZE {
            return Some(format!("Page size cannot exceed {}", MAX_PAGE_SIZE));
        }
        None
    }
}
