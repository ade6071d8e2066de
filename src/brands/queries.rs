//! Read-side brand requests served through the caching stage.

use std::time::Duration;

use uuid::Uuid;

use crate::brands::{brand_cache_key, BRANDS_GROUP};
use crate::request::CacheableRequest;

/// Lists go stale on every create or delete, so they get a shorter window.
const LIST_SLIDING_EXPIRATION: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
pub struct GetBrandByIdQuery {
    pub id: Uuid,
    pub bypass_cache: bool,
}

impl CacheableRequest for GetBrandByIdQuery {
    fn cache_key(&self) -> String {
        brand_cache_key(self.id)
    }

    fn bypass_cache(&self) -> bool {
        self.bypass_cache
    }
}

#[derive(Debug, Clone)]
pub struct GetBrandListQuery {
    pub page_index: u32,
    pub page_size: u32,
    pub bypass_cache: bool,
}

impl CacheableRequest for GetBrandListQuery {
    fn cache_key(&self) -> String {
        format!("GetBrandList({},{})", self.page_index, self.page_size)
    }

    fn bypass_cache(&self) -> bool {
        self.bypass_cache
    }

    fn cache_group_key(&self) -> Option<String> {
        Some(BRANDS_GROUP.to_string())
    }

    fn sliding_expiration(&self) -> Option<Duration> {
        Some(LIST_SLIDING_EXPIRATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_key_depends_on_page() {
        let first = GetBrandListQuery {
            page_index: 0,
            page_size: 10,
            bypass_cache: false,
        };
        let second = GetBrandListQuery {
            page_index: 1,
            ..first.clone()
        };

        assert_eq!(first.cache_key(), "GetBrandList(0,10)");
        assert_ne!(first.cache_key(), second.cache_key());
        assert_eq!(first.cache_group_key().as_deref(), Some(BRANDS_GROUP));
    }

    #[test]
    fn test_by_id_query_has_no_group() {
        let query = GetBrandByIdQuery {
            id: Uuid::nil(),
            bypass_cache: false,
        };
        assert_eq!(
            query.cache_key(),
            "brands:00000000-0000-0000-0000-000000000000"
        );
        assert!(query.cache_group_key().is_none());
        assert!(query.sliding_expiration().is_none());
    }
}
