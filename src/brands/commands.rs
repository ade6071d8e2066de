//! Write-side brand requests. Both invalidate cached brand lists.

use uuid::Uuid;

use crate::brands::{brand_cache_key, BRANDS_GROUP};
use crate::request::CacheRemoverRequest;

#[derive(Debug, Clone)]
pub struct CreateBrandCommand {
    pub name: String,
}

impl CacheRemoverRequest for CreateBrandCommand {
    fn cache_group_key(&self) -> Option<String> {
        Some(BRANDS_GROUP.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct DeleteBrandCommand {
    pub id: Uuid,
}

impl CacheRemoverRequest for DeleteBrandCommand {
    fn cache_key(&self) -> Option<String> {
        Some(brand_cache_key(self.id))
    }

    fn cache_group_key(&self) -> Option<String> {
        Some(BRANDS_GROUP.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_names_key_and_group() {
        let id = Uuid::new_v4();
        let command = DeleteBrandCommand { id };

        assert_eq!(command.cache_key(), Some(format!("brands:{}", id)));
        assert_eq!(command.cache_group_key().as_deref(), Some(BRANDS_GROUP));
        assert!(!command.bypass_cache());
    }

    #[test]
    fn test_create_names_group_only() {
        let command = CreateBrandCommand {
            name: "Acme".to_string(),
        };
        assert!(command.cache_key().is_none());
        assert_eq!(command.cache_group_key().as_deref(), Some(BRANDS_GROUP));
    }
}
