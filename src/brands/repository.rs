//! In-memory brand persistence.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::brands::Brand;
use crate::error::{PipelineError, Result};

#[derive(Debug, Default)]
pub struct BrandRepository {
    brands: RwLock<HashMap<Uuid, Brand>>,
}

impl BrandRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `brand` unless another brand already has its name, compared
    /// case-insensitively. The check and insert share one write lock.
    pub async fn add(&self, brand: Brand) -> Result<Brand> {
        let mut brands = self.brands.write().await;
        if brands
            .values()
            .any(|existing| existing.name.eq_ignore_ascii_case(&brand.name))
        {
            return Err(PipelineError::InvalidRequest(format!(
                "Brand name '{}' already exists",
                brand.name
            )));
        }

        brands.insert(brand.id, brand.clone());
        Ok(brand)
    }

    pub async fn get(&self, id: Uuid) -> Option<Brand> {
        self.brands.read().await.get(&id).cloned()
    }

    /// Returns one page ordered by creation time, plus the total count.
    pub async fn list(&self, index: u32, size: u32) -> (Vec<Brand>, usize) {
        let brands = self.brands.read().await;
        let mut all: Vec<&Brand> = brands.values().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let page = all
            .into_iter()
            .skip((index as usize).saturating_mul(size as usize))
            .take(size as usize)
            .cloned()
            .collect();
        (page, brands.len())
    }

    pub async fn delete(&self, id: Uuid) -> Option<Brand> {
        self.brands.write().await.remove(&id)
    }
}
