//! Brand Service
//!
//! Wraps each brand handler in the matching pipeline stage.

use std::sync::Arc;

use tracing::info;

use crate::brands::{
    Brand, BrandRepository, CreateBrandCommand, DeleteBrandCommand, GetBrandByIdQuery,
    GetBrandListQuery,
};
use crate::config::CacheSettings;
use crate::error::{PipelineError, Result};
use crate::models::{
    BrandListItem, CreatedBrandResponse, DeletedBrandResponse, GetByIdBrandResponse,
    GetListResponse,
};
use crate::pipeline::{CachingStage, CancelToken, InvalidationStage};
use crate::serializer::JsonSerializer;
use crate::store::CacheStore;

pub struct BrandService {
    repository: Arc<BrandRepository>,
    caching: CachingStage,
    invalidation: InvalidationStage,
}

impl BrandService {
    pub fn new(
        repository: Arc<BrandRepository>,
        store: Arc<dyn CacheStore>,
        settings: &CacheSettings,
    ) -> Result<Self> {
        Ok(Self {
            repository,
            caching: CachingStage::new(store.clone(), JsonSerializer, settings)?,
            invalidation: InvalidationStage::new(store, JsonSerializer),
        })
    }

    pub fn repository(&self) -> &BrandRepository {
        &self.repository
    }

    // == Pipelined Operations ==
    pub async fn create(
        &self,
        command: CreateBrandCommand,
        cancel: &CancelToken,
    ) -> Result<CreatedBrandResponse> {
        self.invalidation
            .handle(&command, cancel, || self.create_brand(&command))
            .await
    }

    pub async fn get_by_id(
        &self,
        query: GetBrandByIdQuery,
        cancel: &CancelToken,
    ) -> Result<GetByIdBrandResponse> {
        self.caching
            .handle(&query, cancel, || self.get_brand(&query))
            .await
    }

    pub async fn list(
        &self,
        query: GetBrandListQuery,
        cancel: &CancelToken,
    ) -> Result<GetListResponse<BrandListItem>> {
        self.caching
            .handle(&query, cancel, || self.list_brands(&query))
            .await
    }

    pub async fn delete(
        &self,
        command: DeleteBrandCommand,
        cancel: &CancelToken,
    ) -> Result<DeletedBrandResponse> {
        self.invalidation
            .handle(&command, cancel, || self.delete_brand(&command))
            .await
    }

    // == Handlers ==
    async fn create_brand(&self, command: &CreateBrandCommand) -> Result<CreatedBrandResponse> {
        let brand = self.repository.add(Brand::new(command.name.trim())).await?;
        info!(id = %brand.id, name = %brand.name, "Brand created");
        Ok(CreatedBrandResponse::from(&brand))
    }

    async fn get_brand(&self, query: &GetBrandByIdQuery) -> Result<GetByIdBrandResponse> {
        self.repository
            .get(query.id)
            .await
            .map(|brand| GetByIdBrandResponse::from(&brand))
            .ok_or_else(|| PipelineError::NotFound(format!("Brand {}", query.id)))
    }

    async fn list_brands(&self, query: &GetBrandListQuery) -> Result<GetListResponse<BrandListItem>> {
        if query.page_size == 0 {
            return Err(PipelineError::InvalidRequest(
                "Page size must be greater than zero".to_string(),
            ));
        }

        let (brands, count) = self
            .repository
            .list(query.page_index, query.page_size)
            .await;
        let items = brands.iter().map(BrandListItem::from).collect();
        Ok(GetListResponse::new(
            items,
            query.page_index,
            query.page_size,
            count,
        ))
    }

    async fn delete_brand(&self, command: &DeleteBrandCommand) -> Result<DeletedBrandResponse> {
        let brand = self
            .repository
            .delete(command.id)
            .await
            .ok_or_else(|| PipelineError::NotFound(format!("Brand {}", command.id)))?;
        info!(id = %brand.id, "Brand deleted");
        Ok(DeletedBrandResponse::from(&brand))
    }
}
