//! API Handlers
//!
//! HTTP request handlers for the demo brands API.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::brands::{
    BrandRepository, BrandService, CreateBrandCommand, DeleteBrandCommand, GetBrandByIdQuery,
    GetBrandListQuery,
};
use crate::config::{CacheSettings, Config};
use crate::error::{PipelineError, Result};
use crate::models::{
    BrandListItem, CacheParams, CreateBrandRequest, CreatedBrandResponse, DeletedBrandResponse,
    GetByIdBrandResponse, GetListResponse, HealthResponse, ListBrandsParams, StatsResponse,
};
use crate::pipeline::CancelToken;
use crate::store::MemoryStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Backing store, kept concrete for stats and the expiry sweep
    pub store: Arc<MemoryStore>,
    pub brands: Arc<BrandService>,
    /// Cancelled on shutdown so in-flight requests stop at the next await
    pub shutdown: CancelToken,
}

impl AppState {
    /// Creates a new AppState around an existing store.
    pub fn new(store: Arc<MemoryStore>, settings: &CacheSettings) -> Result<Self> {
        let brands = BrandService::new(
            Arc::new(BrandRepository::new()),
            store.clone(),
            settings,
        )?;

        Ok(Self {
            store,
            brands: Arc::new(brands),
            shutdown: CancelToken::new(),
        })
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = Arc::new(MemoryStore::new(config.max_entries));
        Self::new(store, &config.cache)
    }
}

/// Handler for POST /brands
pub async fn create_brand_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateBrandRequest>,
) -> Result<(StatusCode, Json<CreatedBrandResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(PipelineError::InvalidRequest(error_msg));
    }

    let command = CreateBrandCommand { name: req.name };
    let created = state.brands.create(command, &state.shutdown).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /brands
pub async fn list_brands_handler(
    State(state): State<AppState>,
    Query(params): Query<ListBrandsParams>,
) -> Result<Json<GetListResponse<BrandListItem>>> {
    if let Some(error_msg) = params.validate() {
        return Err(PipelineError::InvalidRequest(error_msg));
    }

    let query = GetBrandListQuery {
        page_index: params.page_index,
        page_size: params.page_size,
        bypass_cache: params.bypass_cache,
    };
    let page = state.brands.list(query, &state.shutdown).await?;

    Ok(Json(page))
}

/// Handler for GET /brands/:id
pub async fn get_brand_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<CacheParams>,
) -> Result<Json<GetByIdBrandResponse>> {
    let query = GetBrandByIdQuery {
        id,
        bypass_cache: params.bypass_cache,
    };
    let brand = state.brands.get_by_id(query, &state.shutdown).await?;

    Ok(Json(brand))
}

/// Handler for DELETE /brands/:id
pub async fn delete_brand_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedBrandResponse>> {
    let deleted = state
        .brands
        .delete(DeleteBrandCommand { id }, &state.shutdown)
        .await?;

    Ok(Json(deleted))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.store.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new(100)), &CacheSettings::default()).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_handler() {
        let state = test_state();

        let req = CreateBrandRequest {
            name: "Acme".to_string(),
        };
        let (status, Json(created)) = create_brand_handler(State(state.clone()), Json(req))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let Json(brand) = get_brand_handler(
            State(state.clone()),
            Path(created.id),
            Query(CacheParams::default()),
        )
        .await
        .unwrap();
        assert_eq!(brand.name, "Acme");
        assert_eq!(state.store.stats().await.total_entries, 1);
    }

    #[tokio::test]
    async fn test_get_missing_brand() {
        let state = test_state();

        let result = get_brand_handler(
            State(state),
            Path(Uuid::new_v4()),
            Query(CacheParams::default()),
        )
        .await;
        assert!(matches!(result, Err(PipelineError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_invalid_request() {
        let state = test_state();

        let req = CreateBrandRequest {
            name: "".to_string(),
        };
        let result = create_brand_handler(State(state), Json(req)).await;
        assert!(matches!(result, Err(PipelineError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_shutdown_cancels_requests() {
        let state = test_state();
        state.shutdown.cancel();

        let result = get_brand_handler(
            State(state),
            Path(Uuid::new_v4()),
            Query(CacheParams::default()),
        )
        .await;
        assert!(matches!(result, Err(PipelineError::Cancelled)));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
