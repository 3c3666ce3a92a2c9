//! Catalog product endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use catalog::{CacheStats, CatalogError, Product, ProductId, ProductService};

use super::parse_id;
use crate::error::ApiError;

/// Shared state of the catalog service.
pub struct CatalogAppState {
    pub products: ProductService,
}

/// POST /product: store a product and put it into the cache.
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<CatalogAppState>>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Json(product) = payload?;
    Ok(Json(state.products.add_product(product).await?))
}

/// GET /product/{id}: read through the cache.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<CatalogAppState>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id: ProductId = parse_id(&id)?;
    let product = state
        .products
        .get_product(id)
        .await
        .ok_or(CatalogError::NotFound(id))?;
    Ok(Json(product))
}

/// DELETE /product/{id}: remove from the store and evict from the cache.
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<CatalogAppState>>,
    Path(id): Path<String>,
) -> Result<&'static str, ApiError> {
    Ok(state.products.delete_product(parse_id(&id)?).await)
}

/// GET /cache/stats: cache usage counters.
pub async fn stats(State(state): State<Arc<CatalogAppState>>) -> Json<CacheStats> {
    Json(state.products.stats().await)
}
