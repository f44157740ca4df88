//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use tokio::sync::Mutex;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::CacheStore;
use crate::error::{ApiResult, Result};
use crate::models::{
    ContainsResponse, DeleteResponse, GetResponse, HealthResponse, KeysResponse, ResizeRequest,
    ResizeResponse, SetRequest, SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The LRU engine does no locking, and even reads move entries, so every
/// handler takes the one mutex guarding the store.
#[derive(Clone)]
pub struct AppState {
    /// Mutex-guarded cache store
    pub cache: Arc<Mutex<CacheStore>>,
}

impl AppState {
    /// Creates a new AppState with the given cache store.
    pub fn new(cache: CacheStore) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails if the configured capacity is zero.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        let cache = CacheStore::new(config.capacity)?;
        Ok(Self::new(cache))
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> ApiResult<Json<SetResponse>> {
    let mut cache = state.cache.lock().await;
    let evicted = cache.set(req.key.clone(), req.value)?;

    Ok(Json(SetResponse::new(req.key, evicted)))
}

/// Handler for GET /get/:key
///
/// A hit marks the key as most recently used.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Json<GetResponse>> {
    let mut cache = state.cache.lock().await;
    let value = cache.get(&key)?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for GET /contains/:key
///
/// Does not affect recency or statistics.
pub async fn contains_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<ContainsResponse> {
    let cache = state.cache.lock().await;
    let present = cache.contains(&key);

    Json(ContainsResponse { key, present })
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let mut cache = state.cache.lock().await;
    cache.delete(&key)?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /keys
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    let cache = state.cache.lock().await;

    Json(KeysResponse { keys: cache.keys() })
}

/// Handler for PUT /resize
pub async fn resize_handler(
    State(state): State<AppState>,
    Json(req): Json<ResizeRequest>,
) -> ApiResult<Json<ResizeResponse>> {
    let mut cache = state.cache.lock().await;
    let evicted = cache.resize(req.capacity)?;
    info!(
        "Cache resized to {} entries ({} evicted)",
        req.capacity, evicted
    );

    Ok(Json(ResizeResponse {
        capacity: cache.capacity(),
        evicted,
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.lock().await;

    Json(cache.stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
