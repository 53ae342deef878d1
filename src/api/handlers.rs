//! API Handlers
//!
//! HTTP request handlers for the user and cache endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::aside::{CacheAside, CachedStore};
use crate::cache::Cache;
use crate::config::Config;
use crate::error::{ApiError, ApiResult, Result};
use crate::models::{
    HealthResponse, InvalidateResponse, StatsResponse, UpdateUserRequest, User,
};
use crate::repository::UserRepository;

/// Application state shared across all handlers.
///
/// The composition root: one cache instance and one repository, built
/// together and handed to the router.
#[derive(Clone)]
pub struct AppState {
    /// Repository wrapped with cache-aside
    pub users: Arc<CachedStore<UserRepository>>,
}

impl AppState {
    /// Creates a new AppState from a repository and an orchestrator.
    pub fn new(repository: UserRepository, aside: CacheAside<User>) -> Self {
        Self {
            users: Arc::new(CachedStore::new(repository, aside)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the cache and a seeded repository with the configured latency.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let cache = Cache::new(config.capacity, config.default_ttl())?;
        let aside = CacheAside::with_policy(cache, config.write_policy);
        Ok(Self::new(
            UserRepository::seeded(config.backend_latency()),
            aside,
        ))
    }

    pub fn cache(&self) -> &Cache<User> {
        self.users.aside().cache()
    }

    pub fn repository(&self) -> &UserRepository {
        self.users.inner()
    }
}

/// Handler for GET /users/:id
///
/// Serves from cache, loading from the repository on a miss.
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let user = state.users.get(&id).await?;
    Ok(Json(user))
}

/// Handler for PUT /users/:id
///
/// Persists the new record, then invalidates or refreshes the cached copy.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let user = User::new(
        id.clone(),
        req.name.trim(),
        req.email.trim(),
    );
    let saved = state.users.update(&id, user).await?;
    info!(id = %saved.id, "User updated");

    Ok(Json(saved))
}

/// Handler for DELETE /cache/:key
///
/// Drops a raw cache key. Absent keys are not an error.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<InvalidateResponse> {
    let removed = state.users.aside().invalidate(&key);
    Json(InvalidateResponse::new(key, removed))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache();

    Json(StatsResponse::new(
        &cache.stats(),
        cache.default_ttl().as_secs(),
        state.users.aside().policy().as_str(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
