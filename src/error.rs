//! Error types for the cache and its backing stores
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Errors raised while building a cache.
///
/// Lookups never fail: a missing or expired key is `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity must be at least one entry
    #[error("Invalid cache capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Any other rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Store Error Enum ==
/// Failures reported by a backing store.
///
/// These pass through the cache-aside layer untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The record does not exist in the source of truth
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The store could not serve the request
    #[error("Backing store unavailable: {0}")]
    Unavailable(String),
}

// == API Error Enum ==
/// Error type returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Backing store failed
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(id),
            StoreError::Unavailable(msg) => ApiError::Unavailable(msg),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Aliases ==
/// Convenience Result type for cache construction.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Result type for HTTP handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
