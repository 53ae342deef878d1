//! API Module
//!
//! HTTP handlers and routing for the user service.
//!
//! # Endpoints
//! - `GET /users/:id` - Read a user through the cache
//! - `PUT /users/:id` - Update a user
//! - `DELETE /cache/:key` - Drop a cache key
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
