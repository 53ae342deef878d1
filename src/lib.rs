//! User Cache - a bounded TTL/LRU cache with cache-aside read-through
//!
//! Provides an in-memory cache with lazy TTL expiration and LRU eviction,
//! a cache-aside orchestrator for slow backing stores, and a small HTTP
//! service that puts both in front of a seeded user repository.

pub mod api;
pub mod aside;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;

pub use api::AppState;
pub use aside::{BackingStore, CacheAside, CachedStore, WritePolicy};
pub use cache::{Cache, CacheStore};
pub use config::Config;
