//! Cache-Aside Module
//!
//! Read-through and write-invalidation around a slow source of truth.
//!
//! Loaders and updaters always run without the cache lock held; only the
//! final `set` or `delete` touches the cache. Concurrent misses on the same
//! key are not coalesced, so each caller may invoke its loader.

mod backing;

use std::future::Future;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::Cache;
use crate::error::CacheError;

pub use backing::{BackingStore, CachedStore};

// == Write Policy ==
/// What a successful write does to the cached copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritePolicy {
    /// Drop the key; the next read reloads it.
    #[default]
    Invalidate,
    /// Store the value returned by the updater.
    Refresh,
}

impl WritePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            WritePolicy::Invalidate => "invalidate",
            WritePolicy::Refresh => "refresh",
        }
    }
}

impl FromStr for WritePolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "invalidate" | "delete" => Ok(WritePolicy::Invalidate),
            "refresh" | "repopulate" => Ok(WritePolicy::Refresh),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown write policy '{}'",
                other
            ))),
        }
    }
}

// == Cache Aside ==
/// Wraps a [`Cache`] handle with cache-aside semantics.
#[derive(Debug)]
pub struct CacheAside<V> {
    cache: Cache<V>,
    policy: WritePolicy,
}

impl<V> Clone for CacheAside<V> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            policy: self.policy,
        }
    }
}

impl<V: Clone> CacheAside<V> {
    /// Creates an orchestrator that invalidates on write.
    pub fn new(cache: Cache<V>) -> Self {
        Self::with_policy(cache, WritePolicy::Invalidate)
    }

    pub fn with_policy(cache: Cache<V>, policy: WritePolicy) -> Self {
        Self { cache, policy }
    }

    /// The underlying cache handle.
    pub fn cache(&self) -> &Cache<V> {
        &self.cache
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    // == Fetch ==
    /// Returns the cached value for `key`, or loads and caches it.
    ///
    /// On a hit `loader` is not called. A loader error is returned as-is and
    /// nothing is cached.
    pub fn fetch<E, F>(&self, key: &str, loader: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.cache.get(key) {
            debug!(key, "Cache hit");
            return Ok(value);
        }

        debug!(key, "Cache miss, loading from backing store");
        let value = loader()?;
        self.cache.set(key, value.clone(), None);
        Ok(value)
    }

    /// Async form of [`CacheAside::fetch`].
    pub async fn fetch_async<E, F, Fut>(&self, key: &str, loader: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.cache.get(key) {
            debug!(key, "Cache hit");
            return Ok(value);
        }

        debug!(key, "Cache miss, loading from backing store");
        let value = loader().await?;
        self.cache.set(key, value.clone(), None);
        Ok(value)
    }

    // == Update And Invalidate ==
    /// Runs `updater` against the source of truth, then applies the write
    /// policy to `key`.
    ///
    /// If `updater` fails the cache is left exactly as it was.
    pub fn update_and_invalidate<E, F>(&self, key: &str, updater: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let value = updater()?;
        self.apply_write(key, &value);
        Ok(value)
    }

    /// Async form of [`CacheAside::update_and_invalidate`].
    pub async fn update_and_invalidate_async<E, F, Fut>(
        &self,
        key: &str,
        updater: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let value = updater().await?;
        self.apply_write(key, &value);
        Ok(value)
    }

    /// Drops `key` from the cache. Returns whether it was present.
    pub fn invalidate(&self, key: &str) -> bool {
        self.cache.delete(key)
    }

    fn apply_write(&self, key: &str, value: &V) {
        match self.policy {
            WritePolicy::Invalidate => {
                self.cache.delete(key);
                debug!(key, "Invalidated after write");
            }
            WritePolicy::Refresh => {
                self.cache.set(key, value.clone(), None);
                debug!(key, "Refreshed after write");
            }
        }
    }
}
