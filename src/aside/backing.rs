//! Backing store capability and the caching decorator over it.

use std::future::Future;

use crate::aside::CacheAside;
use crate::error::StoreError;

// == Backing Store ==
/// A slow source of truth addressed by id.
pub trait BackingStore: Send + Sync {
    type Value: Clone + Send + Sync;

    /// Cache key under which the record for `id` is kept.
    fn key(&self, id: &str) -> String;

    /// Loads the record for `id`.
    fn fetch(&self, id: &str) -> impl Future<Output = Result<Self::Value, StoreError>> + Send;

    /// Writes `value` for `id` and returns what was stored.
    fn persist(
        &self,
        id: &str,
        value: Self::Value,
    ) -> impl Future<Output = Result<Self::Value, StoreError>> + Send;
}

// == Cached Store ==
/// Applies cache-aside to any [`BackingStore`].
pub struct CachedStore<S: BackingStore> {
    store: S,
    aside: CacheAside<S::Value>,
}

impl<S: BackingStore> CachedStore<S> {
    pub fn new(store: S, aside: CacheAside<S::Value>) -> Self {
        Self { store, aside }
    }

    /// Reads through the cache.
    pub async fn get(&self, id: &str) -> Result<S::Value, StoreError> {
        let key = self.store.key(id);
        self.aside
            .fetch_async(&key, || self.store.fetch(id))
            .await
    }

    /// Persists first, then invalidates or refreshes the cached copy.
    pub async fn update(&self, id: &str, value: S::Value) -> Result<S::Value, StoreError> {
        let key = self.store.key(id);
        self.aside
            .update_and_invalidate_async(&key, || self.store.persist(id, value))
            .await
    }

    /// Drops the cached copy of `id`.
    pub fn evict(&self, id: &str) -> bool {
        self.aside.invalidate(&self.store.key(id))
    }

    pub fn aside(&self) -> &CacheAside<S::Value> {
        &self.aside
    }

    pub fn inner(&self) -> &S {
        &self.store
    }
}
