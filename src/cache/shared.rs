//! Shared Cache Handle
//!
//! Thread-safe, cloneable handle over a single [`CacheStore`].

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore};
use crate::error::Result;

// == Cache ==
/// Cloneable handle to one cache instance.
///
/// Every operation takes the same mutex: `get` reorders the recency list,
/// so there is no read-only path. Operations never block on I/O.
#[derive(Debug)]
pub struct Cache<V> {
    inner: Arc<Mutex<CacheStore<V>>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> Cache<V> {
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`crate::error::CacheError::InvalidCapacity`] for zero capacity.
    pub fn new(capacity: usize, default_ttl: Duration) -> Result<Self> {
        Ok(Self::from_store(CacheStore::new(capacity, default_ttl)?))
    }

    /// Wraps an already built store.
    pub fn from_store(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// See [`CacheStore::get`].
    pub fn get(&self, key: &str) -> Option<V> {
        self.inner.lock().get(key)
    }

    /// See [`CacheStore::set`].
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        self.inner.lock().set(key.into(), value, ttl);
    }

    /// See [`CacheStore::delete`].
    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().delete(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn keys_by_recency(&self) -> Vec<String> {
        self.inner.lock().keys_by_recency()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn default_ttl(&self) -> Duration {
        self.inner.lock().default_ttl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clones_share_state() {
        let cache: Cache<u64> = Cache::new(10, Duration::from_secs(60)).unwrap();
        let other = cache.clone();

        cache.set("k", 1, None);

        assert_eq!(other.get("k"), Some(1));
        assert!(other.delete("k"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(Cache::<u64>::new(0, Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_concurrent_access_keeps_index_consistent() {
        let cache: Cache<usize> = Cache::new(16, Duration::from_secs(60)).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..500 {
                        let key = format!("k{}", (i * 7 + t) % 40);
                        match i % 3 {
                            0 => cache.set(key, i, None),
                            1 => {
                                cache.get(&key);
                            }
                            _ => {
                                cache.delete(&key);
                            }
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let keys = cache.keys_by_recency();
        assert!(keys.len() <= 16);
        assert_eq!(keys.len(), cache.len());
        for key in &keys {
            assert!(cache.contains(key));
        }
    }
}
