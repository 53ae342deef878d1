//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, RecencyList};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded key-value storage with LRU eviction and lazy TTL expiry.
///
/// Not synchronized; share it through [`crate::cache::Cache`].
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage, each entry remembers its recency slot
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access order
    recency: RecencyList,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL applied when `set` is called without one; zero never expires
    default_ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize, default_ttl: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            recency: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(capacity),
            capacity,
            default_ttl,
        })
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// If the key already exists, the value is overwritten and the TTL
    /// restarts. If the key is new and the cache is full, the least recently
    /// used entry is evicted first.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - TTL for this entry; `None` uses the default, zero never expires
    pub fn set(&mut self, key: String, value: V, ttl: Option<Duration>) {
        let ttl = Some(ttl.unwrap_or(self.default_ttl));

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.refresh(value, ttl);
            self.recency.move_to_front(entry.node);
            return;
        }

        if self.entries.len() >= self.capacity {
            self.evict_lru();
        }

        let node = self.recency.push_front(key.clone());
        self.entries.insert(key, CacheEntry::new(value, ttl, node));
        self.stats.set_total_entries(self.entries.len());

        debug_assert_eq!(self.entries.len(), self.recency.len());
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value if found and not expired, marking it most recently
    /// used. Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = Instant::now();
        let (node, expired) = match self.entries.get(key) {
            Some(entry) => (entry.node, entry.is_expired_at(now)),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            debug!(key, "Cache entry expired");
            return None;
        }

        self.recency.move_to_front(node);
        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns whether an entry was present. Deleting an absent key is a no-op.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    // == Contains ==
    /// Checks for a live entry without touching its recency.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Clear ==
    /// Drops every entry. Statistics counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.recency.iter().map(str::to_owned).collect()
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    fn evict_lru(&mut self) {
        if let Some(evicted) = self.recency.pop_back() {
            let removed = self.entries.remove(&evicted);
            debug_assert!(removed.is_some(), "recency list held unknown key");
            self.stats.record_eviction();
            debug!(key = %evicted, "Evicted least recently used entry");
        }
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.recency.remove(entry.node);
        self.stats.set_total_entries(self.entries.len());
        Some(entry)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const TTL: Duration = Duration::from_secs(300);

    fn store(capacity: usize) -> CacheStore<String> {
        CacheStore::new(capacity, TTL).unwrap()
    }

    fn put(store: &mut CacheStore<String>, key: &str, value: &str) {
        store.set(key.to_string(), value.to_string(), None);
    }

    #[test]
    fn test_store_new() {
        let store = store(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
        assert_eq!(store.default_ttl(), TTL);
    }

    #[test]
    fn test_store_rejects_zero_capacity() {
        let result = CacheStore::<String>::new(0, TTL);
        assert!(matches!(result, Err(CacheError::InvalidCapacity(0))));
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = store(100);

        put(&mut store, "key1", "value1");

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = store(100);
        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_delete() {
        let mut store = store(100);

        put(&mut store, "key1", "value1");
        assert!(store.delete("key1"));

        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_delete_nonexistent_is_noop() {
        let mut store = store(100);
        put(&mut store, "key1", "value1");

        assert!(!store.delete("nonexistent"));
        assert!(!store.delete("nonexistent"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = store(100);

        put(&mut store, "key1", "value1");
        put(&mut store, "key1", "value2");

        assert_eq!(store.get("key1"), Some("value2".to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_overwrite_at_capacity_does_not_evict() {
        let mut store = store(2);

        put(&mut store, "a", "1");
        put(&mut store, "b", "2");
        put(&mut store, "a", "3");

        assert_eq!(store.len(), 2);
        assert_eq!(store.keys_by_recency(), vec!["a", "b"]);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = store(100);

        store.set("key1".to_string(), "value1".to_string(), Some(Duration::from_millis(1)));

        sleep(Duration::from_millis(10));

        assert_eq!(store.get("key1"), None);
        assert_eq!(store.len(), 0);
        let stats = store.stats();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_expired_entry_frees_capacity() {
        let mut store = store(2);

        store.set("short".to_string(), "x".to_string(), Some(Duration::from_millis(1)));
        put(&mut store, "long", "y");
        sleep(Duration::from_millis(10));

        assert_eq!(store.get("short"), None);
        put(&mut store, "fresh", "z");

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
        assert_eq!(store.get("long"), Some("y".to_string()));
    }

    #[test]
    fn test_zero_ttl_never_expires() {
        let mut store = CacheStore::new(4, Duration::ZERO).unwrap();

        store.set("forever".to_string(), 1u32, None);
        store.set("also".to_string(), 2u32, Some(Duration::ZERO));
        sleep(Duration::from_millis(5));

        assert_eq!(store.get("forever"), Some(1));
        assert_eq!(store.get("also"), Some(2));
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = store(3);

        put(&mut store, "key1", "value1");
        put(&mut store, "key2", "value2");
        put(&mut store, "key3", "value3");
        put(&mut store, "key4", "value4");

        assert_eq!(store.len(), 3);
        assert_eq!(store.get("key1"), None);
        assert!(store.get("key2").is_some());
        assert!(store.get("key3").is_some());
        assert!(store.get("key4").is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = store(2);

        put(&mut store, "a", "1");
        put(&mut store, "b", "2");
        store.get("a");
        put(&mut store, "c", "3");

        assert_eq!(store.get("b"), None);
        assert!(store.contains("a"));
        assert!(store.contains("c"));
    }

    #[test]
    fn test_users_scenario() {
        let mut store = CacheStore::new(3, Duration::from_secs(60)).unwrap();

        put(&mut store, "u1", "alice");
        put(&mut store, "u2", "bob");
        put(&mut store, "u3", "carol");
        store.get("u1");
        put(&mut store, "u4", "dave");

        assert!(!store.contains("u2"));
        let mut keys = store.keys_by_recency();
        keys.sort();
        assert_eq!(keys, vec!["u1", "u3", "u4"]);
    }

    #[test]
    fn test_contains_does_not_touch() {
        let mut store = store(2);

        put(&mut store, "a", "1");
        put(&mut store, "b", "2");
        assert!(store.contains("a"));
        put(&mut store, "c", "3");

        assert!(!store.contains("a"));
    }

    #[test]
    fn test_store_stats() {
        let mut store = store(100);

        put(&mut store, "key1", "value1");
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.capacity, 100);
    }

    #[test]
    fn test_clear() {
        let mut store = store(3);
        put(&mut store, "a", "1");
        put(&mut store, "b", "2");

        store.clear();

        assert!(store.is_empty());
        assert!(store.keys_by_recency().is_empty());
        put(&mut store, "c", "3");
        assert_eq!(store.get("c"), Some("3".to_string()));
    }

    #[test]
    fn test_capacity_one() {
        let mut store = store(1);

        put(&mut store, "a", "1");
        put(&mut store, "b", "2");

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some("2".to_string()));
    }
}
