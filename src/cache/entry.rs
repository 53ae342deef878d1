//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value, expiry and recency position.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant the entry was created or last overwritten
    pub created_at: Instant,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
    /// Slot of this key in the recency list
    pub(crate) node: usize,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// A `ttl` of `None` or `Some(Duration::ZERO)` never expires.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Optional time to live
    /// * `node` - Recency list slot holding this entry's key
    pub fn new(value: V, ttl: Option<Duration>, node: usize) -> Self {
        let now = Instant::now();
        Self {
            value,
            created_at: now,
            expires_at: expiry_from(now, ttl),
            node,
        }
    }

    // == Refresh ==
    /// Overwrites the value and restarts the TTL clock, keeping the list slot.
    pub fn refresh(&mut self, value: V, ttl: Option<Duration>) {
        let now = Instant::now();
        self.value = value;
        self.created_at = now;
        self.expires_at = expiry_from(now, ttl);
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired only once `now` is strictly past its expiration
    /// instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }

    /// Checks if the entry has expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns remaining TTL, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the TTL has elapsed
    /// - `Some(remaining)` if the entry has TTL and hasn't expired
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}

fn expiry_from(now: Instant, ttl: Option<Duration>) -> Option<Instant> {
    match ttl {
        Some(ttl) if !ttl.is_zero() => now.checked_add(ttl),
        _ => None,
    }
}
