//! In-memory user repository
//!
//! Plays the slow database behind the cache: every call sleeps for a
//! configurable latency and can be switched offline to simulate outages.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::aside::BackingStore;
use crate::error::StoreError;
use crate::models::User;

/// Prefix of every cache key owned by this repository.
pub const USER_KEY_PREFIX: &str = "user:";

// == User Repository ==
#[derive(Debug, Default)]
pub struct UserRepository {
    users: RwLock<HashMap<String, User>>,
    latency: Duration,
    offline: AtomicBool,
    reads: AtomicU64,
    writes: AtomicU64,
}

impl UserRepository {
    /// Creates an empty repository with the given per-call latency.
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    /// Creates a repository pre-filled with demo users `1`, `2` and `3`.
    pub fn seeded(latency: Duration) -> Self {
        let users: HashMap<String, User> = [
            User::new("1", "Alice Johnson", "alice@example.com"),
            User::new("2", "Bob Smith", "bob@example.com"),
            User::new("3", "Carol White", "carol@example.com"),
        ]
        .into_iter()
        .map(|user| (user.id.clone(), user))
        .collect();

        Self {
            users: RwLock::new(users),
            ..Self::new(latency)
        }
    }

    /// Adds or replaces a user without simulated latency.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }

    /// Toggles simulated outages.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of reads that reached the repository.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    async fn round_trip(&self) -> Result<(), StoreError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            warn!("User repository is offline");
            return Err(StoreError::Unavailable(
                "user repository is offline".to_string(),
            ));
        }
        Ok(())
    }
}

impl BackingStore for UserRepository {
    type Value = User;

    fn key(&self, id: &str) -> String {
        format!("{}{}", USER_KEY_PREFIX, id)
    }

    async fn fetch(&self, id: &str) -> Result<User, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await?;
        debug!(id, "Loading user from repository");

        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("user {}", id)))
    }

    async fn persist(&self, id: &str, mut user: User) -> Result<User, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await?;

        let mut users = self.users.write().await;
        let slot = users
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("user {}", id)))?;

        user.id = id.to_string();
        user.updated_at = Utc::now();
        *slot = user.clone();
        debug!(id, "Persisted user");
        Ok(user)
    }
}
