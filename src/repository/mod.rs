//! Repository Module
//!
//! In-memory source of truth used behind the cache.

mod users;

pub use users::{UserRepository, USER_KEY_PREFIX};
