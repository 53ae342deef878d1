//! User record served by the repository and cached by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user as stored in the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Last time the record was written
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            updated_at: Utc::now(),
        }
    }
}
