//! Request DTOs for the user API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Maximum accepted length of a user name, in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// Request body for PUT /users/:id
///
/// The body replaces the stored record.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
}

impl UpdateUserRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Some(format!(
                "Name exceeds maximum length of {} characters",
                MAX_NAME_LENGTH
            ));
        }

        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => None,
            _ => Some(format!("Invalid email address: '{}'", email)),
        }
    }
}
