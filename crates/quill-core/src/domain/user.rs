use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum username length accepted at registration.
pub const MIN_USERNAME_LEN: usize = 4;

/// User entity - represents a registered author.
///
/// `password_hash` always holds the salted one-way hash, never the
/// plaintext password. Users are created at registration and never
/// updated or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamp.
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// Check the registration length constraint on a candidate username.
    pub fn username_is_valid(username: &str) -> bool {
        username.chars().count() >= MIN_USERNAME_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_usernames() {
        assert!(!User::username_is_valid("bob"));
        assert!(User::username_is_valid("alice"));
        assert!(User::username_is_valid("杏仁豆腐"));
    }
}
