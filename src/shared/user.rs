//! User Document
//!
//! The single document type held by the user collection. Relationship
//! state is embedded: `following`/`followers` hold user ids and the two
//! counters are maintained alongside them by the relationship mutator.

use serde::{Deserialize, Serialize};

use super::error::SharedError;

/// A user document
///
/// Wire names follow the public API (`userId`, `contactNo`, ...); column
/// names in PostgreSQL are the snake_case field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable user identifier (the username other users follow)
    #[serde(rename = "userId", default)]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Contact phone number
    #[serde(default)]
    pub contact_no: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Accepted on create, never returned
    #[serde(default, skip_serializing)]
    pub password: String,
    /// Number of users this user follows
    #[serde(default)]
    pub following_count: i64,
    /// Ids of users this user follows, in follow order
    #[serde(default)]
    pub following: Vec<String>,
    /// Number of users following this user
    #[serde(default)]
    pub followers_count: i64,
    /// Ids of users following this user, in follow order
    #[serde(default)]
    pub followers: Vec<String>,
}

impl User {
    /// Create a user with empty relationship state
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        contact_no: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            contact_no: contact_no.into(),
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Check the fields registration requires
    pub fn validate_new(&self) -> Result<(), SharedError> {
        let required = [
            ("userId", &self.id),
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
            ("contactNo", &self.contact_no),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(SharedError::validation(field, "must not be empty"));
            }
        }
        Ok(())
    }

    /// Whether `other` appears in this user's following list
    pub fn is_following(&self, other: &str) -> bool {
        self.following.iter().any(|id| id == other)
    }

    /// Whether `other` appears in this user's followers list
    pub fn is_followed_by(&self, other: &str) -> bool {
        self.followers.iter().any(|id| id == other)
    }
}

/// Plain `{"message": ...}` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
