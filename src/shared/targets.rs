//! Follow Targets
//!
//! Follow and unfollow accept either one username or a batch. The request
//! bodies carry the two shapes in separate fields; they are folded into a
//! `Targets` variant at the boundary so the relationship mutator only ever
//! sees a normalized list.

use serde::{Deserialize, Serialize};

use super::error::SharedError;

/// One username or an ordered batch of usernames
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    Single(String),
    Batch(Vec<String>),
}

impl Targets {
    /// Normalize into an ordered, non-empty list of usernames
    ///
    /// Duplicates are kept; whether to collapse them is a policy decision
    /// of the caller.
    pub fn normalize(self) -> Result<Vec<String>, SharedError> {
        match self {
            Targets::Single(name) => {
                if name.trim().is_empty() {
                    return Err(SharedError::invalid_targets("username must not be empty"));
                }
                Ok(vec![name])
            }
            Targets::Batch(names) => {
                if names.is_empty() {
                    return Err(SharedError::invalid_targets("username list must not be empty"));
                }
                if names.iter().any(|name| name.trim().is_empty()) {
                    return Err(SharedError::invalid_targets(
                        "username list must not contain empty names",
                    ));
                }
                Ok(names)
            }
        }
    }

    /// Pick the single-name field if set, else the batch field
    fn from_fields(single: Option<String>, batch: Option<Vec<String>>) -> Result<Self, SharedError> {
        match (single, batch) {
            (Some(name), _) if !name.is_empty() => Ok(Targets::Single(name)),
            (_, Some(names)) => Ok(Targets::Batch(names)),
            _ => Err(SharedError::invalid_targets(
                "expected a username or a non-empty list of usernames",
            )),
        }
    }
}

impl From<&str> for Targets {
    fn from(name: &str) -> Self {
        Targets::Single(name.to_string())
    }
}

impl From<String> for Targets {
    fn from(name: String) -> Self {
        Targets::Single(name)
    }
}

impl From<Vec<String>> for Targets {
    fn from(names: Vec<String>) -> Self {
        Targets::Batch(names)
    }
}

impl From<&[&str]> for Targets {
    fn from(names: &[&str]) -> Self {
        Targets::Batch(names.iter().map(|name| name.to_string()).collect())
    }
}

/// Body of `POST /v1/user/follow/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_users: Option<Vec<String>>,
}

impl FollowRequest {
    pub fn into_targets(self) -> Result<Targets, SharedError> {
        Targets::from_fields(self.follow_user, self.follow_users)
    }
}

/// Body of `POST /v1/user/unfollow/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnfollowRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unfollow_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unfollow_users: Option<Vec<String>>,
}

impl UnfollowRequest {
    pub fn into_targets(self) -> Result<Targets, SharedError> {
        Targets::from_fields(self.unfollow_user, self.unfollow_users)
    }
}
