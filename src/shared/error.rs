//! Shared Error Types
//!
//! Validation failures raised while turning request payloads into
//! well-formed inputs, before any store operation runs.
//!
//! # Usage
//!
//! ```rust
//! use petalpix::shared::error::SharedError;
//!
//! let error = SharedError::validation("userId", "must not be empty");
//! assert!(error.to_string().contains("userId"));
//! ```
use thiserror::Error;

/// Errors produced by request validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A user payload field failed validation
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Follow/unfollow targets were neither a username nor a non-empty list
    #[error("Invalid targets: {message}")]
    InvalidTargets {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid-targets error
    pub fn invalid_targets(message: impl Into<String>) -> Self {
        Self::InvalidTargets {
            message: message.into(),
        }
    }
}
