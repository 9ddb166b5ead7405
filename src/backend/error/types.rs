/**
 * Backend Error Types
 *
 * Two layers of errors:
 *
 * - `StoreError` - raised by `UserCollection` implementations (database
 *   errors, timeouts, duplicate ids) and by the relationship mutator when
 *   Phase 2 could not be completed after Phase 1 was persisted.
 * - `GraphError` - what services return to the request layer. Every
 *   variant maps to one recognizable error kind and one HTTP status.
 *
 * # Status Code Mapping
 *
 * - `InvalidInputKind` - 400 Bad Request
 * - `NotFound` - 404 Not Found
 * - `Conflict` - 409 Conflict
 * - `StoreFailure` - 500 Internal Server Error
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Errors raised by the document store adapter
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database driver failed (connectivity, SQL, decoding)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A store call did not finish within the configured limit
    #[error("Store operation '{operation}' timed out after {after_ms}ms")]
    Timeout {
        operation: &'static str,
        after_ms: u64,
    },

    /// Insert of a document whose id already exists
    #[error("Document with id '{id}' already exists")]
    DuplicateKey { id: String },

    /// An update was requested with no operations
    #[error("Mutation has no operations")]
    EmptyMutation,

    /// The collection does not implement an optional operation
    #[error("Operation '{operation}' is not supported by this collection")]
    Unsupported { operation: &'static str },

    /// Phase 1 was persisted but Phase 2 failed; the edge is one-sided
    #[error("Edge from '{source_id}' to {targets:?} left asymmetric: {cause}")]
    AsymmetricEdge {
        source_id: String,
        targets: Vec<String>,
        #[source]
        cause: Box<StoreError>,
    },
}

impl StoreError {
    /// Map a driver error, recognizing unique-key violations
    pub fn from_insert(err: sqlx::Error, id: &str) -> Self {
        let unique_violation = err
            .as_database_error()
            .map(|db_err| db_err.is_unique_violation())
            .unwrap_or(false);

        if unique_violation {
            Self::DuplicateKey { id: id.to_string() }
        } else {
            Self::Database(err)
        }
    }
}

/// Error kind reported to clients alongside the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInputKind,
    NotFound,
    Conflict,
    StoreFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInputKind => "invalid_input_kind",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::StoreFailure => "store_failure",
        }
    }
}

/// Errors returned by the relationship and user services
///
/// # Usage
///
/// ```rust
/// use petalpix::backend::error::{ErrorKind, GraphError};
///
/// let err = GraphError::not_found("no user with id 'ghost'");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Error)]
pub enum GraphError {
    /// The request payload had the wrong shape (client error)
    #[error("Invalid input: {message}")]
    InvalidInputKind { message: String },

    /// No document matched the given id (client error)
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// A document with this id already exists (client error)
    #[error("User '{id}' already exists")]
    Conflict { id: String },

    /// The store failed (server error, not retried)
    #[error("Store failure: {0}")]
    StoreFailure(#[from] StoreError),
}

impl GraphError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInputKind {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInputKind { .. } => ErrorKind::InvalidInputKind,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::StoreFailure(_) => ErrorKind::StoreFailure,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidInputKind => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message without the kind prefix
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInputKind { message } => message.clone(),
            Self::NotFound { message } => message.clone(),
            Self::Conflict { id } => format!("user '{}' already exists", id),
            Self::StoreFailure(err) => err.to_string(),
        }
    }
}

impl From<SharedError> for GraphError {
    fn from(err: SharedError) -> Self {
        Self::invalid_input(err.to_string())
    }
}
