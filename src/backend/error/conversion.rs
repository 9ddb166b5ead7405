/**
 * Error Conversion
 *
 * `GraphError` implements `IntoResponse`, so handlers return it directly.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "kind": "not_found",
 *   "status": 404
 * }
 * ```
 */

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::{ErrorKind, GraphError};

impl IntoResponse for GraphError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let kind = self.kind();

        match kind {
            ErrorKind::StoreFailure => tracing::error!(error = %self, "Request failed in store"),
            _ => tracing::warn!(error = %self, kind = kind.as_str(), "Request rejected"),
        }

        let body = serde_json::json!({
            "error": self.message(),
            "kind": kind.as_str(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

/// Malformed bodies (wrong JSON kinds, missing content type) are client errors
impl From<JsonRejection> for GraphError {
    fn from(rejection: JsonRejection) -> Self {
        GraphError::invalid_input(rejection.body_text())
    }
}
