//! API error mapping
//!
//! Domain and input errors are converted to HTTP responses here, at the
//! handler boundary, and nowhere else.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error surface of the HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing input, reported as a single message
    Validation(String),
    /// Field-level validation failures, reported as `{"errors": {field: [messages]}}`
    ValidationErrors(BTreeMap<String, Vec<String>>),
    /// Unknown task id
    NotFound(String),
    /// Domain rule violation on a status or assignment change
    TransitionRejected(String),
    /// Anything unexpected; detail is logged, not exposed
    Internal(String),
}

impl ApiError {
    /// Map a domain error, labelling rejected transitions with the given
    /// context ("Update rejected" / "Assignment rejected")
    pub fn from_domain(err: tt_core::Error, rejection_context: &str) -> Self {
        use tt_core::Error;
        match err {
            Error::TaskNotFound(_) => Self::NotFound(err.to_string()),
            Error::InvalidTransition(msg) => {
                Self::TransitionRejected(format!("{rejection_context}: {msg}"))
            }
            Error::InvalidStatus(_) | Error::InvalidIdentifier(_) => {
                Self::Validation(format!("Invalid input: {err}"))
            }
            Error::Storage(_) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            Self::ValidationErrors(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            Self::TransitionRejected(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": message })),
            )
                .into_response(),
            Self::Internal(detail) => {
                tracing::error!(%detail, "internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "An internal server error occurred." })),
                )
                    .into_response()
            }
        }
    }
}
