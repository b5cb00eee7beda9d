//! API error handling
//!
//! Rejected candidates (rule violations and duplicate policy numbers) are
//! client errors and answer 400. Storage failures answer 500 with a generic
//! message; their detail only goes to the log.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain_policy::PolicyError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Message of every request-shape rejection
pub const VALIDATION_FAILED: &str = "Validation failed";

/// Message of 404 responses for policy routes
pub const POLICY_NOT_FOUND: &str = "Policy not found";

/// Message when the id in an update body differs from the path id
pub const POLICY_ID_MISMATCH: &str = "Policy ID mismatch";

const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request shape or business rule violation
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Option<Vec<String>>,
    },

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn policy_not_found() -> Self {
        ApiError::NotFound(POLICY_NOT_FOUND.to_string())
    }

    /// A request-shape rejection with per-field details
    pub fn validation_failed(details: Vec<String>) -> Self {
        ApiError::Validation {
            message: VALIDATION_FAILED.to_string(),
            details: Some(details),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Validation { message, details } => {
                (StatusCode::BAD_REQUEST, "validation_error", message, details)
            }
            ApiError::Duplicate(msg) => (StatusCode::BAD_REQUEST, "duplicate", msg, None),
            ApiError::Internal(msg) => {
                error!(error = %msg, "Request failed with an internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    INTERNAL_ERROR_MESSAGE.to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PolicyError> for ApiError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::Validation(message) => ApiError::Validation {
                message,
                details: None,
            },
            PolicyError::Duplicate(message) => ApiError::Duplicate(message),
            PolicyError::Storage(source) => ApiError::Internal(format!("Storage error: {source}")),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{field}: {}", e.code),
                })
            })
            .collect();
        details.sort();
        ApiError::validation_failed(details)
    }
}

/// Malformed bodies, missing fields and unreadable values are reported
/// like field rule violations
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation_failed(vec![rejection.body_text()])
    }
}

/// A path id that is not an integer
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation_failed(vec![rejection.body_text()])
    }
}
