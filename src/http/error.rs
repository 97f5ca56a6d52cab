//! Translation of service errors into HTTP responses.

use crate::auth::AuthError;
use crate::contact::services::ContactError;
use crate::identity::services::IdentityServiceError;
use crate::task::{ports::TaskRepositoryError, services::TaskServiceError};
use crate::validation::FieldErrors;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Detail reported when a protected endpoint is called without a token.
pub const CREDENTIALS_MISSING_MESSAGE: &str = "Authentication credentials were not provided.";
/// Detail reported when a non-staff caller reaches a staff-only endpoint.
pub const PERMISSION_DENIED_MESSAGE: &str = "You do not have permission to perform this action.";

const NOT_FOUND_MESSAGE: &str = "Not found.";
const INVALID_PAGE_MESSAGE: &str = "Invalid page.";
const SERVER_ERROR_MESSAGE: &str = "A server error occurred.";

/// Error returned by every handler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request fields failed validation (400).
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    /// The request body could not be decoded (400).
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    /// No valid credentials were presented (401).
    #[error("authentication failed: {0}")]
    Unauthenticated(String),
    /// The caller lacks staff rights (403).
    #[error("permission denied")]
    Forbidden,
    /// The resource does not exist or is not visible to the caller (404).
    #[error("not found: {0}")]
    NotFound(&'static str),
    /// The request collides with existing state (409).
    #[error("conflict: {0}")]
    Conflict(FieldErrors),
    /// Contact mail could not be delivered (500, `{"error": ..}`).
    #[error("delivery failed: {0}")]
    Delivery(String),
    /// Unexpected server-side failure (500). The cause is logged, not
    /// returned.
    #[error("internal error")]
    Internal,
}

impl ApiError {
    fn internal(cause: &dyn std::error::Error) -> Self {
        error!(error = %cause, "request failed");
        Self::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Self::MalformedRequest(detail) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
            }
            Self::Unauthenticated(detail) => {
                let mut response =
                    (StatusCode::UNAUTHORIZED, Json(json!({ "detail": detail }))).into_response();
                response.headers_mut().insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static(r#"Bearer realm="api""#),
                );
                response
            }
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "detail": PERMISSION_DENIED_MESSAGE })),
            )
                .into_response(),
            Self::NotFound(detail) => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
            }
            Self::Conflict(errors) => (StatusCode::CONFLICT, Json(errors)).into_response(),
            Self::Delivery(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": SERVER_ERROR_MESSAGE })),
            )
                .into_response(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Domain(domain) => {
                Self::Validation(FieldErrors::single(domain.field(), domain.to_string()))
            }
            TaskServiceError::NotFound(_)
            | TaskServiceError::Repository(TaskRepositoryError::NotFound(_)) => {
                Self::NotFound(NOT_FOUND_MESSAGE)
            }
            TaskServiceError::PageOutOfRange(_) => Self::NotFound(INVALID_PAGE_MESSAGE),
            TaskServiceError::Repository(other) => Self::internal(&other),
        }
    }
}

impl From<IdentityServiceError> for ApiError {
    fn from(err: IdentityServiceError) -> Self {
        match err {
            IdentityServiceError::Validation(errors) => Self::Validation(errors),
            IdentityServiceError::Conflict(errors) => Self::Conflict(errors),
            IdentityServiceError::Forbidden => Self::Forbidden,
            IdentityServiceError::NotFound(_) => Self::NotFound(NOT_FOUND_MESSAGE),
            other @ (IdentityServiceError::Hashing(_)
            | IdentityServiceError::Repository(_)
            | IdentityServiceError::Tasks(_)) => Self::internal(&other),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.is_rejection() {
            Self::Unauthenticated(err.to_string())
        } else {
            Self::internal(&err)
        }
    }
}

impl From<ContactError> for ApiError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::Validation(errors) => Self::Validation(errors),
            other @ (ContactError::Render(_) | ContactError::Transport(_)) => {
                error!(error = %other, "contact relay failed");
                Self::Delivery(other.to_string())
            }
        }
    }
}

/// Converts a page query that failed to parse into the invalid-page error.
pub(super) const fn not_found() -> ApiError {
    ApiError::NotFound(NOT_FOUND_MESSAGE)
}

pub(super) const fn invalid_page() -> ApiError {
    ApiError::NotFound(INVALID_PAGE_MESSAGE)
}
