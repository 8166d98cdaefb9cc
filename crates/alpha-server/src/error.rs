//! Error types for the Alpha Fitness backend.
//!
//! [`ApiError`] unifies all failure modes and implements [`IntoResponse`] so
//! handlers can return `Result<…, ApiError>` directly. The body is always
//! `{"error": "<display text>"}`, which the page scripts show verbatim.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors a request can end with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A registration field is empty.
    #[error("All fields are required")]
    MissingFields,

    /// The email already has an account.
    #[error("Email already registered")]
    EmailTaken,

    /// Unknown email or wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The request carries no valid session.
    #[error("Not logged in")]
    NotLoggedIn,

    /// The service does not exist or is inactive.
    #[error("Service not found")]
    ServiceNotFound,

    /// Webhook signature missing or wrong.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Webhook body is not the expected JSON.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The payment provider rejected the request.
    #[error("payment gateway error: {0}")]
    Gateway(String),

    /// The payment provider could not be reached.
    #[error("failed to reach payment gateway: {0}")]
    Http(#[from] reqwest::Error),

    /// Anything else (password hashing, ...).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::InvalidSignature | Self::InvalidPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::NotLoggedIn => StatusCode::UNAUTHORIZED,
            Self::ServiceNotFound => StatusCode::NOT_FOUND,
            Self::Gateway(_) | Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(%status, error = %message, "request failed");
        } else {
            tracing::warn!(%status, error = %message, "request rejected");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_texts() {
        assert_eq!(ApiError::MissingFields.to_string(), "All fields are required");
        assert_eq!(ApiError::EmailTaken.status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::NotLoggedIn.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidSignature.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Gateway("boom".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn response_carries_status() {
        let res = ApiError::ServiceNotFound.into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
