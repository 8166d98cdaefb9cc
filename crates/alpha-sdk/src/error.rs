//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK. Non-2xx responses keep the server's `error` text so
//! that page scripts can show it verbatim.

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid or missing configuration (e.g. bad base URL).
    #[error("configuration error: {0}")]
    Config(String),

    /// The server answered 401: no session or bad credentials.
    #[error("unauthorized: {}", .0.as_deref().unwrap_or("login required"))]
    Unauthorized(Option<String>),

    /// The server answered with another non-success status.
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response body, when present.
        message: Option<String>,
    },

    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SdkError {
    /// Error text supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized(message) | Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether the failure means "log in first".
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_exposed() {
        let err = SdkError::Api {
            status: 409,
            message: Some("Email already registered".into()),
        };
        assert_eq!(err.server_message(), Some("Email already registered"));
        assert_eq!(err.to_string(), "server returned 409: Email already registered");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn unauthorized_without_body() {
        let err = SdkError::Unauthorized(None);
        assert!(err.is_unauthorized());
        assert_eq!(err.server_message(), None);
        assert_eq!(err.to_string(), "unauthorized: login required");
    }
}
