//! Auth and contact request / response bodies.
//!
//! Request bodies default every field to an empty string so that a missing
//! field is reported by the server as a validation error rather than a
//! deserialisation failure.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// UserId
// ---------------------------------------------------------------------------

numeric_id!(
    /// Numeric identifier of a registered user.
    ///
    /// # Examples
    ///
    /// ```
    /// use alpha_models::UserId;
    ///
    /// let id = UserId::new(7);
    /// assert_eq!(id.to_string(), "7");
    /// assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    /// ```
    UserId
);

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

/// Public view of a user, returned by login and `me`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub fullname: String,
    /// Lower-cased e-mail address.
    pub email: String,
}

/// Body of `POST /api/auth/register`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RegisterRequest {
    /// Display name.
    pub fullname: String,
    /// E-mail address (case-insensitive).
    pub email: String,
    /// Clear-text password.
    pub password: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LoginRequest {
    /// E-mail address (case-insensitive).
    pub email: String,
    /// Clear-text password.
    pub password: String,
}

/// Form body of `POST /contact`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ContactRequest {
    /// Sender name.
    pub name: String,
    /// Sender e-mail.
    pub email: String,
    /// Free text.
    pub message: String,
}

/// Response of `POST /contact`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactResponse {
    /// Confirmation text shown to the visitor.
    #[serde(default)]
    pub message: Option<String>,
}

/// Generic `{ "ok": true }` acknowledgement.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    /// Always `true` on success.
    pub ok: bool,
}

impl Ack {
    /// The success acknowledgement.
    pub const OK: Self = Self { ok: true };
}

/// Error body carried by every non-2xx JSON response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable error text.
    pub error: String,
}

impl ErrorBody {
    /// Build an error body.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
