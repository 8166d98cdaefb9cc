//! Typed HTTP client for the Alpha Fitness backend.
//!
//! [`AlphaClient`] keeps a cookie jar so that the session opened by
//! [`login`](AlphaClient::login) is presented on every later call, the same
//! way a browser does for the page scripts.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use alpha_models::LoginRequest;
//! use alpha_sdk::AlphaClient;
//!
//! # async fn run() -> Result<(), alpha_sdk::SdkError> {
//! let client = AlphaClient::new("http://localhost:5000")?;
//! let me = client
//!     .login(&LoginRequest {
//!         email: "ada@example.com".into(),
//!         password: "secret".into(),
//!     })
//!     .await?;
//! println!("logged in as {}", me.fullname);
//! for service in client.services().await? {
//!     println!("{} ₹{}", service.name, service.price_inr);
//! }
//! # Ok(())
//! # }
//! ```

use alpha_models::{
    Ack, BookRequest, BookingSummary, ContactRequest, ContactResponse, ErrorBody, LoginRequest,
    PaymentOrder, RegisterRequest, Service, ServiceId, UserProfile,
};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::SdkError;
use crate::routes::ApiRoutes;

/// A session-carrying connection to the backend.
///
/// Cloning is cheap and clones share the cookie jar.
#[derive(Debug, Clone)]
pub struct AlphaClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AlphaClient {
    /// Create a client for the backend at `base_url` (e.g. `http://localhost:5000`).
    ///
    /// # Errors
    ///
    /// [`SdkError::Config`] if the URL does not parse or is not http(s), and
    /// [`SdkError::Http`] if the underlying client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, SdkError> {
        let base_url =
            Url::parse(base_url).map_err(|e| SdkError::Config(format!("invalid base URL: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(SdkError::Config(format!(
                "unsupported scheme `{}`",
                base_url.scheme()
            )));
        }
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { http, base_url })
    }

    /// Base URL the client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------

    /// `GET /api/auth/me`: profile of the current session.
    pub async fn me(&self) -> Result<UserProfile, SdkError> {
        let res = self.http.get(self.url(ApiRoutes::ME)?).send().await?;
        decode(res).await
    }

    /// `POST /api/auth/register` (JSON).
    pub async fn register(&self, req: &RegisterRequest) -> Result<Ack, SdkError> {
        let res = self
            .http
            .post(self.url(ApiRoutes::REGISTER)?)
            .json(req)
            .send()
            .await?;
        decode(res).await
    }

    /// `POST /api/auth/login` (JSON). On success the session cookie is kept.
    pub async fn login(&self, req: &LoginRequest) -> Result<UserProfile, SdkError> {
        let res = self
            .http
            .post(self.url(ApiRoutes::LOGIN)?)
            .json(req)
            .send()
            .await?;
        decode(res).await
    }

    /// `POST /api/auth/logout`.
    pub async fn logout(&self) -> Result<Ack, SdkError> {
        let res = self.http.post(self.url(ApiRoutes::LOGOUT)?).send().await?;
        decode(res).await
    }

    /// `POST /contact` (form-encoded).
    pub async fn contact(&self, req: &ContactRequest) -> Result<ContactResponse, SdkError> {
        let res = self
            .http
            .post(self.url(ApiRoutes::CONTACT)?)
            .form(req)
            .send()
            .await?;
        decode(res).await
    }

    // ------------------------------------------------------------------
    // Catalogue and bookings
    // ------------------------------------------------------------------

    /// `GET /api/services`.
    pub async fn services(&self) -> Result<Vec<Service>, SdkError> {
        let res = self.http.get(self.url(ApiRoutes::SERVICES)?).send().await?;
        decode(res).await
    }

    /// `POST /api/book`: create a booking and its payment order.
    pub async fn book(&self, service_id: ServiceId) -> Result<PaymentOrder, SdkError> {
        let res = self
            .http
            .post(self.url(ApiRoutes::BOOK)?)
            .json(&BookRequest { service_id })
            .send()
            .await?;
        decode(res).await
    }

    /// `GET /api/bookings/mine`.
    pub async fn my_bookings(&self) -> Result<Vec<BookingSummary>, SdkError> {
        let res = self
            .http
            .get(self.url(ApiRoutes::MY_BOOKINGS)?)
            .send()
            .await?;
        decode(res).await
    }

    fn url(&self, path: &str) -> Result<Url, SdkError> {
        self.base_url
            .join(path)
            .map_err(|e| SdkError::Config(format!("invalid path {path}: {e}")))
    }
}

/// Turn a response into `T`, or into the matching [`SdkError`] for non-2xx.
async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, SdkError> {
    let status = res.status();
    let body = res.bytes().await?;
    debug!(%status, len = body.len(), "response received");

    if status.is_success() {
        return Ok(serde_json::from_slice(&body)?);
    }

    let message = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .map(|b| b.error);
    if status == StatusCode::UNAUTHORIZED {
        Err(SdkError::Unauthorized(message))
    } else {
        Err(SdkError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
