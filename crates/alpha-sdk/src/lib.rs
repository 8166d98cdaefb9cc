//! # Alpha SDK
//!
//! Client library for the **Alpha Fitness** backend.
//!
//! The SDK provides:
//!
//! * [`AlphaClient`]: cookie-carrying HTTP client with one typed method per
//!   backend endpoint.
//! * [`ApiRoutes`]: canonical route definitions shared by clients and the
//!   server alike.
//! * [`SdkError`]: unified error type for all SDK operations.
//!
//! Request and response bodies come from [`alpha_models`] and are re-exported
//! for convenience.

pub mod client;
pub mod error;
pub mod routes;

pub use client::AlphaClient;
pub use error::SdkError;
pub use routes::ApiRoutes;

pub use alpha_models::{
    Ack, BookingSummary, ContactRequest, ContactResponse, LoginRequest, PaymentOrder,
    RegisterRequest, Service, ServiceId, UserProfile,
};
