//! Services, bookings and payment orders.
//!
//! Prices are whole rupees; payment amounts are paise (1 rupee = 100 paise),
//! matching what the payment provider expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Currency of every price on the site.
pub const CURRENCY: &str = "INR";

/// Convert whole rupees to paise.
pub fn rupees_to_paise(rupees: u64) -> u64 {
    rupees * 100
}

numeric_id!(
    /// Identifier of a service in the catalogue.
    ServiceId
);
numeric_id!(
    /// Identifier of a booking.
    BookingId
);

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// A bookable service as listed by `GET /api/services`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Service {
    /// Service id.
    pub id: ServiceId,
    /// Display name.
    pub name: String,
    /// Optional blurb.
    #[serde(default)]
    pub description: Option<String>,
    /// Price in whole rupees.
    pub price_inr: u64,
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

/// Lifecycle of a booking.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum BookingStatus {
    /// Created, waiting for payment capture.
    Pending,
    /// Payment captured.
    Paid,
}

/// Lifecycle of a payment order.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum PaymentStatus {
    /// Order created at the provider.
    Created,
    /// Provider reported the payment as captured.
    Success,
}

/// Body of `POST /api/book`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookRequest {
    /// Service to book.
    pub service_id: ServiceId,
}

/// Response of `POST /api/book`: everything the checkout SDK needs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PaymentOrder {
    /// Booking created for this order.
    pub booking_id: BookingId,
    /// Provider order id.
    pub order_id: String,
    /// Amount in paise.
    pub amount_paise: u64,
    /// Currency code.
    pub currency: String,
    /// Public provider key used by the checkout SDK.
    pub key_id: String,
}

/// One row of `GET /api/bookings/mine`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BookingSummary {
    /// Booking id.
    pub id: BookingId,
    /// Name of the booked service.
    pub service: String,
    /// Always 1 for site bookings.
    pub quantity: u32,
    /// Amount in whole rupees.
    pub amount_rupees: u64,
    /// Current status.
    pub status: BookingStatus,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}
