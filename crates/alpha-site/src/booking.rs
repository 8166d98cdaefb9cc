//! Services listing, booking with payment hand-off, and "my bookings".
//!
//! Booking asks the backend for a payment order and passes it to the
//! provider's checkout through the [`PaymentSdk`] seam. A 401 anywhere in
//! here means "log in first" and is reported separately from other failures.

use alpha_models::{BookingSummary, PaymentOrder, Service, ServiceId};
use alpha_sdk::{AlphaClient, ApiRoutes};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::auth::LOGIN_MODAL;
use crate::html::escape;
use crate::page::Alert;

/// Merchant name shown in the checkout.
pub const MERCHANT_NAME: &str = "Alpha Fitness";
/// Checkout accent colour.
pub const THEME_COLOR: &str = "#ffcc00";

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// Card markup for every service.
pub fn render_services(services: &[Service]) -> String {
    services
        .iter()
        .map(|s| {
            format!(
                concat!(
                    "<article class=\"service-card\">",
                    "<h3>{name}</h3><p>{description}</p>",
                    "<div class=\"price\">₹{price}</div>",
                    "<button data-service-id=\"{id}\">Book</button>",
                    "</article>"
                ),
                name = escape(&s.name),
                description = escape(s.description.as_deref().unwrap_or_default()),
                price = s.price_inr,
                id = s.id,
            )
        })
        .collect()
}

/// Fetch and render the services list.
pub async fn load_services(client: &AlphaClient) -> String {
    match client.services().await {
        Ok(services) => {
            info!(count = services.len(), "services loaded");
            render_services(&services)
        }
        Err(e) => {
            error!(error = %e, "could not load services");
            "<p>Could not load services.</p>".to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Checkout
// ---------------------------------------------------------------------------

/// Theme block of the checkout options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutTheme {
    /// Accent colour.
    pub color: String,
}

/// Options handed to the provider's checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutOptions {
    /// Public provider key.
    pub key: String,
    /// Amount in paise.
    pub amount: u64,
    /// Currency code.
    pub currency: String,
    /// Merchant name.
    pub name: String,
    /// Line shown under the merchant name.
    pub description: String,
    /// Provider order id.
    pub order_id: String,
    /// Styling.
    pub theme: CheckoutTheme,
}

impl From<PaymentOrder> for CheckoutOptions {
    fn from(order: PaymentOrder) -> Self {
        Self {
            key: order.key_id,
            amount: order.amount_paise,
            currency: order.currency,
            name: MERCHANT_NAME.to_string(),
            description: "Service Booking".to_string(),
            order_id: order.order_id,
            theme: CheckoutTheme {
                color: THEME_COLOR.to_string(),
            },
        }
    }
}

/// The provider's checkout widget.
pub trait PaymentSdk {
    /// Open the checkout for `options`. Completion is reported back through
    /// [`payment_completed`].
    fn open_checkout(&mut self, options: &CheckoutOptions);
}

/// Result of pressing a service's Book button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookOutcome {
    /// Checkout was opened with these options.
    CheckoutOpened(CheckoutOptions),
    /// Not logged in: alert and open the login modal.
    LoginRequired,
    /// Anything else: alert with this text.
    Failed(Alert),
}

impl BookOutcome {
    /// Alert to show, if any.
    pub fn alert(&self) -> Option<Alert> {
        match self {
            Self::CheckoutOpened(_) => None,
            Self::LoginRequired => Some(Alert("Please login to book.".into())),
            Self::Failed(alert) => Some(alert.clone()),
        }
    }

    /// Modal to open afterwards, if any.
    pub fn modal(&self) -> Option<&'static str> {
        matches!(self, Self::LoginRequired).then_some(LOGIN_MODAL)
    }
}

/// Book a service and hand the order to the checkout.
pub async fn book_service(
    client: &AlphaClient,
    sdk: Option<&mut dyn PaymentSdk>,
    service_id: ServiceId,
) -> BookOutcome {
    let order = match client.book(service_id).await {
        Ok(order) => order,
        Err(e) if e.is_unauthorized() => {
            info!(%service_id, "booking needs login");
            return BookOutcome::LoginRequired;
        }
        Err(e) => {
            error!(%service_id, error = %e, "booking failed");
            return BookOutcome::Failed(Alert("Could not start payment. Try again.".into()));
        }
    };

    let Some(sdk) = sdk else {
        warn!(booking = %order.booking_id, "payment SDK missing");
        return BookOutcome::Failed(Alert("Payment SDK not loaded.".into()));
    };

    info!(booking = %order.booking_id, order = %order.order_id, "opening checkout");
    let options = CheckoutOptions::from(order);
    sdk.open_checkout(&options);
    BookOutcome::CheckoutOpened(options)
}

/// Checkout completion handler: alert, then navigate to this path.
pub fn payment_completed() -> (Alert, &'static str) {
    (
        Alert("Payment successful / processing. Check My Bookings.".into()),
        ApiRoutes::BOOKINGS_PAGE,
    )
}

// ---------------------------------------------------------------------------
// My bookings
// ---------------------------------------------------------------------------

/// State of the "my bookings" list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingsView {
    /// No session.
    LoginRequired,
    /// Session but nothing booked.
    Empty,
    /// Bookings, newest first.
    List(Vec<BookingSummary>),
    /// The backend could not be reached or answered with an error.
    Unavailable,
}

impl BookingsView {
    /// Markup for the bookings container.
    pub fn to_html(&self) -> String {
        match self {
            Self::LoginRequired => "<p>Please login to see your bookings.</p>".to_string(),
            Self::Empty => "<p>No bookings yet.</p>".to_string(),
            Self::Unavailable => "<p>Could not load bookings.</p>".to_string(),
            Self::List(bookings) => bookings
                .iter()
                .map(|b| {
                    format!(
                        concat!(
                            "<article class=\"service-card\">",
                            "<h3>{service}</h3>",
                            "<p>Quantity: {quantity}</p>",
                            "<p>Amount: ₹{amount}</p>",
                            "<p>Status: <strong>{status}</strong></p>",
                            "<small>{created}</small>",
                            "</article>"
                        ),
                        service = escape(&b.service),
                        quantity = b.quantity,
                        amount = b.amount_rupees,
                        status = b.status,
                        created = b.created_at.format("%d/%m/%Y, %H:%M:%S"),
                    )
                })
                .collect(),
        }
    }
}

/// Fetch the current user's bookings.
pub async fn load_bookings(client: &AlphaClient) -> BookingsView {
    match client.my_bookings().await {
        Ok(bookings) if bookings.is_empty() => BookingsView::Empty,
        Ok(bookings) => BookingsView::List(bookings),
        Err(e) if e.is_unauthorized() => BookingsView::LoginRequired,
        Err(e) => {
            error!(error = %e, "could not load bookings");
            BookingsView::Unavailable
        }
    }
}
