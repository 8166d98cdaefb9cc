//! HTTP routes: pages, accounts, catalogue, bookings, payment webhook and
//! the contact form.

use std::convert::Infallible;
use std::sync::Arc;

use alpha_models::{
    Ack, BookRequest, BookingSummary, CURRENCY, ContactRequest, ContactResponse, LoginRequest,
    PaymentOrder, RegisterRequest, Service, UserProfile, rupees_to_paise,
};
use alpha_sdk::ApiRoutes;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request, State};
use axum::http::header::{CONTENT_TYPE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, get_service, post};
use axum::{Form, Json, Router};
use serde::de::DeserializeOwned;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::AppState;
use crate::error::ApiError;
use crate::payments::OrderRequest;
use crate::session::{self, CurrentUser};
use crate::webhook::{self, WebhookEvent};

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();

    let mut app = Router::new()
        .route(ApiRoutes::REGISTER, post(register))
        .route(ApiRoutes::LOGIN, post(login))
        .route(ApiRoutes::ME, get(me))
        .route(ApiRoutes::LOGOUT, post(logout))
        .route(ApiRoutes::SERVICES, get(services))
        .route(ApiRoutes::BOOK, post(book))
        .route(ApiRoutes::MY_BOOKINGS, get(my_bookings))
        .route(ApiRoutes::PAYMENT_WEBHOOK, post(razorpay_webhook));

    for (route, file) in ApiRoutes::PAGES {
        let page = get_service(ServeFile::new(static_dir.join(file)));
        let page = if *route == ApiRoutes::CONTACT {
            page.post(contact)
        } else {
            page
        };
        app = app.route(route, page);
    }

    app.nest_service("/static", ServeDir::new(&static_dir))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentialed CORS for any origin.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

// ---------------------------------------------------------------------------
// Extractors
// ---------------------------------------------------------------------------

/// Body accepted as JSON or as a urlencoded form, depending on
/// `Content-Type`. An unreadable body yields `T::default()`, so missing
/// fields are reported by validation.
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));

        let parsed = if is_json {
            Json::<T>::from_request(req, state).await.map(|Json(v)| v).ok()
        } else {
            Form::<T>::from_request(req, state).await.map(|Form(v)| v).ok()
        };
        if parsed.is_none() {
            debug!("unreadable body, using defaults");
        }
        Ok(Self(parsed.unwrap_or_default()))
    }
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// `POST /api/auth/register`
async fn register(
    State(state): State<Arc<AppState>>,
    JsonOrForm(req): JsonOrForm<RegisterRequest>,
) -> Result<Json<Ack>, ApiError> {
    let fullname = req.fullname.trim();
    let email = req.email.trim().to_lowercase();
    if fullname.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(ApiError::MissingFields);
    }

    let hash = session::hash_password(&req.password)?;
    let user = state.store.insert_user(fullname, &email, hash)?;
    info!(user = %user.id, "account registered");
    Ok(Json(Ack::OK))
}

/// `POST /api/auth/login`
async fn login(
    State(state): State<Arc<AppState>>,
    JsonOrForm(req): JsonOrForm<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = req.email.trim().to_lowercase();
    let (profile, hash) = state
        .store
        .credentials(&email)
        .ok_or(ApiError::InvalidCredentials)?;
    if !session::verify_password(&req.password, &hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let sid = state.store.open_session(profile.id);
    info!(user = %profile.id, "logged in");
    Ok(([(SET_COOKIE, session::session_cookie(sid))], Json(profile)))
}

/// `GET /api/auth/me`
async fn me(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserProfile>, ApiError> {
    state.store.user(user).map(Json).ok_or(ApiError::NotLoggedIn)
}

/// `POST /api/auth/logout`
async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(sid) = session::session_id(&headers) {
        if state.store.close_session(sid) {
            info!("logged out");
        }
    }
    ([(SET_COOKIE, session::expired_cookie())], Json(Ack::OK))
}

// ---------------------------------------------------------------------------
// Catalogue and bookings
// ---------------------------------------------------------------------------

/// `GET /api/services`
async fn services(State(state): State<Arc<AppState>>) -> Json<Vec<Service>> {
    Json(state.store.active_services())
}

/// `POST /api/book`
async fn book(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<BookRequest>,
) -> Result<Json<PaymentOrder>, ApiError> {
    let service = state
        .store
        .active_service(req.service_id)
        .ok_or(ApiError::ServiceNotFound)?;

    let booking_id = state.store.create_booking(user, &service);
    let amount_paise = rupees_to_paise(service.price_inr);
    info!(%booking_id, service_id = %service.id, %user, "booking created");

    let order = state
        .gateway
        .create_order(&OrderRequest::for_booking(booking_id, amount_paise, CURRENCY))
        .await?;
    state.store.record_payment(booking_id, &order.id, amount_paise);

    Ok(Json(PaymentOrder {
        booking_id,
        order_id: order.id,
        amount_paise,
        currency: CURRENCY.to_string(),
        key_id: state.gateway.key_id().to_string(),
    }))
}

/// `GET /api/bookings/mine`
async fn my_bookings(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Json<Vec<BookingSummary>> {
    Json(state.store.bookings_for(user))
}

/// `POST /api/payments/razorpay/webhook`
async fn razorpay_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let signature = headers
        .get(ApiRoutes::PAYMENT_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let secret = state.config.razorpay.webhook_secret.as_bytes();
    if !webhook::verify_signature(secret, &body, signature) {
        return Err(ApiError::InvalidSignature);
    }

    let event: WebhookEvent =
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidPayload(e.to_string()))?;
    match event.captured_payment() {
        Some(payment) => match state.store.capture_payment(&payment.order_id, &payment.id) {
            Some(captured) => info!(
                booking = %captured.booking_id,
                gateway = captured.gateway,
                amount_paise = captured.amount_paise,
                order = %payment.order_id,
                payment = %payment.id,
                "payment captured"
            ),
            None => warn!(order = %payment.order_id, "capture for unknown order"),
        },
        None => debug!(event = %event.event, "webhook event ignored"),
    }
    Ok(StatusCode::OK)
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

/// `POST /contact`
async fn contact(
    State(state): State<Arc<AppState>>,
    Form(req): Form<ContactRequest>,
) -> Json<ContactResponse> {
    let total = state.store.add_contact(req);
    info!(total, "contact message stored");
    Json(ContactResponse {
        message: Some("Message sent successfully!".to_string()),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
