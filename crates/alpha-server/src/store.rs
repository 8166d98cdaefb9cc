//! In-memory storage for users, sessions, services, bookings, payments and
//! contact messages.
//!
//! Everything sits behind one [`Mutex`]; each method takes the lock for a
//! short synchronous section and never across an `.await`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use alpha_models::{
    BookingId, BookingStatus, BookingSummary, ContactRequest, PaymentStatus, Service, ServiceId,
    UserId, UserProfile,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::ApiError;

/// Name recorded on every payment row.
pub const GATEWAY_NAME: &str = "razorpay";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct UserRecord {
    profile: UserProfile,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct ServiceRecord {
    service: Service,
    is_active: bool,
}

#[derive(Debug, Clone)]
struct BookingRecord {
    id: BookingId,
    user_id: UserId,
    service_id: ServiceId,
    quantity: u32,
    amount_rupees: u64,
    status: BookingStatus,
    created_at: DateTime<Utc>,
}

/// One payment attempt for a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    /// Booking being paid for.
    pub booking_id: BookingId,
    /// Provider name.
    pub gateway: &'static str,
    /// Provider order id.
    pub order_id: String,
    /// Provider payment id, set on capture.
    pub payment_id: Option<String>,
    /// Amount in paise.
    pub amount_paise: u64,
    /// Lifecycle state.
    pub status: PaymentStatus,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserRecord>,
    sessions: HashMap<Uuid, UserId>,
    services: Vec<ServiceRecord>,
    bookings: Vec<BookingRecord>,
    payments: Vec<PaymentRecord>,
    contacts: Vec<(ContactRequest, DateTime<Utc>)>,
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Process-local database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the default catalogue.
    pub fn seeded() -> Self {
        let store = Self::new();
        for (name, description, price_inr) in [
            (
                "Fat Loss Program",
                "Calorie-deficit meal plan plus guided cardio and HIIT.",
                2999,
            ),
            (
                "Muscle Gain Program",
                "Progressive strength training with a high-protein diet plan.",
                3499,
            ),
            (
                "Yoga Sessions",
                "Flexibility, mobility and breathing, beginner friendly.",
                1999,
            ),
        ] {
            store.add_service(name, Some(description), price_inr, true);
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------
    // Users and sessions
    // ------------------------------------------------------------------

    /// Create an account. `email` must already be normalised.
    pub fn insert_user(
        &self,
        fullname: &str,
        email: &str,
        password_hash: String,
    ) -> Result<UserProfile, ApiError> {
        let mut tables = self.lock();
        if tables.users.iter().any(|u| u.profile.email == email) {
            return Err(ApiError::EmailTaken);
        }
        let profile = UserProfile {
            id: UserId::new(tables.users.len() as u64 + 1),
            fullname: fullname.to_string(),
            email: email.to_string(),
        };
        tables.users.push(UserRecord {
            profile: profile.clone(),
            password_hash,
        });
        Ok(profile)
    }

    /// Profile and password hash for `email`.
    pub fn credentials(&self, email: &str) -> Option<(UserProfile, String)> {
        self.lock()
            .users
            .iter()
            .find(|u| u.profile.email == email)
            .map(|u| (u.profile.clone(), u.password_hash.clone()))
    }

    /// Profile of user `id`.
    pub fn user(&self, id: UserId) -> Option<UserProfile> {
        self.lock()
            .users
            .iter()
            .find(|u| u.profile.id == id)
            .map(|u| u.profile.clone())
    }

    /// Start a session for `user` and return its id.
    pub fn open_session(&self, user: UserId) -> Uuid {
        let sid = Uuid::new_v4();
        self.lock().sessions.insert(sid, user);
        sid
    }

    /// User behind session `sid`.
    pub fn session_user(&self, sid: Uuid) -> Option<UserId> {
        self.lock().sessions.get(&sid).copied()
    }

    /// Forget session `sid`. Returns whether it existed.
    pub fn close_session(&self, sid: Uuid) -> bool {
        self.lock().sessions.remove(&sid).is_some()
    }

    // ------------------------------------------------------------------
    // Services
    // ------------------------------------------------------------------

    /// Add a service to the catalogue.
    pub fn add_service(
        &self,
        name: &str,
        description: Option<&str>,
        price_inr: u64,
        is_active: bool,
    ) -> ServiceId {
        let mut tables = self.lock();
        let id = ServiceId::new(tables.services.len() as u64 + 1);
        tables.services.push(ServiceRecord {
            service: Service {
                id,
                name: name.to_string(),
                description: description.map(str::to_string),
                price_inr,
            },
            is_active,
        });
        id
    }

    /// Every active service.
    pub fn active_services(&self) -> Vec<Service> {
        self.lock()
            .services
            .iter()
            .filter(|s| s.is_active)
            .map(|s| s.service.clone())
            .collect()
    }

    /// Service `id` if it exists and is active.
    pub fn active_service(&self, id: ServiceId) -> Option<Service> {
        self.lock()
            .services
            .iter()
            .find(|s| s.is_active && s.service.id == id)
            .map(|s| s.service.clone())
    }

    // ------------------------------------------------------------------
    // Bookings and payments
    // ------------------------------------------------------------------

    /// Record a pending booking of one unit of `service` for `user`.
    pub fn create_booking(&self, user: UserId, service: &Service) -> BookingId {
        let mut tables = self.lock();
        let id = BookingId::new(tables.bookings.len() as u64 + 1);
        tables.bookings.push(BookingRecord {
            id,
            user_id: user,
            service_id: service.id,
            quantity: 1,
            amount_rupees: service.price_inr,
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        });
        id
    }

    /// Record the provider order created for `booking`.
    pub fn record_payment(&self, booking: BookingId, order_id: &str, amount_paise: u64) {
        self.lock().payments.push(PaymentRecord {
            booking_id: booking,
            gateway: GATEWAY_NAME,
            order_id: order_id.to_string(),
            payment_id: None,
            amount_paise,
            status: PaymentStatus::Created,
        });
    }

    /// Mark the payment for `order_id` successful and its booking paid.
    ///
    /// Returns the updated payment, or `None` for an unknown order.
    pub fn capture_payment(&self, order_id: &str, payment_id: &str) -> Option<PaymentRecord> {
        let mut tables = self.lock();
        let payment = tables.payments.iter_mut().find(|p| p.order_id == order_id)?;
        payment.payment_id = Some(payment_id.to_string());
        payment.status = PaymentStatus::Success;
        let captured = payment.clone();

        if let Some(booking) = tables
            .bookings
            .iter_mut()
            .find(|b| b.id == captured.booking_id)
        {
            booking.status = BookingStatus::Paid;
        }
        Some(captured)
    }

    /// Bookings of `user`, newest first.
    pub fn bookings_for(&self, user: UserId) -> Vec<BookingSummary> {
        let tables = self.lock();
        let mut rows: Vec<_> = tables
            .bookings
            .iter()
            .filter(|b| b.user_id == user)
            .map(|b| BookingSummary {
                id: b.id,
                service: tables
                    .services
                    .iter()
                    .find(|s| s.service.id == b.service_id)
                    .map(|s| s.service.name.clone())
                    .unwrap_or_default(),
                quantity: b.quantity,
                amount_rupees: b.amount_rupees,
                status: b.status,
                created_at: b.created_at,
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows
    }

    // ------------------------------------------------------------------
    // Contact
    // ------------------------------------------------------------------

    /// Store a contact message; returns how many are stored.
    pub fn add_contact(&self, message: ContactRequest) -> usize {
        let mut tables = self.lock();
        tables.contacts.push((message, Utc::now()));
        tables.contacts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(store: &MemoryStore, email: &str) -> UserProfile {
        store.insert_user("Test", email, "hash".into()).unwrap()
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        user(&store, "a@b.c");
        assert!(matches!(
            store.insert_user("Other", "a@b.c", "x".into()),
            Err(ApiError::EmailTaken)
        ));
    }

    #[test]
    fn sessions_open_and_close() {
        let store = MemoryStore::new();
        let ada = user(&store, "ada@example.com");
        let sid = store.open_session(ada.id);
        assert_eq!(store.session_user(sid), Some(ada.id));
        assert!(store.close_session(sid));
        assert_eq!(store.session_user(sid), None);
        assert!(!store.close_session(sid));
    }

    #[test]
    fn inactive_services_are_hidden() {
        let store = MemoryStore::new();
        let on = store.add_service("On", None, 100, true);
        let off = store.add_service("Off", None, 100, false);
        assert_eq!(store.active_services().len(), 1);
        assert!(store.active_service(on).is_some());
        assert!(store.active_service(off).is_none());
    }

    #[test]
    fn capture_marks_booking_paid() {
        let store = MemoryStore::seeded();
        let ada = user(&store, "ada@example.com");
        let service = store.active_services().remove(0);
        let booking = store.create_booking(ada.id, &service);
        store.record_payment(booking, "order_1", service.price_inr * 100);

        let payment = store.capture_payment("order_1", "pay_1").unwrap();
        assert_eq!(payment.booking_id, booking);
        assert_eq!(payment.gateway, GATEWAY_NAME);
        assert_eq!(payment.status, PaymentStatus::Success);
        assert_eq!(payment.payment_id.as_deref(), Some("pay_1"));
        assert_eq!(store.bookings_for(ada.id)[0].status, BookingStatus::Paid);
        assert!(store.capture_payment("order_unknown", "pay_2").is_none());
    }

    #[test]
    fn bookings_are_per_user_and_newest_first() {
        let store = MemoryStore::seeded();
        let ada = user(&store, "ada@example.com");
        let bob = user(&store, "bob@example.com");
        let services = store.active_services();
        store.create_booking(ada.id, &services[0]);
        store.create_booking(ada.id, &services[1]);
        store.create_booking(bob.id, &services[2]);

        let mine = store.bookings_for(ada.id);
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].service, services[1].name);
        assert_eq!(mine[1].service, services[0].name);
        assert_eq!(mine[0].quantity, 1);
    }
}
