//! Canonical HTTP route definitions for the Alpha Fitness backend.
//!
//! Every path used by the site scripts, the CLI and the server **must** come
//! from [`ApiRoutes`] so the client and the router cannot drift apart.
//!
//! # Route layout
//!
//! ```text
//! /api/auth/{register,login,me,logout}   ← account
//! /api/services                          ← catalogue
//! /api/book, /api/bookings/mine          ← bookings (session required)
//! /api/payments/razorpay/webhook         ← payment provider callback
//! /contact                               ← contact form (POST)
//! /, /bmi, /calorie, ...                 ← static pages (GET)
//! ```

/// Central authority for every backend path.
///
/// # Examples
///
/// ```
/// use alpha_sdk::ApiRoutes;
///
/// assert_eq!(ApiRoutes::LOGIN, "/api/auth/login");
/// assert!(ApiRoutes::PAGES.contains(&("/bmi", "bmi.html")));
/// ```
pub struct ApiRoutes;

impl ApiRoutes {
    // ------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------

    /// Create an account.
    pub const REGISTER: &'static str = "/api/auth/register";
    /// Open a session.
    pub const LOGIN: &'static str = "/api/auth/login";
    /// Profile of the current session.
    pub const ME: &'static str = "/api/auth/me";
    /// Close the current session.
    pub const LOGOUT: &'static str = "/api/auth/logout";

    // ------------------------------------------------------------------
    // Catalogue and bookings
    // ------------------------------------------------------------------

    /// Active services.
    pub const SERVICES: &'static str = "/api/services";
    /// Book a service and obtain a payment order.
    pub const BOOK: &'static str = "/api/book";
    /// Bookings of the current session's user.
    pub const MY_BOOKINGS: &'static str = "/api/bookings/mine";

    // ------------------------------------------------------------------
    // Payments and forms
    // ------------------------------------------------------------------

    /// Payment provider webhook.
    pub const PAYMENT_WEBHOOK: &'static str = "/api/payments/razorpay/webhook";
    /// Header carrying the webhook's hex HMAC-SHA256 signature.
    pub const PAYMENT_SIGNATURE_HEADER: &'static str = "x-razorpay-signature";
    /// Contact form (POST) and contact page (GET).
    pub const CONTACT: &'static str = "/contact";
    /// Page the checkout completion handler navigates to.
    pub const BOOKINGS_PAGE: &'static str = "/booking";

    /// Static pages served by the backend, as `(route, file)` pairs.
    pub const PAGES: &'static [(&'static str, &'static str)] = &[
        ("/", "index.html"),
        ("/bmi", "bmi.html"),
        ("/calorie", "calorie.html"),
        ("/services", "services.html"),
        ("/trainer", "trainer.html"),
        ("/contact", "contact.html"),
        ("/booking", "booking.html"),
    ];
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_paths_share_prefix() {
        for path in [
            ApiRoutes::REGISTER,
            ApiRoutes::LOGIN,
            ApiRoutes::ME,
            ApiRoutes::LOGOUT,
            ApiRoutes::SERVICES,
            ApiRoutes::BOOK,
            ApiRoutes::MY_BOOKINGS,
            ApiRoutes::PAYMENT_WEBHOOK,
        ] {
            assert!(path.starts_with("/api/"), "{path}");
        }
    }

    #[test]
    fn pages_are_unique() {
        let mut routes: Vec<_> = ApiRoutes::PAGES.iter().map(|(r, _)| *r).collect();
        routes.sort_unstable();
        routes.dedup();
        assert_eq!(routes.len(), ApiRoutes::PAGES.len());
    }

    #[test]
    fn bookings_page_is_served() {
        assert!(ApiRoutes::PAGES.contains(&(ApiRoutes::BOOKINGS_PAGE, "booking.html")));
        assert!(ApiRoutes::PAGES.contains(&("/", "index.html")));
    }
}
