#![deny(missing_docs)]

//! # Alpha Models
//!
//! Core data types for the Alpha Fitness site.
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`chat`] | Chat transcript entries (`Speaker`, `ChatMessage`) |
//! | [`reply`] | Ordered keyword rule table and the reply classifier |
//! | [`bmi`] | Body-mass-index estimator and its category bands |
//! | [`calorie`] | Activity calorie estimator |
//! | [`account`] | Auth and contact request / response bodies |
//! | [`catalog`] | Services, bookings and payment-order bodies |
//! | [`error`] | [`ModelError`] |

/// Declare a `u64` newtype id that serialises as a bare number.
macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            ::serde::Serialize,
            ::serde::Deserialize,
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw id.
            pub fn new(id: u64) -> Self {
                Self(id)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub mod account;
pub mod bmi;
pub mod calorie;
pub mod catalog;
pub mod chat;
pub mod error;
pub mod reply;

// Re-export all public types at crate root for convenience.
pub use account::*;
pub use bmi::*;
pub use calorie::*;
pub use catalog::*;
pub use chat::*;
pub use error::*;
pub use reply::*;
