//! # Alpha Site
//!
//! Page-script layer of the Alpha Fitness site.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`widget`] | The chat widget: session, event queue and handle |
//! | [`view`] | Rendering seams (`ChatView`, `Host`) and the markup view |
//! | [`page`] | Per-page composition root |
//! | [`estimators`] | BMI / calorie forms and trainer buttons |
//! | [`auth`] | Navigation state, user menu, auth and contact forms |
//! | [`booking`] | Services, booking with checkout hand-off, my bookings |

pub mod auth;
pub mod booking;
pub mod estimators;
mod html;
pub mod page;
pub mod view;
pub mod widget;

pub use page::{Alert, SitePage};
pub use view::{ChatView, Host, HtmlChatView, CHAT_ANCHOR_ID};
pub use widget::{ChatSession, ChatWidget, WidgetConfig, WidgetEvent, WidgetHandle};
