//! Account UI glue: navigation state, user menu and the auth / contact forms.
//!
//! Nothing here returns an error. Failures become inline [`FormMessage`]s
//! with the server's `error` text when it sent one, and a fixed fallback
//! otherwise.

use std::time::Duration;

use alpha_models::{ContactRequest, LoginRequest, RegisterRequest, UserProfile};
use alpha_sdk::{AlphaClient, SdkError};
use tracing::{debug, info, warn};

/// Id of the login modal.
pub const LOGIN_MODAL: &str = "loginModal";
/// Id of the register modal.
pub const REGISTER_MODAL: &str = "registerModal";

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// Which header elements are visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    /// Login and register links shown, user menu hidden.
    Anonymous,
    /// User menu shown, login and register links hidden.
    SignedIn(UserProfile),
}

impl NavState {
    /// Whether the login / register links are shown.
    pub fn shows_auth_links(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Whether the user menu is shown.
    pub fn shows_user_menu(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }
}

/// Ask the backend who is logged in. Any failure counts as anonymous.
pub async fn detect_session(client: &AlphaClient) -> NavState {
    match client.me().await {
        Ok(profile) => {
            debug!(user = %profile.id, "session found");
            NavState::SignedIn(profile)
        }
        Err(e) => {
            debug!(error = %e, "no session");
            NavState::Anonymous
        }
    }
}

/// Avatar dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserMenu {
    open: bool,
}

impl UserMenu {
    /// Whether the dropdown is shown (mirrors `aria-expanded`).
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Avatar click.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Any click on the document; clicks outside the menu close it.
    pub fn document_click(&mut self, inside_menu: bool) {
        if !inside_menu {
            self.open = false;
        }
    }
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// Styling of an inline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Failure.
    Error,
    /// Success.
    Success,
}

impl Tone {
    /// Class attribute for the message element.
    pub fn class(self) -> &'static str {
        match self {
            Self::Error => "result-box error",
            Self::Success => "result-box success",
        }
    }
}

/// Inline message under a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    /// Text content.
    pub text: String,
    /// Styling.
    pub tone: Tone,
}

impl FormMessage {
    fn error(err: &SdkError, fallback: &str) -> Self {
        Self {
            text: err.server_message().unwrap_or(fallback).to_string(),
            tone: Tone::Error,
        }
    }

    fn success(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tone: Tone::Success,
        }
    }
}

/// What the page does after showing the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    /// Nothing.
    Stay,
    /// Reload the page after the delay.
    Reload {
        /// Delay before reloading.
        after: Duration,
    },
    /// Close one modal and open another after the delay.
    SwapModals {
        /// Modal to close.
        close: &'static str,
        /// Modal to open.
        open: &'static str,
        /// Delay before swapping.
        after: Duration,
    },
}

/// Result of submitting a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOutcome {
    /// Message to show.
    pub message: FormMessage,
    /// Page action to take afterwards.
    pub follow_up: FollowUp,
}

/// Login form.
pub async fn submit_login(client: &AlphaClient, req: &LoginRequest) -> FormOutcome {
    match client.login(req).await {
        Ok(profile) => {
            info!(user = %profile.id, "logged in");
            FormOutcome {
                message: FormMessage::success("Login successful!"),
                follow_up: FollowUp::Reload {
                    after: Duration::from_millis(700),
                },
            }
        }
        Err(e) => {
            warn!(error = %e, "login failed");
            FormOutcome {
                message: FormMessage::error(&e, "Login failed"),
                follow_up: FollowUp::Stay,
            }
        }
    }
}

/// Register form.
pub async fn submit_register(client: &AlphaClient, req: &RegisterRequest) -> FormOutcome {
    match client.register(req).await {
        Ok(_) => {
            info!("registered");
            FormOutcome {
                message: FormMessage::success("Registered! You can login now."),
                follow_up: FollowUp::SwapModals {
                    close: REGISTER_MODAL,
                    open: LOGIN_MODAL,
                    after: Duration::from_millis(800),
                },
            }
        }
        Err(e) => {
            warn!(error = %e, "registration failed");
            FormOutcome {
                message: FormMessage::error(&e, "Registration failed"),
                follow_up: FollowUp::Stay,
            }
        }
    }
}

/// Logout button. The page reloads whatever the outcome.
pub async fn logout(client: &AlphaClient) -> FollowUp {
    if let Err(e) = client.logout().await {
        warn!(error = %e, "logout request failed");
    }
    FollowUp::Reload {
        after: Duration::ZERO,
    }
}

/// Contact form. Returns the text for the result element; the form is reset
/// afterwards either way.
pub async fn submit_contact(client: &AlphaClient, req: &ContactRequest) -> String {
    match client.contact(req).await {
        Ok(res) => res.message.unwrap_or_else(|| "Sent!".to_string()),
        Err(e) => {
            warn!(error = %e, "contact form failed");
            e.server_message()
                .unwrap_or("Could not send message.")
                .to_string()
        }
    }
}
