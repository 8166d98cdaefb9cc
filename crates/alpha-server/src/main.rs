//! Alpha Fitness backend.
//!
//! Serves the site's pages and the JSON API the page scripts call:
//!
//! 1. Accounts with cookie sessions (register, login, me, logout).
//! 2. The services catalogue and bookings, each booking paired with a
//!    payment order from the provider.
//! 3. The provider's signed webhook, which marks captured bookings paid.
//! 4. The contact form.

mod config;
mod error;
mod payments;
mod routes;
mod session;
mod store;
mod webhook;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::payments::{PaymentGateway, RazorpayGateway};
use crate::store::MemoryStore;

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// State shared across all Axum handlers.
pub struct AppState {
    /// Startup configuration.
    pub config: ServerConfig,
    /// Users, sessions, catalogue, bookings and messages.
    pub store: MemoryStore,
    /// Payment order provider.
    pub gateway: Arc<dyn PaymentGateway>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    if config.razorpay.key_id.is_empty() || config.razorpay.webhook_secret.is_empty() {
        warn!("payment provider credentials not configured (RAZORPAY_* env vars)");
    }
    info!(
        static_dir = %config.static_dir.display(),
        payments_api = %config.razorpay.api_url,
        "configuration loaded"
    );

    let store = MemoryStore::seeded();
    info!(services = store.active_services().len(), "catalogue seeded");

    let port = config.port;
    let state = Arc::new(AppState {
        gateway: Arc::new(RazorpayGateway::new(config.razorpay.clone())),
        store,
        config,
    });
    let app = routes::router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(address = %addr, "alpha server listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
