//! Server configuration.
//!
//! Built once from environment variables at startup and shared with every
//! handler through [`crate::AppState`].

use std::path::PathBuf;

/// Payment provider credentials and endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RazorpayConfig {
    /// Public key id, also handed to the checkout.
    pub key_id: String,
    /// Secret used for basic auth against the orders API.
    pub key_secret: String,
    /// Shared secret for webhook signatures.
    pub webhook_secret: String,
    /// Base URL of the REST API.
    pub api_url: String,
}

/// Global configuration shared across all handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port to listen on (default `5000`).
    pub port: u16,
    /// Directory holding the page files (default `static`).
    pub static_dir: PathBuf,
    /// Payment provider settings.
    pub razorpay: RazorpayConfig,
}

impl ServerConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                  | Default                        |
    /// |---------------------------|--------------------------------|
    /// | `PORT`                    | `5000`                         |
    /// | `STATIC_DIR`              | `static`                       |
    /// | `RAZORPAY_KEY_ID`         | empty                          |
    /// | `RAZORPAY_KEY_SECRET`     | empty                          |
    /// | `RAZORPAY_WEBHOOK_SECRET` | empty                          |
    /// | `RAZORPAY_API_URL`        | `https://api.razorpay.com/v1`  |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = lookup("PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(5000);

        Self {
            port,
            static_dir: PathBuf::from(var("STATIC_DIR", "static")),
            razorpay: RazorpayConfig {
                key_id: var("RAZORPAY_KEY_ID", ""),
                key_secret: var("RAZORPAY_KEY_SECRET", ""),
                webhook_secret: var("RAZORPAY_WEBHOOK_SECRET", ""),
                api_url: var("RAZORPAY_API_URL", "https://api.razorpay.com/v1")
                    .trim_end_matches('/')
                    .to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]);
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.static_dir, PathBuf::from("static"));
        assert_eq!(cfg.razorpay.api_url, "https://api.razorpay.com/v1");
        assert!(cfg.razorpay.key_id.is_empty());
    }

    #[test]
    fn overrides_and_bad_port() {
        let cfg = config(&[
            ("PORT", "not-a-port"),
            ("STATIC_DIR", "/srv/site"),
            ("RAZORPAY_KEY_ID", "rzp_test_1"),
            ("RAZORPAY_API_URL", "http://localhost:9000/v1/"),
        ]);
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.static_dir, PathBuf::from("/srv/site"));
        assert_eq!(cfg.razorpay.key_id, "rzp_test_1");
        assert_eq!(cfg.razorpay.api_url, "http://localhost:9000/v1");
    }
}
