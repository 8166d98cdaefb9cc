//! Payment webhook signatures and payload.
//!
//! The provider signs the raw request body with HMAC-SHA256 using the shared
//! webhook secret and sends the hex digest in a header.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Event name for a captured payment.
pub const PAYMENT_CAPTURED: &str = "payment.captured";

/// Check `signature_hex` against the HMAC-SHA256 of `body` in constant time.
pub fn verify_signature(secret: &[u8], body: &[u8], signature_hex: &str) -> bool {
    let Some(expected) = hex_decode(signature_hex.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Webhook body. Only the fields the backend acts on are modelled; the
/// payload stays untyped until the event is known to carry a payment.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    /// Event name, e.g. `payment.captured`.
    #[serde(default)]
    pub event: String,
    /// Event payload, shaped per event.
    #[serde(default)]
    pub payload: Option<Value>,
}

/// `payload.payment.entity` object.
#[derive(Debug, Deserialize)]
pub struct PaymentEntity {
    /// Provider payment id.
    pub id: String,
    /// Provider order id the payment belongs to.
    pub order_id: String,
}

impl WebhookEvent {
    /// The captured payment, when this is a `payment.captured` event whose
    /// entity names both a payment and an order.
    pub fn captured_payment(&self) -> Option<PaymentEntity> {
        if self.event != PAYMENT_CAPTURED {
            return None;
        }
        let entity = self.payload.as_ref()?.pointer("/payment/entity")?;
        PaymentEntity::deserialize(entity).ok()
    }
}

/// Hex HMAC-SHA256 of `body`, as the provider would send it.
#[cfg(test)]
pub fn sign(secret: &[u8], body: &[u8]) -> String {
    use std::fmt::Write;

    let mut mac = HmacSha256::new_from_slice(secret).unwrap();
    mac.update(body);
    mac.finalize()
        .into_bytes()
        .iter()
        .fold(String::new(), |mut out, b| {
            let _ = write!(out, "{b:02x}");
            out
        })
}
