//! Payment provider client.
//!
//! The booking handler only sees [`PaymentGateway`]; production uses
//! [`RazorpayGateway`], which creates orders through the provider's REST API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RazorpayConfig;
use crate::error::ApiError;

/// Body of an order creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    /// Amount in paise.
    pub amount: u64,
    /// Currency code.
    pub currency: String,
    /// Merchant reference, `bk_{booking_id}`.
    pub receipt: String,
    /// Capture the payment automatically (`1`).
    pub payment_capture: u8,
}

impl OrderRequest {
    /// Order for a booking, auto-captured.
    pub fn for_booking(booking_id: impl std::fmt::Display, amount_paise: u64, currency: &str) -> Self {
        Self {
            amount: amount_paise,
            currency: currency.to_string(),
            receipt: format!("bk_{booking_id}"),
            payment_capture: 1,
        }
    }
}

/// The part of the provider's order we keep.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayOrder {
    /// Provider order id.
    pub id: String,
}

/// Something that can create payment orders.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Public key id handed to the checkout.
    fn key_id(&self) -> &str;

    /// Create an order.
    async fn create_order(&self, req: &OrderRequest) -> Result<GatewayOrder, ApiError>;
}

/// Orders API client.
#[derive(Debug, Clone)]
pub struct RazorpayGateway {
    http: reqwest::Client,
    config: RazorpayConfig,
}

impl RazorpayGateway {
    /// Client using `config` for credentials and endpoint.
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    fn key_id(&self) -> &str {
        &self.config.key_id
    }

    async fn create_order(&self, req: &OrderRequest) -> Result<GatewayOrder, ApiError> {
        let url = format!("{}/orders", self.config.api_url);
        debug!(%url, receipt = %req.receipt, amount = req.amount, "creating order");

        let res = self
            .http
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(req)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Gateway(format!("provider returned {status}: {text}")));
        }

        let order: GatewayOrder = res.json().await?;
        info!(order = %order.id, receipt = %req.receipt, "order created");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::extract::Json;
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::response::IntoResponse;
    use axum::routing::post;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn gateway(api_url: String) -> RazorpayGateway {
        RazorpayGateway::new(RazorpayConfig {
            key_id: "rzp_test".into(),
            key_secret: "secret".into(),
            webhook_secret: String::new(),
            api_url,
        })
    }

    #[test]
    fn receipt_names_the_booking() {
        let req = OrderRequest::for_booking(7, 299_900, "INR");
        assert_eq!(req.receipt, "bk_7");
        assert_eq!(req.payment_capture, 1);
    }

    #[tokio::test]
    async fn creates_order_with_basic_auth() {
        async fn orders(headers: HeaderMap, Json(body): Json<serde_json::Value>) -> impl IntoResponse {
            let auth = headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            // "rzp_test:secret"
            if auth != "Basic cnpwX3Rlc3Q6c2VjcmV0" {
                return (StatusCode::UNAUTHORIZED, Json(serde_json::json!({}))).into_response();
            }
            Json(serde_json::json!({
                "id": format!("order_{}", body["receipt"].as_str().unwrap_or_default()),
                "amount": body["amount"],
                "status": "created",
            }))
            .into_response()
        }
        let base = spawn(Router::new().route("/v1/orders", post(orders))).await;

        let order = gateway(base)
            .create_order(&OrderRequest::for_booking(1, 100, "INR"))
            .await
            .unwrap();
        assert_eq!(order.id, "order_bk_1");
    }

    #[tokio::test]
    async fn provider_error_becomes_gateway_error() {
        async fn orders() -> impl IntoResponse {
            (StatusCode::BAD_REQUEST, "bad amount")
        }
        let base = spawn(Router::new().route("/v1/orders", post(orders))).await;

        let err = gateway(base)
            .create_order(&OrderRequest::for_booking(1, 0, "INR"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Gateway(ref m) if m.contains("bad amount")));
    }
}
