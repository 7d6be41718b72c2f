//! Card payment gateway client
//!
//! Thin HTTP client over a Stripe-style payment-intent API. The backend only
//! ever creates intents; card collection and confirmation happen in the
//! browser against the gateway directly.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Gateway errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Gateway request failed: {0}")]
    Request(String),

    #[error("Gateway returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        GatewayError::Request(e.to_string())
    }
}

/// A freshly created payment intent, ready for client-side confirmation.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

/// Client for the card payment gateway
#[derive(Clone)]
pub struct PaymentGateway {
    client: Client,
    base_url: String,
    secret_key: String,
    currency: String,
}

impl PaymentGateway {
    /// Create a new gateway client
    pub fn new(base_url: String, secret_key: String, currency: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url,
            secret_key,
            currency,
        }
    }

    /// Create a payment intent for the given amount (major currency units).
    ///
    /// The gateway wire format takes minor units, so the amount is scaled by
    /// 100 before sending.
    pub async fn create_intent(&self, amount: i64) -> Result<PaymentIntent, GatewayError> {
        let url = format!("{}/v1/payment_intents", self.base_url);
        let minor_units = amount * 100;

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&[
                ("amount", minor_units.to_string()),
                ("currency", self.currency.clone()),
                ("automatic_payment_methods[enabled]", "true".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_gateway_message(&body);
            tracing::warn!(status = status.as_u16(), %message, "Gateway rejected intent");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let intent: PaymentIntent = response.json().await?;
        tracing::debug!(intent_id = %intent.id, "Payment intent created");

        Ok(intent)
    }
}

/// Pull a human-readable message out of a gateway error body.
///
/// The gateway wraps failures as `{"error": {"message": "..."}}`; anything
/// else is passed through truncated so a giant HTML error page never lands
/// in our logs or responses whole.
fn extract_gateway_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "gateway returned an empty error body".to_string();
    }

    trimmed.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_structured_gateway_error() {
        let body = r#"{"error": {"message": "Amount must be at least 50 cents", "type": "invalid_request_error"}}"#;
        assert_eq!(
            extract_gateway_message(body),
            "Amount must be at least 50 cents"
        );
    }

    #[test]
    fn falls_back_to_raw_body() {
        assert_eq!(extract_gateway_message("upstream timeout"), "upstream timeout");
    }

    #[test]
    fn truncates_oversized_bodies() {
        let body = "x".repeat(5000);
        assert_eq!(extract_gateway_message(&body).len(), 200);
    }

    #[test]
    fn handles_empty_body() {
        assert_eq!(
            extract_gateway_message(""),
            "gateway returned an empty error body"
        );
    }
}
