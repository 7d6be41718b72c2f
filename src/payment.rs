//! Payment model
//!
//! Payments form an append-only ledger: one record per payment attempt,
//! immutable once written. Recording a payment triggers reconciliation
//! against the loan's EMI schedule (see `payment_service`).

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

/// Payment status enum
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
    Failed,
}

/// Payment model
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub loan_id: Uuid,
    pub payer_id: Uuid,
    pub amount: i64,
    pub status: PaymentStatus,
    /// Confirmed payment-intent id from the card gateway, when one exists.
    pub gateway_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to pay the next due EMI of a loan
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PayEmiRequest {
    pub loan_id: Uuid,
    #[validate(range(min = 1, max = 1_000_000_000, message = "amount must be between 1 and 1,000,000,000"))]
    pub amount: i64,
    /// Gateway payment id returned by the client-side confirmation.
    pub payment_id: Option<String>,
}

/// Request to open a payment intent with the card gateway
#[derive(Debug, Deserialize, Validate)]
pub struct CreateIntentRequest {
    /// Bounded so the gateway's minor-unit conversion cannot overflow.
    #[validate(range(min = 1, max = 1_000_000_000, message = "amount must be between 1 and 1,000,000,000"))]
    pub amount: i64,
}

/// Client secret handed back to the browser to confirm the card payment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentResponse {
    pub client_secret: String,
}
