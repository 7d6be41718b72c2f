//! EMI payment HTTP handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use validator::Validate;

use super::{AdminUser, AuthenticatedUser};
use crate::error::ApiError;
use crate::payment::{CreateIntentRequest, CreateIntentResponse, PayEmiRequest, Payment};
use crate::state::AppState;

/// Response wrapper carrying a status message next to the payment
#[derive(Debug, Serialize)]
pub struct PaymentActionResponse {
    pub message: String,
    pub payment: Payment,
}

/// POST /api/payments/pay - Record a completed EMI payment
///
/// Called after the gateway confirms the charge client-side; the gateway's
/// payment id travels along as the reconciliation reference.
pub async fn pay_emi(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<PayEmiRequest>,
) -> Result<(StatusCode, Json<PaymentActionResponse>), ApiError> {
    req.validate()?;

    let payment = state
        .payment_service
        .record_payment(req.loan_id, user.user_id, req.amount, req.payment_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PaymentActionResponse {
            message: "Payment successful".to_string(),
            payment,
        }),
    ))
}

/// POST /api/payments/create-intent - Open a card payment intent
pub async fn create_payment_intent(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(req): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>, ApiError> {
    req.validate()?;

    let intent = state.gateway.create_intent(req.amount).await?;

    Ok(Json(CreateIntentResponse {
        client_secret: intent.client_secret,
    }))
}

/// GET /api/payments/history - The caller's own payments
pub async fn payment_history(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Payment>>, ApiError> {
    let payments = state.payment_service.history_for(user.user_id).await?;

    Ok(Json(payments))
}

/// GET /api/payments/all - Every payment on the platform (admin only)
pub async fn list_all_payments(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Vec<Payment>>, ApiError> {
    let payments = state.payment_service.list_all().await?;

    Ok(Json(payments))
}
