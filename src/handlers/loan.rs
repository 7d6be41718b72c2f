//! Loan application HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use super::{AdminUser, AuthenticatedUser};
use crate::error::ApiError;
use crate::loan::{AdminStats, ApplyLoanRequest, DecideLoanRequest, Loan};
use crate::models::UserRole;
use crate::state::AppState;

/// Response wrapper carrying a status message next to the loan
#[derive(Debug, Serialize)]
pub struct LoanActionResponse {
    pub message: String,
    pub loan: Loan,
}

/// POST /api/loans/apply - Submit a loan application
pub async fn apply_loan(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<ApplyLoanRequest>,
) -> Result<(StatusCode, Json<LoanActionResponse>), ApiError> {
    req.validate()?;

    let loan = state.loan_service.apply(user.user_id, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(LoanActionResponse {
            message: "Loan application submitted successfully".to_string(),
            loan,
        }),
    ))
}

/// GET /api/loans - List loans
///
/// Admins see every application on the platform; customers see only their
/// own.
pub async fn list_loans(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Loan>>, ApiError> {
    let loans = match user.role {
        UserRole::Admin => state.loan_service.list_all().await?,
        UserRole::Customer => state.loan_service.list_for_borrower(user.user_id).await?,
    };

    Ok(Json(loans))
}

/// PUT /api/loans/:id/status - Approve or reject an application (admin only)
pub async fn decide_loan(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(loan_id): Path<Uuid>,
    Json(req): Json<DecideLoanRequest>,
) -> Result<Json<LoanActionResponse>, ApiError> {
    let loan = state
        .loan_service
        .decide(loan_id, req.status, req.admin_remarks)
        .await?;

    tracing::info!(
        loan_id = %loan.id,
        admin_id = %admin.user_id,
        status = ?loan.status,
        "Loan decision applied"
    );

    Ok(Json(LoanActionResponse {
        message: "Loan status updated".to_string(),
        loan,
    }))
}

/// GET /api/loans/stats - Portfolio aggregates (admin only)
pub async fn loan_stats(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<AdminStats>, ApiError> {
    let stats = state.loan_service.admin_stats().await?;

    Ok(Json(stats))
}
