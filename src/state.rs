//! Application state shared across handlers

use std::sync::Arc;

use crate::auth::AuthService;
use crate::gateway::PaymentGateway;
use crate::loan_service::LoanService;
use crate::payment_service::PaymentService;

use axum::extract::FromRef;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub loan_service: Arc<LoanService>,
    pub payment_service: Arc<PaymentService>,
    pub gateway: Arc<PaymentGateway>,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AuthService>,
        loan_service: Arc<LoanService>,
        payment_service: Arc<PaymentService>,
        gateway: Arc<PaymentGateway>,
    ) -> Self {
        Self {
            auth_service,
            loan_service,
            payment_service,
            gateway,
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<LoanService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.loan_service.clone()
    }
}

impl FromRef<AppState> for Arc<PaymentService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.payment_service.clone()
    }
}

impl FromRef<AppState> for Arc<PaymentGateway> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.gateway.clone()
    }
}
