//! Payment route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::payment;
use crate::state::AppState;

pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/api/payments/pay", post(payment::pay_emi))
        .route(
            "/api/payments/create-intent",
            post(payment::create_payment_intent),
        )
        .route("/api/payments/history", get(payment::payment_history))
        .route("/api/payments/all", get(payment::list_all_payments))
}
