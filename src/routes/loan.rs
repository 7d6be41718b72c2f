//! Loan route definitions

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::loan;
use crate::state::AppState;

pub fn loan_routes() -> Router<AppState> {
    Router::new()
        .route("/api/loans/apply", post(loan::apply_loan))
        .route("/api/loans", get(loan::list_loans))
        .route("/api/loans/:id/status", put(loan::decide_loan))
        .route("/api/loans/stats", get(loan::loan_stats))
}
