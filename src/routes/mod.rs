//! Route definitions for the loan platform API

use axum::Router;

use crate::state::AppState;

mod auth;
mod loan;
mod payment;
mod user;

pub use auth::auth_routes;
pub use loan::loan_routes;
pub use payment::payment_routes;
pub use user::user_routes;

/// Assemble every API route group into one router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(loan_routes())
        .merge(payment_routes())
}
