//! User route definitions

use axum::{
    routing::{get, put},
    Router,
};

use crate::handlers::user;
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/profile", get(user::get_profile))
        .route("/api/users/profile", put(user::update_profile))
        .route("/api/users", get(user::list_users))
}
