//! User profile handlers

use axum::{extract::State, Json};
use validator::Validate;

use super::{AdminUser, AuthenticatedUser};
use crate::error::ApiError;
use crate::models::{UpdateProfileRequest, UserResponse};
use crate::state::AppState;

/// GET /api/users/profile - Get the caller's own profile
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserResponse>, ApiError> {
    let profile = state.auth_service.get_user_by_id(user.user_id).await?;

    Ok(Json(profile.into()))
}

/// PUT /api/users/profile - Update the caller's name and/or phone
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    req.validate()?;

    let updated = state
        .auth_service
        .update_profile(user.user_id, req.name, req.phone)
        .await?;

    Ok(Json(updated.into()))
}

/// GET /api/users - List every account (admin only)
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.auth_service.list_users().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
