//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::services::auth::{ChangePasswordInput, LoginInput, LoginResponse};
use crate::services::AuthService;
use crate::AppState;
use shared::models::User;

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginInput>,
) -> Result<Json<LoginResponse>, AppError> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let response = auth_service.login(body).await?;
    Ok(Json(response))
}

/// Current user endpoint handler
pub async fn me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<User>, AppError> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    Ok(Json(auth_service.me(user.user_id).await?))
}

/// Change password endpoint handler
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<ChangePasswordInput>,
) -> Result<StatusCode, AppError> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    auth_service.change_password(user.user_id, body).await?;
    Ok(StatusCode::NO_CONTENT)
}
