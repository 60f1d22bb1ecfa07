//! User management handlers (admin only)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::{require_admin, CurrentUser};
use crate::services::user::CreateUserInput;
use crate::services::UserService;
use crate::AppState;
use shared::models::User;

/// List all users
pub async fn list_users(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    require_admin(&user)?;
    let service = UserService::new(state.db.clone());
    Ok(Json(service.list().await?))
}

/// Create a user
pub async fn create_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<CreateUserInput>,
) -> AppResult<(StatusCode, Json<User>)> {
    require_admin(&user)?;
    let service = UserService::new(state.db.clone());
    let created = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(user_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_admin(&user)?;
    let service = UserService::new(state.db.clone());
    service
        .delete(user_id, &state.config.admin.username)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
