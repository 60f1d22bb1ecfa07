//! Daily consumption HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::{require_admin, CurrentUser};
use crate::services::consumption::{CreateConsumptionInput, ConsumptionService, UpdateConsumptionInput};
use crate::AppState;

/// List all daily consumption entries
pub async fn list_consumptions(State(state): State<AppState>) -> impl IntoResponse {
    let service = ConsumptionService::new(state.db.clone());

    match service.list().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific daily consumption entry
pub async fn get_consumption(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ConsumptionService::new(state.db.clone());

    match service.get(id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a new daily consumption entry
pub async fn create_consumption(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<CreateConsumptionInput>,
) -> impl IntoResponse {
    if let Err(e) = require_admin(&user) {
        return e.into_response();
    }
    let service = ConsumptionService::new(state.db.clone());

    match service.create(input).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Correct a daily consumption entry
pub async fn update_consumption(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateConsumptionInput>,
) -> impl IntoResponse {
    if let Err(e) = require_admin(&user) {
        return e.into_response();
    }
    let service = ConsumptionService::new(state.db.clone());

    match service.update(id, input).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a daily consumption entry
pub async fn delete_consumption(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(e) = require_admin(&user) {
        return e.into_response();
    }
    let service = ConsumptionService::new(state.db.clone());

    match service.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
