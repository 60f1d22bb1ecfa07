//! Production record HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::{require_admin, CurrentUser};
use crate::services::production::{CreateProductionInput, ProductionService, UpdateProductionInput};
use crate::AppState;

/// List all productions
pub async fn list_productions(State(state): State<AppState>) -> impl IntoResponse {
    let service = ProductionService::new(state.db.clone());

    match service.list().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific production
pub async fn get_production(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ProductionService::new(state.db.clone());

    match service.get(id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a new production
pub async fn create_production(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<CreateProductionInput>,
) -> impl IntoResponse {
    if let Err(e) = require_admin(&user) {
        return e.into_response();
    }
    let service = ProductionService::new(state.db.clone());

    match service.create(input).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Correct a production
pub async fn update_production(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProductionInput>,
) -> impl IntoResponse {
    if let Err(e) = require_admin(&user) {
        return e.into_response();
    }
    let service = ProductionService::new(state.db.clone());

    match service.update(id, input).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a production
pub async fn delete_production(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(e) = require_admin(&user) {
        return e.into_response();
    }
    let service = ProductionService::new(state.db.clone());

    match service.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
