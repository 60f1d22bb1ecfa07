//! Raw material purchase HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::{require_admin, CurrentUser};
use crate::services::raw_material::{CreateRawMaterialInput, RawMaterialService, UpdateRawMaterialInput};
use crate::AppState;

/// List all raw material purchases
pub async fn list_raw_materials(State(state): State<AppState>) -> impl IntoResponse {
    let service = RawMaterialService::new(state.db.clone());

    match service.list().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific raw material purchase
pub async fn get_raw_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let service = RawMaterialService::new(state.db.clone());

    match service.get(id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a new raw material purchase
pub async fn create_raw_material(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<CreateRawMaterialInput>,
) -> impl IntoResponse {
    if let Err(e) = require_admin(&user) {
        return e.into_response();
    }
    let service = RawMaterialService::new(state.db.clone());

    match service.create(input).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Correct a raw material purchase
pub async fn update_raw_material(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateRawMaterialInput>,
) -> impl IntoResponse {
    if let Err(e) = require_admin(&user) {
        return e.into_response();
    }
    let service = RawMaterialService::new(state.db.clone());

    match service.update(id, input).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a raw material purchase
pub async fn delete_raw_material(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(e) = require_admin(&user) {
        return e.into_response();
    }
    let service = RawMaterialService::new(state.db.clone());

    match service.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
