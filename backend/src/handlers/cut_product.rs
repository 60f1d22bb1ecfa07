//! Cutting job HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::{require_admin, CurrentUser};
use crate::services::cut_product::{
    CreateCutProductInput, CutProductService, UpdateCutProductInput,
};
use crate::AppState;

/// List all cutting jobs
pub async fn list_cut_products(State(state): State<AppState>) -> impl IntoResponse {
    let service = CutProductService::new(state.db.clone());

    match service.list().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific cutting job
pub async fn get_cut_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CutProductService::new(state.db.clone());

    match service.get(id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a new cutting job
pub async fn create_cut_product(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<CreateCutProductInput>,
) -> impl IntoResponse {
    if let Err(e) = require_admin(&user) {
        return e.into_response();
    }
    let service = CutProductService::new(state.db.clone());

    match service.create(input).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a cutting job
pub async fn update_cut_product(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateCutProductInput>,
) -> impl IntoResponse {
    if let Err(e) = require_admin(&user) {
        return e.into_response();
    }
    let service = CutProductService::new(state.db.clone());

    match service.update(id, input).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a cutting job
pub async fn delete_cut_product(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(e) = require_admin(&user) {
        return e.into_response();
    }
    let service = CutProductService::new(state.db.clone());

    match service.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
