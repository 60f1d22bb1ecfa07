//! Shipment record HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::{require_admin, CurrentUser};
use crate::services::shipment::{CreateShipmentInput, ShipmentService, UpdateShipmentInput};
use crate::AppState;

/// List all shipments
pub async fn list_shipments(State(state): State<AppState>) -> impl IntoResponse {
    let service = ShipmentService::new(state.db.clone());

    match service.list().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific shipment
pub async fn get_shipment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let service = ShipmentService::new(state.db.clone());

    match service.get(id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a new shipment
pub async fn create_shipment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<CreateShipmentInput>,
) -> impl IntoResponse {
    if let Err(e) = require_admin(&user) {
        return e.into_response();
    }
    let service = ShipmentService::new(state.db.clone());

    match service.create(input).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Correct a shipment
pub async fn update_shipment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateShipmentInput>,
) -> impl IntoResponse {
    if let Err(e) = require_admin(&user) {
        return e.into_response();
    }
    let service = ShipmentService::new(state.db.clone());

    match service.update(id, input).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a shipment
pub async fn delete_shipment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(e) = require_admin(&user) {
        return e.into_response();
    }
    let service = ShipmentService::new(state.db.clone());

    match service.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
