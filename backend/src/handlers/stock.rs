//! Stock handlers

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::StockService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct StockQuery {
    pub format: Option<String>, // "json" or "csv"
}

/// Current stock for every stock-keeping unit
pub async fn get_stock(
    State(state): State<AppState>,
    Query(query): Query<StockQuery>,
) -> AppResult<Response> {
    let service = StockService::new(state.db.clone(), state.config.stock.normal_totals);
    let buckets = service.compute_stock().await?;

    if query.format.as_deref() == Some("csv") {
        let csv = StockService::export_to_csv(&buckets)?;
        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"stock.csv\""),
            ],
            csv,
        )
            .into_response());
    }

    Ok(Json(buckets).into_response())
}
