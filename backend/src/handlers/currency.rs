//! Exchange rate handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::middleware::{require_admin, CurrentUser};
use crate::services::currency::{CurrentRates, SetRatesInput};
use crate::services::CurrencyService;
use crate::AppState;
use shared::models::CurrencyRate;

/// Current exchange rates
pub async fn get_currency_rates(State(state): State<AppState>) -> AppResult<Json<CurrentRates>> {
    let service = CurrencyService::new(state.db.clone());
    Ok(Json(service.latest().await?.into()))
}

/// Store new exchange rates
pub async fn set_currency_rates(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<SetRatesInput>,
) -> AppResult<(StatusCode, Json<CurrencyRate>)> {
    require_admin(&user)?;
    let service = CurrencyService::new(state.db.clone());
    let rate = service.set_rates(input).await?;
    Ok((StatusCode::CREATED, Json(rate)))
}
