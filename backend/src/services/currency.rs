//! Exchange rate service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use shared::models::{CurrencyRate, ExchangeRates};
use shared::validation::check_dimension;

/// Currency service; the newest stored rate set is the current one
#[derive(Clone)]
pub struct CurrencyService {
    db: PgPool,
}

/// Input for posting new rates
#[derive(Debug, Deserialize, Validate)]
pub struct SetRatesInput {
    #[validate(custom = "check_dimension")]
    pub usd_rate: Decimal,
    #[validate(custom = "check_dimension")]
    pub eur_rate: Decimal,
}

/// Current rates as returned to clients
#[derive(Debug, Serialize)]
pub struct CurrentRates {
    pub usd_rate: Decimal,
    pub eur_rate: Decimal,
    /// Absent when no rate set was ever stored
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Option<CurrencyRate>> for CurrentRates {
    fn from(rate: Option<CurrencyRate>) -> Self {
        match rate {
            Some(rate) => CurrentRates {
                usd_rate: rate.usd_rate,
                eur_rate: rate.eur_rate,
                updated_at: Some(rate.updated_at),
            },
            None => {
                let rates = ExchangeRates::default();
                CurrentRates {
                    usd_rate: rates.usd_rate,
                    eur_rate: rates.eur_rate,
                    updated_at: None,
                }
            }
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CurrencyRateRow {
    id: Uuid,
    usd_rate: Decimal,
    eur_rate: Decimal,
    updated_at: DateTime<Utc>,
}

impl From<CurrencyRateRow> for CurrencyRate {
    fn from(row: CurrencyRateRow) -> Self {
        CurrencyRate {
            id: row.id,
            usd_rate: row.usd_rate,
            eur_rate: row.eur_rate,
            updated_at: row.updated_at,
        }
    }
}

impl CurrencyService {
    /// Create a new CurrencyService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Newest stored rate set, if any
    pub async fn latest(&self) -> AppResult<Option<CurrencyRate>> {
        let row = sqlx::query_as::<_, CurrencyRateRow>(
            r#"
            SELECT id, usd_rate, eur_rate, updated_at
            FROM currency_rates
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(CurrencyRate::from))
    }

    /// Rates used for conversion, falling back to 1:1
    pub async fn current_rates(&self) -> AppResult<ExchangeRates> {
        Ok(self
            .latest()
            .await?
            .map(|rate| rate.rates())
            .unwrap_or_default())
    }

    /// Store a new rate set
    pub async fn set_rates(&self, input: SetRatesInput) -> AppResult<CurrencyRate> {
        input.validate()?;

        let row = sqlx::query_as::<_, CurrencyRateRow>(
            r#"
            INSERT INTO currency_rates (id, usd_rate, eur_rate)
            VALUES ($1, $2, $3)
            RETURNING id, usd_rate, eur_rate, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.usd_rate)
        .bind(input.eur_rate)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(usd = %row.usd_rate, eur = %row.eur_rate, "Exchange rates updated");
        Ok(row.into())
    }
}
