//! Raw material purchase service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::currency::CurrencyService;
use shared::models::{Currency, MaterialPricing, MaterialUnit, RawMaterial};
use shared::validation::check_quantity;

/// Raw material service; totals are priced at the current exchange rate on write
#[derive(Clone)]
pub struct RawMaterialService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
pub struct RawMaterialRow {
    pub id: Uuid,
    pub entry_date: NaiveDate,
    pub name: String,
    pub unit: String,
    pub quantity: Decimal,
    pub currency: String,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub exchange_rate: Decimal,
    pub total_try: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<RawMaterialRow> for RawMaterial {
    fn from(row: RawMaterialRow) -> Self {
        RawMaterial {
            id: row.id,
            entry_date: row.entry_date,
            name: row.name,
            unit: MaterialUnit::from_str(&row.unit).unwrap_or(MaterialUnit::Kilogram),
            quantity: row.quantity,
            currency: Currency::from_str(&row.currency).unwrap_or_default(),
            unit_price: row.unit_price,
            total_amount: row.total_amount,
            exchange_rate: row.exchange_rate,
            total_try: row.total_try,
            created_at: row.created_at,
        }
    }
}

/// Input for recording a purchase
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRawMaterialInput {
    pub entry_date: NaiveDate,
    #[validate(length(min = 1, message = "Material name is required"))]
    pub name: String,
    pub unit: MaterialUnit,
    #[validate(custom = "check_quantity")]
    pub quantity: Decimal,
    #[serde(default)]
    pub currency: Currency,
    #[validate(custom = "check_quantity")]
    pub unit_price: Decimal,
}

/// Input for correcting a purchase; absent fields keep their value
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateRawMaterialInput {
    pub entry_date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Material name is required"))]
    pub name: Option<String>,
    pub unit: Option<MaterialUnit>,
    #[validate(custom = "check_quantity")]
    pub quantity: Option<Decimal>,
    pub currency: Option<Currency>,
    #[validate(custom = "check_quantity")]
    pub unit_price: Option<Decimal>,
}

impl UpdateRawMaterialInput {
    fn merge(self, current: RawMaterial) -> CreateRawMaterialInput {
        CreateRawMaterialInput {
            entry_date: self.entry_date.unwrap_or(current.entry_date),
            name: self.name.unwrap_or(current.name),
            unit: self.unit.unwrap_or(current.unit),
            quantity: self.quantity.unwrap_or(current.quantity),
            currency: self.currency.unwrap_or(current.currency),
            unit_price: self.unit_price.unwrap_or(current.unit_price),
        }
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, entry_date, name, unit, quantity, currency, unit_price, total_amount,
           exchange_rate, total_try, created_at
    FROM raw_materials
"#;

impl RawMaterialService {
    /// Create a new RawMaterialService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn pricing(&self, input: &CreateRawMaterialInput) -> AppResult<MaterialPricing> {
        let rates = CurrencyService::new(self.db.clone()).current_rates().await?;
        Ok(MaterialPricing::compute(
            input.quantity,
            input.unit_price,
            input.currency,
            &rates,
        ))
    }

    /// Record a purchase
    pub async fn create(&self, input: CreateRawMaterialInput) -> AppResult<RawMaterial> {
        input.validate()?;
        let pricing = self.pricing(&input).await?;

        let row = sqlx::query_as::<_, RawMaterialRow>(
            r#"
            INSERT INTO raw_materials (id, entry_date, name, unit, quantity, currency, unit_price,
                                       total_amount, exchange_rate, total_try)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, entry_date, name, unit, quantity, currency, unit_price, total_amount,
                      exchange_rate, total_try, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.entry_date)
        .bind(&input.name)
        .bind(input.unit.as_str())
        .bind(input.quantity)
        .bind(input.currency.as_str())
        .bind(input.unit_price)
        .bind(pricing.total_amount)
        .bind(pricing.exchange_rate)
        .bind(pricing.total_try)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(id = %row.id, name = %row.name, total_try = %row.total_try, "Raw material recorded");
        Ok(row.into())
    }

    /// All purchases, newest entry first
    pub async fn list(&self) -> AppResult<Vec<RawMaterial>> {
        let rows = sqlx::query_as::<_, RawMaterialRow>(&format!(
            "{} ORDER BY entry_date DESC, created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(RawMaterial::from).collect())
    }

    /// Get a purchase by ID
    pub async fn get(&self, id: Uuid) -> AppResult<RawMaterial> {
        let row = sqlx::query_as::<_, RawMaterialRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Raw material".to_string()))?;

        Ok(row.into())
    }

    /// Correct a purchase and reprice it at the current rate
    pub async fn update(&self, id: Uuid, input: UpdateRawMaterialInput) -> AppResult<RawMaterial> {
        input.validate()?;
        let merged = input.merge(self.get(id).await?);
        let pricing = self.pricing(&merged).await?;

        let row = sqlx::query_as::<_, RawMaterialRow>(
            r#"
            UPDATE raw_materials
            SET entry_date = $2, name = $3, unit = $4, quantity = $5, currency = $6,
                unit_price = $7, total_amount = $8, exchange_rate = $9, total_try = $10
            WHERE id = $1
            RETURNING id, entry_date, name, unit, quantity, currency, unit_price, total_amount,
                      exchange_rate, total_try, created_at
            "#,
        )
        .bind(id)
        .bind(merged.entry_date)
        .bind(&merged.name)
        .bind(merged.unit.as_str())
        .bind(merged.quantity)
        .bind(merged.currency.as_str())
        .bind(merged.unit_price)
        .bind(pricing.total_amount)
        .bind(pricing.exchange_rate)
        .bind(pricing.total_try)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Raw material".to_string()))?;

        tracing::info!(id = %id, "Raw material updated");
        Ok(row.into())
    }

    /// Delete a purchase
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM raw_materials WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Raw material".to_string()));
        }

        tracing::info!(id = %id, "Raw material deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> RawMaterial {
        RawMaterial {
            id: Uuid::new_v4(),
            entry_date: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
            name: "LDPE granül".to_string(),
            unit: MaterialUnit::Kilogram,
            quantity: Decimal::from(1000),
            currency: Currency::Usd,
            unit_price: Decimal::new(125, 2),
            total_amount: Decimal::from(1250),
            exchange_rate: Decimal::from(34),
            total_try: Decimal::from(42500),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_merge_keeps_absent_fields() {
        let merged = UpdateRawMaterialInput {
            quantity: Some(Decimal::from(800)),
            ..Default::default()
        }
        .merge(stored());
        assert_eq!(merged.quantity, Decimal::from(800));
        assert_eq!(merged.currency, Currency::Usd);
        assert_eq!(merged.name, "LDPE granül");
    }

    #[test]
    fn test_legacy_codes_are_read() {
        let row = RawMaterialRow {
            id: Uuid::new_v4(),
            entry_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            name: "Masura".to_string(),
            unit: "Adet".to_string(),
            quantity: Decimal::from(200),
            currency: "TL".to_string(),
            unit_price: Decimal::from(15),
            total_amount: Decimal::from(3000),
            exchange_rate: Decimal::ONE,
            total_try: Decimal::from(3000),
            created_at: Utc::now(),
        };
        let material: RawMaterial = row.into();
        assert_eq!(material.unit, MaterialUnit::Piece);
        assert_eq!(material.currency, Currency::Try);
    }
}
