//! Daily consumption service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::models::{ConsumptionBreakdown, DailyConsumption};
use shared::validation::check_quantity;

/// Consumption service; additive totals are derived on write
#[derive(Clone)]
pub struct ConsumptionService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ConsumptionRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub machine: String,
    pub polymer_kg: Decimal,
    pub scrap_kg: Decimal,
    pub total_polymer_kg: Decimal,
    pub total_estol_kg: Decimal,
    pub total_talc_kg: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<ConsumptionRow> for DailyConsumption {
    fn from(row: ConsumptionRow) -> Self {
        DailyConsumption {
            id: row.id,
            date: row.date,
            machine: row.machine,
            polymer_kg: row.polymer_kg,
            scrap_kg: row.scrap_kg,
            total_polymer_kg: row.total_polymer_kg,
            total_estol_kg: row.total_estol_kg,
            total_talc_kg: row.total_talc_kg,
            created_at: row.created_at,
        }
    }
}

/// Input for recording one machine's daily consumption
#[derive(Debug, Deserialize, Validate)]
pub struct CreateConsumptionInput {
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Machine is required"))]
    pub machine: String,
    #[validate(custom = "check_quantity")]
    pub polymer_kg: Decimal,
    #[serde(default)]
    #[validate(custom = "check_quantity")]
    pub scrap_kg: Decimal,
}

/// Input for correcting an entry; absent fields keep their value
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateConsumptionInput {
    pub date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Machine is required"))]
    pub machine: Option<String>,
    #[validate(custom = "check_quantity")]
    pub polymer_kg: Option<Decimal>,
    #[validate(custom = "check_quantity")]
    pub scrap_kg: Option<Decimal>,
}

impl UpdateConsumptionInput {
    fn merge(self, current: DailyConsumption) -> CreateConsumptionInput {
        CreateConsumptionInput {
            date: self.date.unwrap_or(current.date),
            machine: self.machine.unwrap_or(current.machine),
            polymer_kg: self.polymer_kg.unwrap_or(current.polymer_kg),
            scrap_kg: self.scrap_kg.unwrap_or(current.scrap_kg),
        }
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, date, machine, polymer_kg, scrap_kg, total_polymer_kg, total_estol_kg,
           total_talc_kg, created_at
    FROM daily_consumptions
"#;

impl ConsumptionService {
    /// Create a new ConsumptionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a daily consumption entry
    pub async fn create(&self, input: CreateConsumptionInput) -> AppResult<DailyConsumption> {
        input.validate()?;
        let totals = ConsumptionBreakdown::from_inputs(input.polymer_kg, input.scrap_kg);

        let row = sqlx::query_as::<_, ConsumptionRow>(
            r#"
            INSERT INTO daily_consumptions (id, date, machine, polymer_kg, scrap_kg,
                                            total_polymer_kg, total_estol_kg, total_talc_kg)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, date, machine, polymer_kg, scrap_kg, total_polymer_kg, total_estol_kg,
                      total_talc_kg, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.date)
        .bind(&input.machine)
        .bind(input.polymer_kg)
        .bind(input.scrap_kg)
        .bind(totals.total_polymer_kg)
        .bind(totals.total_estol_kg)
        .bind(totals.total_talc_kg)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            id = %row.id,
            machine = %row.machine,
            total_polymer_kg = %row.total_polymer_kg,
            "Daily consumption recorded"
        );
        Ok(row.into())
    }

    /// All entries, newest day first
    pub async fn list(&self) -> AppResult<Vec<DailyConsumption>> {
        let rows = sqlx::query_as::<_, ConsumptionRow>(&format!(
            "{} ORDER BY date DESC, created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(DailyConsumption::from).collect())
    }

    /// Get an entry by ID
    pub async fn get(&self, id: Uuid) -> AppResult<DailyConsumption> {
        let row = sqlx::query_as::<_, ConsumptionRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Daily consumption".to_string()))?;

        Ok(row.into())
    }

    /// Correct an entry and recompute its totals
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateConsumptionInput,
    ) -> AppResult<DailyConsumption> {
        input.validate()?;
        let merged = input.merge(self.get(id).await?);
        let totals = ConsumptionBreakdown::from_inputs(merged.polymer_kg, merged.scrap_kg);

        let row = sqlx::query_as::<_, ConsumptionRow>(
            r#"
            UPDATE daily_consumptions
            SET date = $2, machine = $3, polymer_kg = $4, scrap_kg = $5,
                total_polymer_kg = $6, total_estol_kg = $7, total_talc_kg = $8
            WHERE id = $1
            RETURNING id, date, machine, polymer_kg, scrap_kg, total_polymer_kg, total_estol_kg,
                      total_talc_kg, created_at
            "#,
        )
        .bind(id)
        .bind(merged.date)
        .bind(&merged.machine)
        .bind(merged.polymer_kg)
        .bind(merged.scrap_kg)
        .bind(totals.total_polymer_kg)
        .bind(totals.total_estol_kg)
        .bind(totals.total_talc_kg)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Daily consumption".to_string()))?;

        tracing::info!(id = %id, "Daily consumption updated");
        Ok(row.into())
    }

    /// Delete an entry
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM daily_consumptions WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Daily consumption".to_string()));
        }

        tracing::info!(id = %id, "Daily consumption deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_recomputes_from_new_inputs() {
        let current = DailyConsumption {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            machine: "EXT-1".to_string(),
            polymer_kg: Decimal::from(100),
            scrap_kg: Decimal::from(20),
            total_polymer_kg: Decimal::from(120),
            total_estol_kg: Decimal::new(36, 1),
            total_talc_kg: Decimal::new(18, 1),
            created_at: Utc::now(),
        };
        let merged = UpdateConsumptionInput {
            scrap_kg: Some(Decimal::ZERO),
            ..Default::default()
        }
        .merge(current);
        let totals = ConsumptionBreakdown::from_inputs(merged.polymer_kg, merged.scrap_kg);
        assert_eq!(totals.total_polymer_kg, Decimal::from(100));
        assert_eq!(totals.total_estol_kg, Decimal::from(3));
        assert_eq!(totals.total_talc_kg, Decimal::new(15, 1));
    }

    #[test]
    fn test_negative_scrap_is_rejected() {
        let input = CreateConsumptionInput {
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            machine: "EXT-1".to_string(),
            polymer_kg: Decimal::from(100),
            scrap_kg: Decimal::from(-1),
        };
        assert!(input.validate().is_err());
    }
}
