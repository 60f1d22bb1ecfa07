//! Production record service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::models::Production;
use shared::types::{roll_area_m2, ColorSpec, ProductKind};
use shared::validation::{check_dimension, check_quantity, check_thickness, check_width};

/// Production service for recording manufacturing runs
#[derive(Clone)]
pub struct ProductionService {
    db: PgPool,
}

/// Production row as stored; color and kind columns may be missing on old rows
#[derive(Debug, sqlx::FromRow)]
pub struct ProductionRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub machine: String,
    pub thickness_mm: Decimal,
    pub width_cm: Decimal,
    pub length_m: Decimal,
    pub area_m2: Decimal,
    pub pieces: i32,
    pub core_type: String,
    pub color_category: Option<String>,
    pub color: Option<String>,
    pub kind: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ProductionRow> for Production {
    fn from(row: ProductionRow) -> Self {
        let color = ColorSpec::from_legacy(row.color_category.as_deref(), row.color.as_deref());
        Production {
            id: row.id,
            date: row.date,
            machine: row.machine,
            thickness_mm: row.thickness_mm,
            width_cm: row.width_cm,
            length_m: row.length_m,
            area_m2: row.area_m2,
            pieces: row.pieces,
            core_type: row.core_type,
            color_category: color.category,
            color: color.color,
            kind: ProductKind::from_legacy(row.kind.as_deref()),
            created_at: row.created_at,
        }
    }
}

/// Input for recording a production
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductionInput {
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Machine is required"))]
    pub machine: String,
    #[validate(custom = "check_thickness")]
    pub thickness_mm: Decimal,
    #[validate(custom = "check_width")]
    pub width_cm: Decimal,
    #[validate(custom = "check_dimension")]
    pub length_m: Decimal,
    /// Computed from width and length when omitted
    #[validate(custom = "check_quantity")]
    pub area_m2: Option<Decimal>,
    #[validate(range(min = 0, message = "Piece count cannot be negative"))]
    pub pieces: i32,
    #[serde(default)]
    pub core_type: String,
    pub color_category: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub kind: ProductKind,
}

/// Input for correcting a production; absent fields keep their value
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductionInput {
    pub date: Option<NaiveDate>,
    pub machine: Option<String>,
    #[validate(custom = "check_thickness")]
    pub thickness_mm: Option<Decimal>,
    #[validate(custom = "check_width")]
    pub width_cm: Option<Decimal>,
    #[validate(custom = "check_dimension")]
    pub length_m: Option<Decimal>,
    #[validate(custom = "check_quantity")]
    pub area_m2: Option<Decimal>,
    #[validate(range(min = 0, message = "Piece count cannot be negative"))]
    pub pieces: Option<i32>,
    pub core_type: Option<String>,
    pub color_category: Option<String>,
    pub color: Option<String>,
    pub kind: Option<ProductKind>,
}

impl UpdateProductionInput {
    fn apply(self, mut current: Production) -> Production {
        if let Some(date) = self.date {
            current.date = date;
        }
        if let Some(machine) = self.machine {
            current.machine = machine;
        }
        if let Some(thickness) = self.thickness_mm {
            current.thickness_mm = thickness;
        }
        if let Some(width) = self.width_cm {
            current.width_cm = width;
        }
        if let Some(length) = self.length_m {
            current.length_m = length;
        }
        if let Some(area) = self.area_m2 {
            current.area_m2 = area;
        }
        if let Some(pieces) = self.pieces {
            current.pieces = pieces;
        }
        if let Some(core_type) = self.core_type {
            current.core_type = core_type;
        }
        let color = ColorSpec::from_legacy(
            Some(self.color_category.as_deref().unwrap_or(&current.color_category)),
            Some(self.color.as_deref().unwrap_or(&current.color)),
        );
        current.color_category = color.category;
        current.color = color.color;
        if let Some(kind) = self.kind {
            current.kind = kind;
        }
        current
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, date, machine, thickness_mm, width_cm, length_m, area_m2, pieces,
           core_type, color_category, color, kind, created_at
    FROM productions
"#;

impl ProductionService {
    /// Create a new ProductionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a production
    pub async fn create(&self, input: CreateProductionInput) -> AppResult<Production> {
        input.validate()?;

        let color = ColorSpec::from_legacy(input.color_category.as_deref(), input.color.as_deref());
        let area_m2 = input
            .area_m2
            .unwrap_or_else(|| roll_area_m2(input.width_cm, input.length_m));

        let row = sqlx::query_as::<_, ProductionRow>(
            r#"
            INSERT INTO productions (id, date, machine, thickness_mm, width_cm, length_m, area_m2,
                                     pieces, core_type, color_category, color, kind)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, date, machine, thickness_mm, width_cm, length_m, area_m2, pieces,
                      core_type, color_category, color, kind, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.date)
        .bind(&input.machine)
        .bind(input.thickness_mm)
        .bind(input.width_cm)
        .bind(input.length_m)
        .bind(area_m2)
        .bind(input.pieces)
        .bind(&input.core_type)
        .bind(&color.category)
        .bind(&color.color)
        .bind(input.kind.as_str())
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            id = %row.id,
            machine = %row.machine,
            pieces = row.pieces,
            "Production recorded"
        );
        Ok(row.into())
    }

    /// All productions, newest first
    pub async fn list(&self) -> AppResult<Vec<Production>> {
        let rows = sqlx::query_as::<_, ProductionRow>(&format!(
            "{} ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Production::from).collect())
    }

    /// Get a production by ID
    pub async fn get(&self, id: Uuid) -> AppResult<Production> {
        let row = sqlx::query_as::<_, ProductionRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Production".to_string()))?;

        Ok(row.into())
    }

    /// Correct fields of a recorded production
    pub async fn update(&self, id: Uuid, input: UpdateProductionInput) -> AppResult<Production> {
        input.validate()?;
        let updated = input.apply(self.get(id).await?);

        let row = sqlx::query_as::<_, ProductionRow>(
            r#"
            UPDATE productions
            SET date = $2, machine = $3, thickness_mm = $4, width_cm = $5, length_m = $6,
                area_m2 = $7, pieces = $8, core_type = $9, color_category = $10, color = $11,
                kind = $12
            WHERE id = $1
            RETURNING id, date, machine, thickness_mm, width_cm, length_m, area_m2, pieces,
                      core_type, color_category, color, kind, created_at
            "#,
        )
        .bind(id)
        .bind(updated.date)
        .bind(&updated.machine)
        .bind(updated.thickness_mm)
        .bind(updated.width_cm)
        .bind(updated.length_m)
        .bind(updated.area_m2)
        .bind(updated.pieces)
        .bind(&updated.core_type)
        .bind(&updated.color_category)
        .bind(&updated.color)
        .bind(updated.kind.as_str())
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Production".to_string()))?;

        tracing::info!(id = %id, "Production updated");
        Ok(row.into())
    }

    /// Delete a production
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM productions WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Production".to_string()));
        }

        tracing::info!(id = %id, "Production deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn legacy_row() -> ProductionRow {
        ProductionRow {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 11, 5).unwrap(),
            machine: "EXT-2".to_string(),
            thickness_mm: Decimal::from_str("1.50").unwrap(),
            width_cm: Decimal::from(100),
            length_m: Decimal::from(50),
            area_m2: Decimal::from(50),
            pieces: 10,
            core_type: "Karton".to_string(),
            color_category: None,
            color: Some("  ".to_string()),
            kind: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_legacy_row_is_repaired() {
        let production: Production = legacy_row().into();
        assert_eq!(production.kind, ProductKind::Normal);
        assert_eq!(production.color_category, "Colorless");
        assert_eq!(production.color, "Natural");
    }

    #[test]
    fn test_update_keeps_absent_fields() {
        let current: Production = legacy_row().into();
        let updated = UpdateProductionInput {
            pieces: Some(12),
            color: Some("Blue".to_string()),
            ..Default::default()
        }
        .apply(current.clone());

        assert_eq!(updated.pieces, 12);
        assert_eq!(updated.color, "Blue");
        assert_eq!(updated.machine, current.machine);
        assert_eq!(updated.color_category, "Colorless");
    }

    #[test]
    fn test_negative_pieces_are_rejected() {
        let input = CreateProductionInput {
            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            machine: "EXT-1".to_string(),
            thickness_mm: Decimal::from_str("1.5").unwrap(),
            width_cm: Decimal::from(100),
            length_m: Decimal::from(50),
            area_m2: None,
            pieces: -1,
            core_type: String::new(),
            color_category: None,
            color: None,
            kind: ProductKind::Normal,
        };
        assert!(input.validate().is_err());
    }
}
