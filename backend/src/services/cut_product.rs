//! Cutting job service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::models::{CutProduct, CutSource, CutTarget};
use shared::types::{roll_area_m2, ColorSpec};
use shared::validation::{
    check_dimension, check_quantity, check_thickness, check_width, validate_cut_fits_source,
};

/// Cut product service for recording cutting jobs
#[derive(Clone)]
pub struct CutProductService {
    db: PgPool,
}

/// Cutting job row as stored, with source and target flattened into columns
#[derive(Debug, sqlx::FromRow)]
pub struct CutProductRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub source_thickness_mm: Decimal,
    pub source_width_cm: Decimal,
    pub source_length_m: Option<Decimal>,
    pub source_area_m2: Option<Decimal>,
    pub source_color_category: Option<String>,
    pub source_color: Option<String>,
    pub target_thickness_mm: Decimal,
    pub target_width_cm: Decimal,
    pub target_length_cm: Decimal,
    pub target_color_category: Option<String>,
    pub target_color: Option<String>,
    pub target_pieces: i32,
    pub consumed_source_units: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<CutProductRow> for CutProduct {
    fn from(row: CutProductRow) -> Self {
        let source_color = ColorSpec::from_legacy(
            row.source_color_category.as_deref(),
            row.source_color.as_deref(),
        );
        let target_color = ColorSpec::from_legacy(
            row.target_color_category.as_deref(),
            row.target_color.as_deref(),
        );
        CutProduct {
            id: row.id,
            date: row.date,
            source: CutSource {
                thickness_mm: row.source_thickness_mm,
                width_cm: row.source_width_cm,
                length_m: row.source_length_m.unwrap_or(Decimal::ZERO),
                area_m2: row.source_area_m2.unwrap_or(Decimal::ZERO),
                color_category: source_color.category,
                color: source_color.color,
            },
            target: CutTarget {
                thickness_mm: row.target_thickness_mm,
                width_cm: row.target_width_cm,
                length_cm: row.target_length_cm,
                color_category: target_color.category,
                color: target_color.color,
                pieces: row.target_pieces,
            },
            consumed_source_units: row.consumed_source_units.unwrap_or(0),
            created_at: row.created_at,
        }
    }
}

/// The roll to cut from
#[derive(Debug, Deserialize, Validate)]
pub struct CutSourceInput {
    #[validate(custom = "check_thickness")]
    pub thickness_mm: Decimal,
    #[validate(custom = "check_width")]
    pub width_cm: Decimal,
    #[validate(custom = "check_quantity")]
    pub length_m: Option<Decimal>,
    #[validate(custom = "check_quantity")]
    pub area_m2: Option<Decimal>,
    pub color_category: Option<String>,
    pub color: Option<String>,
}

/// The pieces to produce
#[derive(Debug, Deserialize, Validate)]
pub struct CutTargetInput {
    #[validate(custom = "check_thickness")]
    pub thickness_mm: Decimal,
    #[validate(custom = "check_width")]
    pub width_cm: Decimal,
    /// Piece length in cm
    #[validate(custom = "check_dimension")]
    pub length_cm: Decimal,
    pub color_category: Option<String>,
    pub color: Option<String>,
    #[validate(range(min = 0, message = "Piece count cannot be negative"))]
    pub pieces: i32,
}

/// Input for recording a cutting job
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCutProductInput {
    pub date: NaiveDate,
    #[validate]
    pub source: CutSourceInput,
    #[validate]
    pub target: CutTargetInput,
    /// Derived from the source and target dimensions when omitted
    #[validate(range(min = 0, message = "Consumed roll count cannot be negative"))]
    pub consumed_source_units: Option<i32>,
}

impl CreateCutProductInput {
    fn into_parts(self) -> AppResult<(NaiveDate, CutSource, CutTarget, i32)> {
        check_fits(self.source.width_cm, self.target.width_cm)?;

        let source_color =
            ColorSpec::from_legacy(self.source.color_category.as_deref(), self.source.color.as_deref());
        let target_color =
            ColorSpec::from_legacy(self.target.color_category.as_deref(), self.target.color.as_deref());

        let length_m = self.source.length_m.unwrap_or(Decimal::ZERO);
        let source = CutSource {
            thickness_mm: self.source.thickness_mm,
            width_cm: self.source.width_cm,
            length_m,
            area_m2: self
                .source
                .area_m2
                .unwrap_or_else(|| roll_area_m2(self.source.width_cm, length_m)),
            color_category: source_color.category,
            color: source_color.color,
        };
        let target = CutTarget {
            thickness_mm: self.target.thickness_mm,
            width_cm: self.target.width_cm,
            length_cm: self.target.length_cm,
            color_category: target_color.category,
            color: target_color.color,
            pieces: self.target.pieces,
        };

        let consumed = match self.consumed_source_units {
            Some(consumed) => consumed,
            None => target.required_source_units(&source).ok_or_else(|| AppError::Validation {
                field: "consumed_source_units".to_string(),
                message: "Consumed roll count is required when the source length is unknown"
                    .to_string(),
                message_tr: "Ana malzeme metresi bilinmiyorsa kullanılan adet girilmelidir"
                    .to_string(),
            })?,
        };

        Ok((self.date, source, target, consumed))
    }
}

/// Source fields to change on a cutting job
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCutSourceInput {
    #[validate(custom = "check_thickness")]
    pub thickness_mm: Option<Decimal>,
    #[validate(custom = "check_width")]
    pub width_cm: Option<Decimal>,
    #[validate(custom = "check_quantity")]
    pub length_m: Option<Decimal>,
    #[validate(custom = "check_quantity")]
    pub area_m2: Option<Decimal>,
    pub color_category: Option<String>,
    pub color: Option<String>,
}

/// Target fields to change on a cutting job
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCutTargetInput {
    #[validate(custom = "check_thickness")]
    pub thickness_mm: Option<Decimal>,
    #[validate(custom = "check_width")]
    pub width_cm: Option<Decimal>,
    #[validate(custom = "check_dimension")]
    pub length_cm: Option<Decimal>,
    pub color_category: Option<String>,
    pub color: Option<String>,
    #[validate(range(min = 0, message = "Piece count cannot be negative"))]
    pub pieces: Option<i32>,
}

/// Input for correcting a cutting job; absent fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCutProductInput {
    pub date: Option<NaiveDate>,
    #[serde(default)]
    #[validate]
    pub source: UpdateCutSourceInput,
    #[serde(default)]
    #[validate]
    pub target: UpdateCutTargetInput,
    #[validate(range(min = 0, message = "Consumed roll count cannot be negative"))]
    pub consumed_source_units: Option<i32>,
}

impl UpdateCutProductInput {
    fn apply(self, mut current: CutProduct) -> AppResult<CutProduct> {
        if let Some(date) = self.date {
            current.date = date;
        }

        let source = &mut current.source;
        let resized = self.source.width_cm.is_some() || self.source.length_m.is_some();
        if let Some(thickness) = self.source.thickness_mm {
            source.thickness_mm = thickness;
        }
        if let Some(width) = self.source.width_cm {
            source.width_cm = width;
        }
        if let Some(length) = self.source.length_m {
            source.length_m = length;
        }
        match self.source.area_m2 {
            Some(area) => source.area_m2 = area,
            None if resized => source.area_m2 = roll_area_m2(source.width_cm, source.length_m),
            None => {}
        }
        let source_color = ColorSpec::from_legacy(
            Some(self.source.color_category.as_deref().unwrap_or(&source.color_category)),
            Some(self.source.color.as_deref().unwrap_or(&source.color)),
        );
        source.color_category = source_color.category;
        source.color = source_color.color;

        let target = &mut current.target;
        if let Some(thickness) = self.target.thickness_mm {
            target.thickness_mm = thickness;
        }
        if let Some(width) = self.target.width_cm {
            target.width_cm = width;
        }
        if let Some(length) = self.target.length_cm {
            target.length_cm = length;
        }
        if let Some(pieces) = self.target.pieces {
            target.pieces = pieces;
        }
        let target_color = ColorSpec::from_legacy(
            Some(self.target.color_category.as_deref().unwrap_or(&target.color_category)),
            Some(self.target.color.as_deref().unwrap_or(&target.color)),
        );
        target.color_category = target_color.category;
        target.color = target_color.color;

        if let Some(consumed) = self.consumed_source_units {
            current.consumed_source_units = consumed;
        }

        check_fits(current.source.width_cm, current.target.width_cm)?;
        Ok(current)
    }
}

fn check_fits(source_width_cm: Decimal, target_width_cm: Decimal) -> AppResult<()> {
    validate_cut_fits_source(source_width_cm, target_width_cm).map_err(|m| AppError::Validation {
        field: "target.width_cm".to_string(),
        message: m.to_string(),
        message_tr: "Kesim eni ana malzeme eninden büyük olamaz".to_string(),
    })
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, date, source_thickness_mm, source_width_cm, source_length_m, source_area_m2,
           source_color_category, source_color, target_thickness_mm, target_width_cm,
           target_length_cm, target_color_category, target_color, target_pieces,
           consumed_source_units, created_at
    FROM cut_products
"#;

impl CutProductService {
    /// Create a new CutProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a cutting job
    pub async fn create(&self, input: CreateCutProductInput) -> AppResult<CutProduct> {
        input.validate()?;
        let (date, source, target, consumed) = input.into_parts()?;

        let row = sqlx::query_as::<_, CutProductRow>(
            r#"
            INSERT INTO cut_products (id, date, source_thickness_mm, source_width_cm,
                                      source_length_m, source_area_m2, source_color_category,
                                      source_color, target_thickness_mm, target_width_cm,
                                      target_length_cm, target_color_category, target_color,
                                      target_pieces, consumed_source_units)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id, date, source_thickness_mm, source_width_cm, source_length_m,
                      source_area_m2, source_color_category, source_color, target_thickness_mm,
                      target_width_cm, target_length_cm, target_color_category, target_color,
                      target_pieces, consumed_source_units, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(date)
        .bind(source.thickness_mm)
        .bind(source.width_cm)
        .bind(source.length_m)
        .bind(source.area_m2)
        .bind(&source.color_category)
        .bind(&source.color)
        .bind(target.thickness_mm)
        .bind(target.width_cm)
        .bind(target.length_cm)
        .bind(&target.color_category)
        .bind(&target.color)
        .bind(target.pieces)
        .bind(consumed)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            id = %row.id,
            pieces = row.target_pieces,
            consumed_source_units = consumed,
            "Cutting job recorded"
        );
        Ok(row.into())
    }

    /// All cutting jobs, newest first
    pub async fn list(&self) -> AppResult<Vec<CutProduct>> {
        let rows = sqlx::query_as::<_, CutProductRow>(&format!(
            "{} ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(CutProduct::from).collect())
    }

    /// Get a cutting job by ID
    pub async fn get(&self, id: Uuid) -> AppResult<CutProduct> {
        let row = sqlx::query_as::<_, CutProductRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Cut product".to_string()))?;

        Ok(row.into())
    }

    /// Update a cutting job; the stored consumed count is kept unless given
    pub async fn update(&self, id: Uuid, input: UpdateCutProductInput) -> AppResult<CutProduct> {
        input.validate()?;
        let updated = input.apply(self.get(id).await?)?;
        let CutProduct {
            date,
            source,
            target,
            consumed_source_units: consumed,
            ..
        } = updated;

        let row = sqlx::query_as::<_, CutProductRow>(
            r#"
            UPDATE cut_products
            SET date = $2, source_thickness_mm = $3, source_width_cm = $4, source_length_m = $5,
                source_area_m2 = $6, source_color_category = $7, source_color = $8,
                target_thickness_mm = $9, target_width_cm = $10, target_length_cm = $11,
                target_color_category = $12, target_color = $13, target_pieces = $14,
                consumed_source_units = $15
            WHERE id = $1
            RETURNING id, date, source_thickness_mm, source_width_cm, source_length_m,
                      source_area_m2, source_color_category, source_color, target_thickness_mm,
                      target_width_cm, target_length_cm, target_color_category, target_color,
                      target_pieces, consumed_source_units, created_at
            "#,
        )
        .bind(id)
        .bind(date)
        .bind(source.thickness_mm)
        .bind(source.width_cm)
        .bind(source.length_m)
        .bind(source.area_m2)
        .bind(&source.color_category)
        .bind(&source.color)
        .bind(target.thickness_mm)
        .bind(target.width_cm)
        .bind(target.length_cm)
        .bind(&target.color_category)
        .bind(&target.color)
        .bind(target.pieces)
        .bind(consumed)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Cut product".to_string()))?;

        tracing::info!(id = %id, "Cutting job updated");
        Ok(row.into())
    }

    /// Delete a cutting job
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM cut_products WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cut product".to_string()));
        }

        tracing::info!(id = %id, "Cutting job deleted");
        Ok(())
    }
}
