//! Shipment record service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use shared::models::{Shipment, ShipmentLine};
use shared::types::{roll_area_m2, ColorSpec, ProductKind};
use shared::validation::{
    check_plate, check_quantity, check_thickness, check_time_of_day, check_width,
    validate_length_for_kind,
};

/// Shipment service for recording outbound deliveries
#[derive(Clone)]
pub struct ShipmentService {
    db: PgPool,
}

/// Shipment row as stored
///
/// `length_m` is the roll length for normal shipments and the piece length for
/// cut shipments. `area_m2` is only meaningful for normal shipments.
#[derive(Debug, sqlx::FromRow)]
pub struct ShipmentRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub buyer: String,
    pub kind: Option<String>,
    pub thickness_mm: Decimal,
    pub width_cm: Decimal,
    pub length_m: Decimal,
    pub area_m2: Option<Decimal>,
    pub pieces: i32,
    pub color_category: Option<String>,
    pub color: Option<String>,
    pub delivery_note_no: String,
    pub vehicle_plate: String,
    pub driver: String,
    pub departure_time: String,
    pub created_at: DateTime<Utc>,
}

impl From<ShipmentRow> for Shipment {
    fn from(row: ShipmentRow) -> Self {
        let color = ColorSpec::from_legacy(row.color_category.as_deref(), row.color.as_deref());
        let kind = ProductKind::from_legacy(row.kind.as_deref());
        Shipment {
            id: row.id,
            date: row.date,
            buyer: row.buyer,
            thickness_mm: row.thickness_mm,
            width_cm: row.width_cm,
            line: ShipmentLine::from_parts(kind, row.length_m, row.area_m2),
            pieces: row.pieces,
            color_category: color.category,
            color: color.color,
            delivery_note_no: row.delivery_note_no,
            vehicle_plate: row.vehicle_plate,
            driver: row.driver,
            departure_time: row.departure_time,
            created_at: row.created_at,
        }
    }
}

fn check_positive_length(value: &Decimal) -> Result<(), ValidationError> {
    // Kind-specific minimum is checked once the kind is known
    validate_length_for_kind(ProductKind::Cut, *value).map_err(|m| {
        let mut err = ValidationError::new("length");
        err.message = Some(m.into());
        err
    })
}

/// Input for recording a shipment
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShipmentInput {
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Buyer is required"))]
    pub buyer: String,
    #[serde(default)]
    pub kind: ProductKind,
    #[validate(custom = "check_thickness")]
    pub thickness_mm: Decimal,
    #[validate(custom = "check_width")]
    pub width_cm: Decimal,
    /// Roll length, or piece length in metres for cut shipments
    #[validate(custom = "check_positive_length")]
    pub length_m: Decimal,
    /// Per-roll area; computed when omitted, ignored for cut shipments
    #[validate(custom = "check_quantity")]
    pub area_m2: Option<Decimal>,
    #[validate(range(min = 0, message = "Piece count cannot be negative"))]
    pub pieces: i32,
    pub color_category: Option<String>,
    pub color: Option<String>,
    #[serde(default)]
    pub delivery_note_no: String,
    #[validate(custom = "check_plate")]
    pub vehicle_plate: String,
    #[serde(default)]
    pub driver: String,
    #[validate(custom = "check_time_of_day")]
    pub departure_time: String,
}

impl CreateShipmentInput {
    fn line(&self) -> ShipmentLine {
        let area = match self.kind {
            ProductKind::Normal => Some(
                self.area_m2
                    .unwrap_or_else(|| roll_area_m2(self.width_cm, self.length_m)),
            ),
            ProductKind::Cut => None,
        };
        ShipmentLine::from_parts(self.kind, self.length_m, area)
    }
}

/// Input for correcting a shipment; absent fields keep their value
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateShipmentInput {
    pub date: Option<NaiveDate>,
    pub buyer: Option<String>,
    pub kind: Option<ProductKind>,
    #[validate(custom = "check_thickness")]
    pub thickness_mm: Option<Decimal>,
    #[validate(custom = "check_width")]
    pub width_cm: Option<Decimal>,
    #[validate(custom = "check_positive_length")]
    pub length_m: Option<Decimal>,
    #[validate(custom = "check_quantity")]
    pub area_m2: Option<Decimal>,
    #[validate(range(min = 0, message = "Piece count cannot be negative"))]
    pub pieces: Option<i32>,
    pub color_category: Option<String>,
    pub color: Option<String>,
    pub delivery_note_no: Option<String>,
    #[validate(custom = "check_plate")]
    pub vehicle_plate: Option<String>,
    pub driver: Option<String>,
    #[validate(custom = "check_time_of_day")]
    pub departure_time: Option<String>,
}

impl UpdateShipmentInput {
    fn apply(self, mut current: Shipment) -> Shipment {
        if let Some(date) = self.date {
            current.date = date;
        }
        if let Some(buyer) = self.buyer {
            current.buyer = buyer;
        }
        if let Some(thickness) = self.thickness_mm {
            current.thickness_mm = thickness;
        }
        if let Some(width) = self.width_cm {
            current.width_cm = width;
        }
        if let Some(pieces) = self.pieces {
            current.pieces = pieces;
        }

        let (kind, length, area) = current.line.clone().into_parts();
        current.line = ShipmentLine::from_parts(
            self.kind.unwrap_or(kind),
            self.length_m.unwrap_or(length),
            self.area_m2.or(area),
        );

        let color = ColorSpec::from_legacy(
            Some(self.color_category.as_deref().unwrap_or(&current.color_category)),
            Some(self.color.as_deref().unwrap_or(&current.color)),
        );
        current.color_category = color.category;
        current.color = color.color;

        if let Some(no) = self.delivery_note_no {
            current.delivery_note_no = no;
        }
        if let Some(plate) = self.vehicle_plate {
            current.vehicle_plate = plate;
        }
        if let Some(driver) = self.driver {
            current.driver = driver;
        }
        if let Some(time) = self.departure_time {
            current.departure_time = time;
        }
        current
    }
}

fn check_line(line: &ShipmentLine) -> AppResult<()> {
    validate_length_for_kind(line.kind(), line.length_m()).map_err(|m| AppError::Validation {
        field: "length_m".to_string(),
        message: m.to_string(),
        message_tr: "Geçersiz uzunluk".to_string(),
    })
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, date, buyer, kind, thickness_mm, width_cm, length_m, area_m2, pieces,
           color_category, color, delivery_note_no, vehicle_plate, driver, departure_time,
           created_at
    FROM shipments
"#;

impl ShipmentService {
    /// Create a new ShipmentService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a shipment
    pub async fn create(&self, input: CreateShipmentInput) -> AppResult<Shipment> {
        input.validate()?;
        let line = input.line();
        check_line(&line)?;

        let color = ColorSpec::from_legacy(input.color_category.as_deref(), input.color.as_deref());
        let (kind, length_m, area_m2) = line.into_parts();

        let row = sqlx::query_as::<_, ShipmentRow>(
            r#"
            INSERT INTO shipments (id, date, buyer, kind, thickness_mm, width_cm, length_m,
                                   area_m2, pieces, color_category, color, delivery_note_no,
                                   vehicle_plate, driver, departure_time)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id, date, buyer, kind, thickness_mm, width_cm, length_m, area_m2, pieces,
                      color_category, color, delivery_note_no, vehicle_plate, driver,
                      departure_time, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.date)
        .bind(&input.buyer)
        .bind(kind.as_str())
        .bind(input.thickness_mm)
        .bind(input.width_cm)
        .bind(length_m)
        .bind(area_m2)
        .bind(input.pieces)
        .bind(&color.category)
        .bind(&color.color)
        .bind(&input.delivery_note_no)
        .bind(&input.vehicle_plate)
        .bind(&input.driver)
        .bind(&input.departure_time)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            id = %row.id,
            buyer = %row.buyer,
            pieces = row.pieces,
            "Shipment recorded"
        );
        Ok(row.into())
    }

    /// All shipments, newest first
    pub async fn list(&self) -> AppResult<Vec<Shipment>> {
        let rows = sqlx::query_as::<_, ShipmentRow>(&format!(
            "{} ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Shipment::from).collect())
    }

    /// Get a shipment by ID
    pub async fn get(&self, id: Uuid) -> AppResult<Shipment> {
        let row = sqlx::query_as::<_, ShipmentRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Shipment".to_string()))?;

        Ok(row.into())
    }

    /// Correct fields of a recorded shipment
    pub async fn update(&self, id: Uuid, input: UpdateShipmentInput) -> AppResult<Shipment> {
        input.validate()?;
        let updated = input.apply(self.get(id).await?);
        check_line(&updated.line)?;
        let (kind, length_m, area_m2) = updated.line.clone().into_parts();

        let row = sqlx::query_as::<_, ShipmentRow>(
            r#"
            UPDATE shipments
            SET date = $2, buyer = $3, kind = $4, thickness_mm = $5, width_cm = $6,
                length_m = $7, area_m2 = $8, pieces = $9, color_category = $10, color = $11,
                delivery_note_no = $12, vehicle_plate = $13, driver = $14, departure_time = $15
            WHERE id = $1
            RETURNING id, date, buyer, kind, thickness_mm, width_cm, length_m, area_m2, pieces,
                      color_category, color, delivery_note_no, vehicle_plate, driver,
                      departure_time, created_at
            "#,
        )
        .bind(id)
        .bind(updated.date)
        .bind(&updated.buyer)
        .bind(kind.as_str())
        .bind(updated.thickness_mm)
        .bind(updated.width_cm)
        .bind(length_m)
        .bind(area_m2)
        .bind(updated.pieces)
        .bind(&updated.color_category)
        .bind(&updated.color)
        .bind(&updated.delivery_note_no)
        .bind(&updated.vehicle_plate)
        .bind(&updated.driver)
        .bind(&updated.departure_time)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Shipment".to_string()))?;

        tracing::info!(id = %id, "Shipment updated");
        Ok(row.into())
    }

    /// Delete a shipment
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM shipments WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Shipment".to_string()));
        }

        tracing::info!(id = %id, "Shipment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn input(kind: ProductKind, length: &str) -> CreateShipmentInput {
        CreateShipmentInput {
            date: NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
            buyer: "Ege Ambalaj".to_string(),
            kind,
            thickness_mm: dec("1.5"),
            width_cm: dec("100"),
            length_m: dec(length),
            area_m2: None,
            pieces: 4,
            color_category: None,
            color: None,
            delivery_note_no: "IRS-0042".to_string(),
            vehicle_plate: "34 ABC 123".to_string(),
            driver: "Mehmet".to_string(),
            departure_time: "08:30".to_string(),
        }
    }

    #[test]
    fn test_normal_line_computes_area() {
        let line = input(ProductKind::Normal, "50").line();
        assert_eq!(
            line,
            ShipmentLine::Normal {
                length_m: dec("50"),
                area_m2: dec("50")
            }
        );
    }

    #[test]
    fn test_cut_line_has_no_area() {
        let line = input(ProductKind::Cut, "2.0").line();
        assert_eq!(line, ShipmentLine::Cut { piece_length_m: dec("2.0") });
        assert!(input(ProductKind::Cut, "2.0").validate().is_ok());
    }

    #[test]
    fn test_bad_paperwork_is_rejected() {
        let mut bad_plate = input(ProductKind::Normal, "50");
        bad_plate.vehicle_plate = "99 ZZ 1".to_string();
        assert!(bad_plate.validate().is_err());

        let mut bad_time = input(ProductKind::Normal, "50");
        bad_time.departure_time = "25:00".to_string();
        assert!(bad_time.validate().is_err());
    }

    #[test]
    fn test_legacy_row_without_kind_is_normal() {
        let row = ShipmentRow {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            buyer: "Ege Ambalaj".to_string(),
            kind: None,
            thickness_mm: dec("1.5"),
            width_cm: dec("100"),
            length_m: dec("50"),
            area_m2: None,
            pieces: 3,
            color_category: Some(String::new()),
            color: None,
            delivery_note_no: String::new(),
            vehicle_plate: String::new(),
            driver: String::new(),
            departure_time: String::new(),
            created_at: Utc::now(),
        };
        let shipment: Shipment = row.into();
        assert_eq!(shipment.kind(), ProductKind::Normal);
        assert_eq!(shipment.color_category, "Colorless");
        assert_eq!(shipment.color, "Natural");
    }

    #[test]
    fn test_update_switches_kind() {
        let current = Shipment {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
            buyer: "Ege Ambalaj".to_string(),
            thickness_mm: dec("1.5"),
            width_cm: dec("100"),
            line: ShipmentLine::Normal {
                length_m: dec("50"),
                area_m2: dec("50"),
            },
            pieces: 4,
            color_category: "Colorless".to_string(),
            color: "Natural".to_string(),
            delivery_note_no: String::new(),
            vehicle_plate: "34 ABC 123".to_string(),
            driver: String::new(),
            departure_time: "08:30".to_string(),
            created_at: Utc::now(),
        };
        let updated = UpdateShipmentInput {
            kind: Some(ProductKind::Cut),
            length_m: Some(dec("2.0")),
            ..Default::default()
        }
        .apply(current);
        assert_eq!(updated.line, ShipmentLine::Cut { piece_length_m: dec("2.0") });
    }
}
