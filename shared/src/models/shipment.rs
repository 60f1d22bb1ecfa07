//! Shipment models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{default_color, default_color_category, ColorSpec, ProductKind};

/// One outbound delivery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shipment {
    pub id: Uuid,
    pub date: NaiveDate,
    pub buyer: String,
    pub thickness_mm: Decimal,
    pub width_cm: Decimal,
    pub line: ShipmentLine,
    pub pieces: i32,
    #[serde(default = "default_color_category")]
    pub color_category: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub delivery_note_no: String,
    pub vehicle_plate: String,
    pub driver: String,
    pub departure_time: String,
    pub created_at: DateTime<Utc>,
}

impl Shipment {
    pub fn kind(&self) -> ProductKind {
        self.line.kind()
    }

    pub fn color_spec(&self) -> ColorSpec {
        ColorSpec::from_legacy(Some(&self.color_category), Some(&self.color))
    }
}

/// What was shipped, with the length interpreted per product kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind")]
pub enum ShipmentLine {
    /// Whole rolls: per-roll length and area
    Normal { length_m: Decimal, area_m2: Decimal },
    /// Cut pieces of the given length
    Cut { piece_length_m: Decimal },
}

impl ShipmentLine {
    pub fn kind(&self) -> ProductKind {
        match self {
            ShipmentLine::Normal { .. } => ProductKind::Normal,
            ShipmentLine::Cut { .. } => ProductKind::Cut,
        }
    }

    /// Rebuild the line from the generic stored columns
    pub fn from_parts(kind: ProductKind, length_m: Decimal, area_m2: Option<Decimal>) -> Self {
        match kind {
            ProductKind::Normal => ShipmentLine::Normal {
                length_m,
                area_m2: area_m2.unwrap_or(Decimal::ZERO),
            },
            ProductKind::Cut => ShipmentLine::Cut {
                piece_length_m: length_m,
            },
        }
    }

    /// Split into `(kind, length_m, area_m2)` for storage
    pub fn into_parts(self) -> (ProductKind, Decimal, Option<Decimal>) {
        match self {
            ShipmentLine::Normal { length_m, area_m2 } => {
                (ProductKind::Normal, length_m, Some(area_m2))
            }
            ShipmentLine::Cut { piece_length_m } => (ProductKind::Cut, piece_length_m, None),
        }
    }

    pub fn length_m(&self) -> Decimal {
        match self {
            ShipmentLine::Normal { length_m, .. } => *length_m,
            ShipmentLine::Cut { piece_length_m } => *piece_length_m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_line_parts_round_trip_keeps_meaning() {
        let len = Decimal::from_str("2.0").unwrap();
        let line = ShipmentLine::from_parts(ProductKind::Cut, len, Some(Decimal::ONE));
        assert_eq!(line, ShipmentLine::Cut { piece_length_m: len });
        assert_eq!(line.clone().into_parts(), (ProductKind::Cut, len, None));

        let line = ShipmentLine::from_parts(ProductKind::Normal, len, None);
        assert_eq!(
            line,
            ShipmentLine::Normal {
                length_m: len,
                area_m2: Decimal::ZERO
            }
        );
    }

    #[test]
    fn test_line_serializes_with_kind_tag() {
        let line = ShipmentLine::Cut {
            piece_length_m: Decimal::from(2),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["kind"], "Cut");
    }
}
