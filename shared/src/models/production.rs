//! Production models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{default_color, default_color_category, ColorSpec, ProductKind};

/// Output of one manufacturing run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Production {
    pub id: Uuid,
    pub date: NaiveDate,
    pub machine: String,
    pub thickness_mm: Decimal,
    pub width_cm: Decimal,
    /// Roll length for `Normal`, piece length for `Cut`
    pub length_m: Decimal,
    /// Area of one roll
    pub area_m2: Decimal,
    pub pieces: i32,
    pub core_type: String,
    #[serde(default = "default_color_category")]
    pub color_category: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub kind: ProductKind,
    pub created_at: DateTime<Utc>,
}

impl Production {
    pub fn color_spec(&self) -> ColorSpec {
        ColorSpec::from_legacy(Some(&self.color_category), Some(&self.color))
    }
}
