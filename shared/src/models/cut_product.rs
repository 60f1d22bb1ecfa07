//! Cutting job models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{cm_to_m, default_color, default_color_category, m_to_cm, piece_area_m2, ColorSpec};

/// One cutting job: consumes source rolls and yields cut pieces
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CutProduct {
    pub id: Uuid,
    pub date: NaiveDate,
    pub source: CutSource,
    pub target: CutTarget,
    /// Number of source rolls used up by the job
    #[serde(default)]
    pub consumed_source_units: i32,
    pub created_at: DateTime<Utc>,
}

/// The roll being cut
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CutSource {
    pub thickness_mm: Decimal,
    pub width_cm: Decimal,
    #[serde(default)]
    pub length_m: Decimal,
    #[serde(default)]
    pub area_m2: Decimal,
    #[serde(default = "default_color_category")]
    pub color_category: String,
    #[serde(default = "default_color")]
    pub color: String,
}

impl CutSource {
    pub fn color_spec(&self) -> ColorSpec {
        ColorSpec::from_legacy(Some(&self.color_category), Some(&self.color))
    }
}

/// The pieces produced
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CutTarget {
    pub thickness_mm: Decimal,
    pub width_cm: Decimal,
    pub length_cm: Decimal,
    #[serde(default = "default_color_category")]
    pub color_category: String,
    #[serde(default = "default_color")]
    pub color: String,
    /// Requested piece count
    pub pieces: i32,
}

impl CutTarget {
    pub fn color_spec(&self) -> ColorSpec {
        ColorSpec::from_legacy(Some(&self.color_category), Some(&self.color))
    }

    pub fn piece_length_m(&self) -> Decimal {
        cm_to_m(self.length_cm)
    }

    pub fn piece_area_m2(&self) -> Decimal {
        piece_area_m2(self.width_cm, self.length_cm)
    }

    /// Pieces one source roll yields: lanes across the width times cuts along
    /// the length. `None` when the source dimensions are unknown or too small.
    pub fn pieces_per_roll(&self, source: &CutSource) -> Option<i64> {
        if self.width_cm <= Decimal::ZERO || self.length_cm <= Decimal::ZERO {
            return None;
        }
        let lanes = (source.width_cm / self.width_cm).floor();
        let cuts = (m_to_cm(source.length_m) / self.length_cm).floor();
        let per_roll = (lanes * cuts).to_i64()?;
        (per_roll > 0).then_some(per_roll)
    }

    /// Source rolls needed to cut the requested pieces
    pub fn required_source_units(&self, source: &CutSource) -> Option<i32> {
        let per_roll = self.pieces_per_roll(source)?;
        let pieces = i64::from(self.pieces.max(0));
        i32::try_from((pieces + per_roll - 1) / per_roll).ok()
    }
}
