//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Color category assigned to records that predate color tracking
pub const DEFAULT_COLOR_CATEGORY: &str = "Colorless";

/// Color assigned to records that predate color tracking
pub const DEFAULT_COLOR: &str = "Natural";

/// Product kind: an uncut roll or a piece cut to length
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum ProductKind {
    #[default]
    Normal,
    /// Older records were written with the Turkish label
    #[serde(alias = "Kesilmiş", alias = "Kesilmis")]
    Cut,
}

impl ProductKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Normal => "Normal",
            ProductKind::Cut => "Cut",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "Normal" | "normal" => Some(ProductKind::Normal),
            "Cut" | "cut" | "Kesilmiş" | "Kesilmis" => Some(ProductKind::Cut),
            _ => None,
        }
    }

    /// Resolve a possibly missing or unknown stored kind, defaulting to `Normal`
    pub fn from_legacy(value: Option<&str>) -> Self {
        value.and_then(Self::from_str).unwrap_or_default()
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color category and color of a product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColorSpec {
    pub category: String,
    pub color: String,
}

impl ColorSpec {
    pub fn new(category: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            color: color.into(),
        }
    }

    /// Build a color pair, substituting the defaults for missing or blank values
    pub fn from_legacy(category: Option<&str>, color: Option<&str>) -> Self {
        fn pick(value: Option<&str>, fallback: &str) -> String {
            match value.map(str::trim) {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => fallback.to_string(),
            }
        }

        Self {
            category: pick(category, DEFAULT_COLOR_CATEGORY),
            color: pick(color, DEFAULT_COLOR),
        }
    }
}

impl Default for ColorSpec {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR_CATEGORY, DEFAULT_COLOR)
    }
}

pub fn default_color_category() -> String {
    DEFAULT_COLOR_CATEGORY.to_string()
}

pub fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Area of a roll in m² from its width (cm) and length (m)
pub fn roll_area_m2(width_cm: Decimal, length_m: Decimal) -> Decimal {
    width_cm / Decimal::ONE_HUNDRED * length_m
}

/// Footprint of one cut piece in m² from its width and length, both in cm
pub fn piece_area_m2(width_cm: Decimal, length_cm: Decimal) -> Decimal {
    (width_cm / Decimal::ONE_HUNDRED) * (length_cm / Decimal::ONE_HUNDRED)
}

/// Convert a cut length in centimetres to metres
pub fn cm_to_m(length_cm: Decimal) -> Decimal {
    length_cm / Decimal::ONE_HUNDRED
}

/// Convert a length in metres to centimetres
pub fn m_to_cm(length_m: Decimal) -> Decimal {
    length_m * Decimal::ONE_HUNDRED
}
