//! Daily raw material consumption models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Additive (estol) share of total polymer consumption: 3%
pub const ESTOL_RATIO: Decimal = Decimal::from_parts(3, 0, 0, false, 2);

/// Talc share of total polymer consumption: 1.5%
pub const TALC_RATIO: Decimal = Decimal::from_parts(15, 0, 0, false, 3);

/// One machine's consumption on one day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyConsumption {
    pub id: Uuid,
    pub date: NaiveDate,
    pub machine: String,
    /// Fresh polymer (petkim) fed in
    pub polymer_kg: Decimal,
    /// Recycled scrap (fire) fed in
    pub scrap_kg: Decimal,
    pub total_polymer_kg: Decimal,
    pub total_estol_kg: Decimal,
    pub total_talc_kg: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Totals derived from the polymer and scrap inputs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsumptionBreakdown {
    pub total_polymer_kg: Decimal,
    pub total_estol_kg: Decimal,
    pub total_talc_kg: Decimal,
}

impl ConsumptionBreakdown {
    pub fn from_inputs(polymer_kg: Decimal, scrap_kg: Decimal) -> Self {
        let total_polymer_kg = polymer_kg + scrap_kg;
        Self {
            total_polymer_kg,
            total_estol_kg: total_polymer_kg * ESTOL_RATIO,
            total_talc_kg: total_polymer_kg * TALC_RATIO,
        }
    }
}

/// Sum of consumption totals over a set of entries
pub fn sum_consumption(entries: &[DailyConsumption]) -> ConsumptionBreakdown {
    entries.iter().fold(
        ConsumptionBreakdown {
            total_polymer_kg: Decimal::ZERO,
            total_estol_kg: Decimal::ZERO,
            total_talc_kg: Decimal::ZERO,
        },
        |acc, e| ConsumptionBreakdown {
            total_polymer_kg: acc.total_polymer_kg + e.total_polymer_kg,
            total_estol_kg: acc.total_estol_kg + e.total_estol_kg,
            total_talc_kg: acc.total_talc_kg + e.total_talc_kg,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn entry(polymer: &str, scrap: &str) -> DailyConsumption {
        let breakdown = ConsumptionBreakdown::from_inputs(dec(polymer), dec(scrap));
        DailyConsumption {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            machine: "EXT-1".to_string(),
            polymer_kg: dec(polymer),
            scrap_kg: dec(scrap),
            total_polymer_kg: breakdown.total_polymer_kg,
            total_estol_kg: breakdown.total_estol_kg,
            total_talc_kg: breakdown.total_talc_kg,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_breakdown_ratios() {
        let b = ConsumptionBreakdown::from_inputs(dec("900"), dec("100"));
        assert_eq!(b.total_polymer_kg, dec("1000"));
        assert_eq!(b.total_estol_kg, dec("30"));
        assert_eq!(b.total_talc_kg, dec("15"));
    }

    #[test]
    fn test_sum_consumption() {
        let total = sum_consumption(&[entry("900", "100"), entry("200", "0")]);
        assert_eq!(total.total_polymer_kg, dec("1200"));
        assert_eq!(total.total_estol_kg, dec("36"));
        assert_eq!(total.total_talc_kg, dec("18"));
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        let total = sum_consumption(&[]);
        assert_eq!(total.total_polymer_kg, Decimal::ZERO);
    }
}
