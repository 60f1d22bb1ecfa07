//! Raw material purchase models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Currency, ExchangeRates};

/// A raw material purchase entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawMaterial {
    pub id: Uuid,
    pub entry_date: NaiveDate,
    pub name: String,
    pub unit: MaterialUnit,
    pub quantity: Decimal,
    pub currency: Currency,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub exchange_rate: Decimal,
    pub total_try: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Unit a raw material is counted in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MaterialUnit {
    Kilogram,
    #[serde(alias = "Adet")]
    Piece,
    Litre,
}

impl MaterialUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialUnit::Kilogram => "Kilogram",
            MaterialUnit::Piece => "Piece",
            MaterialUnit::Litre => "Litre",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Kilogram" => Some(MaterialUnit::Kilogram),
            "Piece" | "Adet" => Some(MaterialUnit::Piece),
            "Litre" => Some(MaterialUnit::Litre),
            _ => None,
        }
    }
}

/// Price figures derived when a purchase is recorded
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct MaterialPricing {
    pub total_amount: Decimal,
    pub exchange_rate: Decimal,
    pub total_try: Decimal,
}

impl MaterialPricing {
    /// Total = quantity × unit price, converted with the current rate
    pub fn compute(
        quantity: Decimal,
        unit_price: Decimal,
        currency: Currency,
        rates: &ExchangeRates,
    ) -> Self {
        let total_amount = quantity * unit_price;
        let exchange_rate = rates.rate_for(currency);
        Self {
            total_amount,
            exchange_rate,
            total_try: total_amount * exchange_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_pricing_in_foreign_currency() {
        let rates = ExchangeRates {
            usd_rate: dec("34.50"),
            eur_rate: dec("37.00"),
        };
        let pricing = MaterialPricing::compute(dec("250"), dec("1.20"), Currency::Usd, &rates);
        assert_eq!(pricing.total_amount, dec("300"));
        assert_eq!(pricing.exchange_rate, dec("34.50"));
        assert_eq!(pricing.total_try, dec("10350"));
    }

    #[test]
    fn test_pricing_in_lira_ignores_rates() {
        let rates = ExchangeRates {
            usd_rate: dec("34.50"),
            eur_rate: dec("37.00"),
        };
        let pricing = MaterialPricing::compute(dec("10"), dec("45"), Currency::Try, &rates);
        assert_eq!(pricing.exchange_rate, Decimal::ONE);
        assert_eq!(pricing.total_try, dec("450"));
    }

    #[test]
    fn test_legacy_unit_name() {
        let unit: MaterialUnit = serde_json::from_str("\"Adet\"").unwrap();
        assert_eq!(unit, MaterialUnit::Piece);
        assert_eq!(MaterialUnit::from_str("Litre"), Some(MaterialUnit::Litre));
        assert_eq!(MaterialUnit::from_str("ton"), None);
    }
}
