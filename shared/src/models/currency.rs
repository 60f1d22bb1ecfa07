//! Currency and exchange rate models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Currencies raw materials can be bought in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Turkish lira
    #[default]
    #[serde(alias = "TL")]
    Try,
    Usd,
    Eur,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Try => "TRY",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "TRY" | "TL" => Some(Currency::Try),
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            _ => None,
        }
    }
}

/// Exchange rates to TRY
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExchangeRates {
    pub usd_rate: Decimal,
    pub eur_rate: Decimal,
}

impl ExchangeRates {
    /// TRY per one unit of `currency`
    pub fn rate_for(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Try => Decimal::ONE,
            Currency::Usd => self.usd_rate,
            Currency::Eur => self.eur_rate,
        }
    }

    pub fn to_try(&self, amount: Decimal, currency: Currency) -> Decimal {
        amount * self.rate_for(currency)
    }
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self {
            usd_rate: Decimal::ONE,
            eur_rate: Decimal::ONE,
        }
    }
}

/// A stored set of exchange rates; the newest one is current
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrencyRate {
    pub id: Uuid,
    pub usd_rate: Decimal,
    pub eur_rate: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl CurrencyRate {
    pub fn rates(&self) -> ExchangeRates {
        ExchangeRates {
            usd_rate: self.usd_rate,
            eur_rate: self.eur_rate,
        }
    }
}
