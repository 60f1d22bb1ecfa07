//! Purchasing and consumption tests
//!
//! Tests for:
//! - Raw material pricing in TRY from foreign currency purchases
//! - Daily consumption additive breakdown (estol 3%, talc 1.5%)
//! - Shipment paperwork validation

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::models::{
    ConsumptionBreakdown, Currency, ExchangeRates, MaterialPricing, ESTOL_RATIO, TALC_RATIO,
};
use shared::validation::{validate_time_of_day, validate_turkish_plate};
use std::str::FromStr;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn rates() -> ExchangeRates {
    ExchangeRates {
        usd_rate: dec("34.20"),
        eur_rate: dec("37.05"),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_consumption_breakdown_example() {
        let totals = ConsumptionBreakdown::from_inputs(dec("100"), dec("20"));
        assert_eq!(totals.total_polymer_kg, dec("120"));
        assert_eq!(totals.total_estol_kg, dec("3.6"));
        assert_eq!(totals.total_talc_kg, dec("1.8"));
    }

    #[test]
    fn test_euro_purchase_is_converted() {
        let pricing = MaterialPricing::compute(dec("40"), dec("2.5"), Currency::Eur, &rates());
        assert_eq!(pricing.total_amount, dec("100"));
        assert_eq!(pricing.exchange_rate, dec("37.05"));
        assert_eq!(pricing.total_try, dec("3705"));
    }

    #[test]
    fn test_default_rates_leave_amount_unchanged() {
        let pricing = MaterialPricing::compute(
            dec("10"),
            dec("3"),
            Currency::Usd,
            &ExchangeRates::default(),
        );
        assert_eq!(pricing.total_try, dec("30"));
    }

    #[test]
    fn test_plates_seen_on_delivery_notes() {
        for plate in ["34 ABC 123", "06 AB 1234", "35 A 12345", "16AB123"] {
            assert!(validate_turkish_plate(plate).is_ok(), "{}", plate);
        }
        assert!(validate_turkish_plate("34-ABC-123").is_err());
    }

    #[test]
    fn test_departure_times() {
        assert!(validate_time_of_day("00:00").is_ok());
        assert!(validate_time_of_day("12:60").is_err());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn kg_strategy() -> impl Strategy<Value = Decimal> {
        (0u32..100_000u32, 0u32..100u32)
            .prop_map(|(whole, cents)| Decimal::from(whole) + Decimal::new(i64::from(cents), 2))
    }

    fn currency_strategy() -> impl Strategy<Value = Currency> {
        prop_oneof![Just(Currency::Try), Just(Currency::Usd), Just(Currency::Eur)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Additives are fixed shares of total polymer
        #[test]
        fn prop_additives_are_fixed_shares(polymer in kg_strategy(), scrap in kg_strategy()) {
            let totals = ConsumptionBreakdown::from_inputs(polymer, scrap);
            prop_assert_eq!(totals.total_polymer_kg, polymer + scrap);
            prop_assert_eq!(totals.total_estol_kg, totals.total_polymer_kg * ESTOL_RATIO);
            prop_assert_eq!(totals.total_talc_kg, totals.total_polymer_kg * TALC_RATIO);
            prop_assert!(totals.total_talc_kg <= totals.total_estol_kg);
        }

        /// Total in TRY = quantity x unit price x rate of the purchase currency
        #[test]
        fn prop_pricing_uses_purchase_currency(
            quantity in kg_strategy(),
            price in kg_strategy(),
            currency in currency_strategy()
        ) {
            let pricing = MaterialPricing::compute(quantity, price, currency, &rates());
            prop_assert_eq!(pricing.total_amount, quantity * price);
            prop_assert_eq!(pricing.exchange_rate, rates().rate_for(currency));
            prop_assert_eq!(pricing.total_try, pricing.total_amount * pricing.exchange_rate);
        }
    }
}
