//! WebAssembly module for the packaging production tracking platform
//!
//! Provides client-side computation for:
//! - Roll and cut-piece areas on the entry forms
//! - Source roll needs of a cutting job
//! - Daily consumption additive totals
//! - TRY conversion of raw material purchases
//! - Offline stock preview from cached records

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str(&format!(
        "packtrack-wasm {} ready",
        env!("CARGO_PKG_VERSION")
    )));
}

fn js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Area of one roll in m² (width in cm, length in m)
#[wasm_bindgen]
pub fn calculate_roll_area(width_cm: f64, length_m: f64) -> f64 {
    to_f64(roll_area_m2(to_decimal(width_cm), to_decimal(length_m)).round_dp(2))
}

/// Footprint of one cut piece in m² (width and length in cm)
#[wasm_bindgen]
pub fn calculate_piece_area(width_cm: f64, length_cm: f64) -> f64 {
    to_f64(piece_area_m2(to_decimal(width_cm), to_decimal(length_cm)).round_dp(4))
}

/// Source rolls a cutting job needs, or -1 when it cannot be derived
#[wasm_bindgen]
pub fn calculate_required_rolls(
    source_width_cm: f64,
    source_length_m: f64,
    target_width_cm: f64,
    target_length_cm: f64,
    pieces: i32,
) -> i32 {
    let source = CutSource {
        thickness_mm: Decimal::ZERO,
        width_cm: to_decimal(source_width_cm),
        length_m: to_decimal(source_length_m),
        area_m2: Decimal::ZERO,
        color_category: default_color_category(),
        color: default_color(),
    };
    let target = CutTarget {
        thickness_mm: Decimal::ZERO,
        width_cm: to_decimal(target_width_cm),
        length_cm: to_decimal(target_length_cm),
        color_category: default_color_category(),
        color: default_color(),
        pieces,
    };
    target.required_source_units(&source).unwrap_or(-1)
}

fn consumption_json(polymer_kg: f64, scrap_kg: f64) -> Result<String, String> {
    let totals = ConsumptionBreakdown::from_inputs(to_decimal(polymer_kg), to_decimal(scrap_kg));
    serde_json::to_string(&totals).map_err(|e| format!("Serialization failed: {}", e))
}

/// Consumption totals as JSON: total polymer, estol and talc in kg
#[wasm_bindgen]
pub fn calculate_consumption(polymer_kg: f64, scrap_kg: f64) -> Result<String, JsValue> {
    consumption_json(polymer_kg, scrap_kg).map_err(js_error)
}

fn try_total(
    quantity: f64,
    unit_price: f64,
    currency: &str,
    usd_rate: f64,
    eur_rate: f64,
) -> Result<f64, String> {
    let currency =
        Currency::from_str(currency).ok_or_else(|| format!("Unknown currency: {}", currency))?;
    let rates = ExchangeRates {
        usd_rate: to_decimal(usd_rate),
        eur_rate: to_decimal(eur_rate),
    };
    let pricing =
        MaterialPricing::compute(to_decimal(quantity), to_decimal(unit_price), currency, &rates);
    Ok(to_f64(pricing.total_try.round_dp(2)))
}

/// Purchase total in TRY at the given rates
#[wasm_bindgen]
pub fn calculate_total_try(
    quantity: f64,
    unit_price: f64,
    currency: &str,
    usd_rate: f64,
    eur_rate: f64,
) -> Result<f64, JsValue> {
    try_total(quantity, unit_price, currency, usd_rate, eur_rate).map_err(js_error)
}

fn stock_preview(
    productions_json: &str,
    cut_products_json: &str,
    shipments_json: &str,
    policy: &str,
) -> Result<String, String> {
    let productions: Vec<Production> = serde_json::from_str(productions_json)
        .map_err(|e| format!("Invalid productions JSON: {}", e))?;
    let cut_products: Vec<CutProduct> = serde_json::from_str(cut_products_json)
        .map_err(|e| format!("Invalid cut products JSON: {}", e))?;
    let shipments: Vec<Shipment> = serde_json::from_str(shipments_json)
        .map_err(|e| format!("Invalid shipments JSON: {}", e))?;
    let policy = NormalTotalsPolicy::from_str(policy).unwrap_or_default();

    let buckets = compute_stock(&productions, &cut_products, &shipments, policy);
    serde_json::to_string(&buckets).map_err(|e| format!("Serialization failed: {}", e))
}

/// Stock computed from cached record lists, for use while offline
#[wasm_bindgen]
pub fn compute_stock_preview(
    productions_json: &str,
    cut_products_json: &str,
    shipments_json: &str,
    policy: &str,
) -> Result<String, JsValue> {
    stock_preview(productions_json, cut_products_json, shipments_json, policy).map_err(js_error)
}

/// Check a vehicle plate before a shipment is submitted
#[wasm_bindgen]
pub fn is_valid_plate(plate: &str) -> bool {
    validate_turkish_plate(plate).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_area() {
        assert!((calculate_roll_area(100.0, 50.0) - 50.0).abs() < 0.001);
        assert!((calculate_roll_area(120.0, 33.3) - 39.96).abs() < 0.001);
    }

    #[test]
    fn test_piece_area() {
        assert!((calculate_piece_area(100.0, 200.0) - 2.0).abs() < 0.0001);
    }

    #[test]
    fn test_required_rolls() {
        assert_eq!(calculate_required_rolls(100.0, 50.0, 50.0, 200.0, 120), 3);
        assert_eq!(calculate_required_rolls(100.0, 0.0, 50.0, 200.0, 120), -1);
    }

    #[test]
    fn test_consumption_json() {
        let json = consumption_json(100.0, 20.0).unwrap();
        let totals: ConsumptionBreakdown = serde_json::from_str(&json).unwrap();
        assert_eq!(totals.total_polymer_kg, Decimal::from(120));
    }

    #[test]
    fn test_try_total() {
        let total = try_total(10.0, 2.0, "USD", 34.5, 37.0).unwrap();
        assert!((total - 690.0).abs() < 0.001);
        assert!(try_total(10.0, 2.0, "GBP", 1.0, 1.0).is_err());
    }

    #[test]
    fn test_stock_preview_of_empty_cache() {
        assert_eq!(stock_preview("[]", "[]", "[]", "per_unit").unwrap(), "[]");
        assert!(stock_preview("not json", "[]", "[]", "per_unit").is_err());
    }

    #[test]
    fn test_plate_check() {
        assert!(is_valid_plate("34 ABC 123"));
        assert!(!is_valid_plate("ABC"));
    }
}
