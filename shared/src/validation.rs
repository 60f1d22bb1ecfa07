//! Validation utilities for the packaging production tracking platform
//!
//! Includes Turkey-specific checks for shipment paperwork.

use rust_decimal::Decimal;
use validator::ValidationError;

use crate::types::ProductKind;

/// Largest thickness the film lines produce, in mm
pub const MAX_THICKNESS_MM: u32 = 50;

/// Widest roll the film lines produce, in cm
pub const MAX_WIDTH_CM: u32 = 1000;

// ============================================================================
// Production Validations
// ============================================================================

/// Validate that a physical dimension is strictly positive
pub fn validate_dimension(value: Decimal) -> Result<(), &'static str> {
    if value <= Decimal::ZERO {
        return Err("Dimension must be greater than zero");
    }
    Ok(())
}

/// Validate film thickness in mm
pub fn validate_thickness(thickness_mm: Decimal) -> Result<(), &'static str> {
    validate_dimension(thickness_mm)?;
    if thickness_mm > Decimal::from(MAX_THICKNESS_MM) {
        return Err("Thickness exceeds the supported maximum");
    }
    Ok(())
}

/// Validate roll width in cm
pub fn validate_width(width_cm: Decimal) -> Result<(), &'static str> {
    validate_dimension(width_cm)?;
    if width_cm > Decimal::from(MAX_WIDTH_CM) {
        return Err("Width exceeds the supported maximum");
    }
    Ok(())
}

/// Validate that a quantity (area, weight, price) is not negative
pub fn validate_quantity(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO {
        return Err("Quantity cannot be negative");
    }
    Ok(())
}

/// Validate that a cut piece fits inside its source roll
pub fn validate_cut_fits_source(
    source_width_cm: Decimal,
    target_width_cm: Decimal,
) -> Result<(), &'static str> {
    if target_width_cm > source_width_cm {
        return Err("Cut width cannot exceed the source roll width");
    }
    Ok(())
}

/// Validate a length entry for the given product kind
///
/// Cut lengths are entered in metres on shipments and must stay above one
/// centimetre to be distinguishable from rounding noise.
pub fn validate_length_for_kind(kind: ProductKind, length_m: Decimal) -> Result<(), &'static str> {
    match kind {
        ProductKind::Normal => validate_dimension(length_m),
        ProductKind::Cut if length_m < Decimal::new(1, 2) => {
            Err("Cut length must be at least one centimetre")
        }
        ProductKind::Cut => Ok(()),
    }
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate username: 3-50 characters of letters, digits, '.', '_' or '-'
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 3 {
        return Err("Username must be at least 3 characters");
    }
    if username.len() > 50 {
        return Err("Username must be at most 50 characters");
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err("Username may only contain letters, digits, '.', '_' and '-'");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

/// Validate a 24-hour clock time in HH:MM form
pub fn validate_time_of_day(value: &str) -> Result<(), &'static str> {
    let Some((hours, minutes)) = value.split_once(':') else {
        return Err("Time must be in HH:MM format");
    };
    if hours.len() != 2 || minutes.len() != 2 {
        return Err("Time must be in HH:MM format");
    }
    match (hours.parse::<u8>(), minutes.parse::<u8>()) {
        (Ok(h), Ok(m)) if h < 24 && m < 60 => Ok(()),
        _ => Err("Time must be a valid 24-hour clock time"),
    }
}

// ============================================================================
// Turkey-Specific Validations
// ============================================================================

/// Validate Turkish vehicle plate
/// Accepts: 34 ABC 123, 06 AB 1234, 35A1234
pub fn validate_turkish_plate(plate: &str) -> Result<(), &'static str> {
    let compact: String = plate.chars().filter(|c| !c.is_whitespace()).collect();
    let compact = compact.to_ascii_uppercase();

    let province: String = compact.chars().take_while(|c| c.is_ascii_digit()).collect();
    if province.len() != 2 {
        return Err("Plate must start with a two-digit province code");
    }
    let code: u8 = province.parse().map_err(|_| "Invalid province code")?;
    if !(1..=81).contains(&code) {
        return Err("Province code must be between 01 and 81");
    }

    let rest = &compact[2..];
    let letters: String = rest.chars().take_while(|c| c.is_ascii_uppercase()).collect();
    let digits = &rest[letters.len()..];
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err("Invalid plate format");
    }

    let valid = match letters.len() {
        1 => (4..=5).contains(&digits.len()),
        2 => (3..=4).contains(&digits.len()),
        3 => (2..=3).contains(&digits.len()),
        _ => false,
    };
    if !valid {
        return Err("Invalid plate letter and number combination");
    }
    Ok(())
}

// ============================================================================
// Validator adapters
// ============================================================================

fn to_validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub fn check_thickness(value: &Decimal) -> Result<(), ValidationError> {
    validate_thickness(*value).map_err(|m| to_validation_error("thickness", m))
}

pub fn check_width(value: &Decimal) -> Result<(), ValidationError> {
    validate_width(*value).map_err(|m| to_validation_error("width", m))
}

pub fn check_dimension(value: &Decimal) -> Result<(), ValidationError> {
    validate_dimension(*value).map_err(|m| to_validation_error("range", m))
}

pub fn check_quantity(value: &Decimal) -> Result<(), ValidationError> {
    validate_quantity(*value).map_err(|m| to_validation_error("range", m))
}

pub fn check_time_of_day(value: &str) -> Result<(), ValidationError> {
    validate_time_of_day(value).map_err(|m| to_validation_error("time", m))
}

pub fn check_plate(value: &str) -> Result<(), ValidationError> {
    validate_turkish_plate(value).map_err(|m| to_validation_error("plate", m))
}

pub fn check_username(value: &str) -> Result<(), ValidationError> {
    validate_username(value).map_err(|m| to_validation_error("username", m))
}

pub fn check_password(value: &str) -> Result<(), ValidationError> {
    validate_password(value).map_err(|m| to_validation_error("password", m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    // ========================================================================
    // Production Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_thickness() {
        assert!(validate_thickness(dec("1.5")).is_ok());
        assert!(validate_thickness(dec("0.05")).is_ok());
        assert!(validate_thickness(dec("0")).is_err());
        assert!(validate_thickness(dec("-1")).is_err());
        assert!(validate_thickness(dec("51")).is_err());
    }

    #[test]
    fn test_validate_width() {
        assert!(validate_width(dec("100")).is_ok());
        assert!(validate_width(dec("1000")).is_ok());
        assert!(validate_width(dec("1000.5")).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(dec("0")).is_ok());
        assert!(validate_quantity(dec("12.5")).is_ok());
        assert!(validate_quantity(dec("-0.01")).is_err());
    }

    #[test]
    fn test_cut_must_fit_source() {
        assert!(validate_cut_fits_source(dec("100"), dec("100")).is_ok());
        assert!(validate_cut_fits_source(dec("100"), dec("50")).is_ok());
        assert!(validate_cut_fits_source(dec("100"), dec("101")).is_err());
    }

    #[test]
    fn test_length_for_kind() {
        assert!(validate_length_for_kind(ProductKind::Cut, dec("2.0")).is_ok());
        assert!(validate_length_for_kind(ProductKind::Cut, dec("0.01")).is_ok());
        assert!(validate_length_for_kind(ProductKind::Cut, dec("0.005")).is_err());
        assert!(validate_length_for_kind(ProductKind::Normal, dec("0")).is_err());
    }

    // ========================================================================
    // General Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_username() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("depo.sorumlusu_2").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("SAR2025!").is_ok());
        assert!(validate_password("123456").is_ok());
        assert!(validate_password("12345").is_err());
    }

    #[test]
    fn test_validate_time_of_day() {
        assert!(validate_time_of_day("08:30").is_ok());
        assert!(validate_time_of_day("23:59").is_ok());
        assert!(validate_time_of_day("24:00").is_err());
        assert!(validate_time_of_day("8:30").is_err());
        assert!(validate_time_of_day("0830").is_err());
    }

    // ========================================================================
    // Turkey-Specific Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_turkish_plate_valid() {
        assert!(validate_turkish_plate("34 ABC 123").is_ok());
        assert!(validate_turkish_plate("06 AB 1234").is_ok());
        assert!(validate_turkish_plate("35A1234").is_ok());
        assert!(validate_turkish_plate("16 abc 12").is_ok());
    }

    #[test]
    fn test_validate_turkish_plate_invalid() {
        assert!(validate_turkish_plate("00 ABC 123").is_err()); // No province 00
        assert!(validate_turkish_plate("82 ABC 123").is_err()); // Beyond 81
        assert!(validate_turkish_plate("34 ABCD 12").is_err()); // Too many letters
        assert!(validate_turkish_plate("34 ABC 1234").is_err()); // Too many digits
        assert!(validate_turkish_plate("ABC 123").is_err()); // No province
    }

    #[test]
    fn test_adapters_carry_messages() {
        let err = check_thickness(&dec("0")).unwrap_err();
        assert_eq!(err.code, "thickness");
        assert!(err.message.is_some());
        assert!(check_plate("34 ABC 123").is_ok());
    }
}
