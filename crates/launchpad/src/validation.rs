//! Token metadata validation

use crate::constants::{MAX_RAW_SUPPLY, MAX_SYMBOL_LENGTH};
use crate::types::TokenMetadata;

/// Check metadata before any network call.
///
/// Returns the message for the first failing rule, or `None` when the
/// metadata is launchable. Rules run in a fixed order: name, symbol presence,
/// symbol length, supply.
pub fn validate_token_metadata(metadata: &TokenMetadata) -> Option<String> {
    if metadata.name.trim().is_empty() {
        return Some("Token name is required".to_string());
    }

    if metadata.symbol.trim().is_empty() {
        return Some("Token symbol is required".to_string());
    }

    // Length in UTF-16 code units, so astral characters count twice
    if metadata.symbol.encode_utf16().count() > MAX_SYMBOL_LENGTH {
        return Some(format!(
            "Token symbol must be {} characters or less",
            MAX_SYMBOL_LENGTH
        ));
    }

    match parse_supply(&metadata.supply) {
        Some(supply) if supply > 0.0 => None,
        _ => Some("Token supply must be a positive number".to_string()),
    }
}

/// Parse a human-scale supply string. Non-finite values are rejected.
pub fn parse_supply(supply: &str) -> Option<f64> {
    supply
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Convert a human-scale supply into base units, truncating extra precision.
///
/// Returns `None` when the supply is not a positive number or the result
/// does not fit in a mint.
pub fn to_raw_supply(supply: &str, decimals: u8) -> Option<u64> {
    let value = parse_supply(supply).filter(|value| *value > 0.0)?;
    let raw = (value * 10f64.powi(decimals as i32)).floor();

    // u64::MAX is not representable; anything at or above 2^64 overflows
    if raw >= (MAX_RAW_SUPPLY as f64) {
        return None;
    }

    Some(raw as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(name: &str, symbol: &str, supply: &str) -> TokenMetadata {
        TokenMetadata::new(name, symbol, supply)
    }

    #[test]
    fn test_name_required() {
        assert_eq!(
            validate_token_metadata(&metadata("", "MOON", "1")),
            Some("Token name is required".to_string())
        );
        assert_eq!(
            validate_token_metadata(&metadata("   ", "MOON", "1")),
            Some("Token name is required".to_string())
        );
    }

    #[test]
    fn test_rules_checked_in_order() {
        // Everything is wrong, the name rule reports first
        assert_eq!(
            validate_token_metadata(&metadata("", "", "abc")),
            Some("Token name is required".to_string())
        );
        assert_eq!(
            validate_token_metadata(&metadata("Moon", " ", "abc")),
            Some("Token symbol is required".to_string())
        );
        assert_eq!(
            validate_token_metadata(&metadata("Moon", "ABCDEFGHIJK", "abc")),
            Some("Token symbol must be 10 characters or less".to_string())
        );
    }

    #[test]
    fn test_symbol_length_boundary() {
        assert!(validate_token_metadata(&metadata("Moon", "ABCDEFGHIJ", "1")).is_none());
        assert!(validate_token_metadata(&metadata("Moon", "ABCDEFGHIJK", "1")).is_some());
    }

    #[test]
    fn test_symbol_length_counts_utf16_units() {
        // Five rockets are ten units, six are twelve
        assert!(validate_token_metadata(&metadata("Moon", "🚀🚀🚀🚀🚀", "1")).is_none());
        assert_eq!(
            validate_token_metadata(&metadata("Moon", "🚀🚀🚀🚀🚀🚀", "1")),
            Some("Token symbol must be 10 characters or less".to_string())
        );
        // BMP characters count once
        assert!(validate_token_metadata(&metadata("Moon", "ÉÉÉÉÉÉÉÉÉÉ", "1")).is_none());
    }

    #[test]
    fn test_supply_rules() {
        for bad in ["", "abc", "0", "-5", "0.0", "NaN", "inf"] {
            assert_eq!(
                validate_token_metadata(&metadata("Moon", "MOON", bad)),
                Some("Token supply must be a positive number".to_string()),
                "supply {:?} should be rejected",
                bad
            );
        }

        assert!(validate_token_metadata(&metadata("Moon", "MOON", "1")).is_none());
        assert!(validate_token_metadata(&metadata("Moon", "MOON", "0.5")).is_none());
    }

    #[test]
    fn test_raw_supply_conversion() {
        assert_eq!(to_raw_supply("1000000", 9), Some(1_000_000_000_000_000));
        assert_eq!(to_raw_supply("1", 9), Some(1_000_000_000));
        assert_eq!(to_raw_supply("2.5", 9), Some(2_500_000_000));
        // Below one base unit truncates to zero
        assert_eq!(to_raw_supply("0.0000000001", 9), Some(0));
        assert_eq!(to_raw_supply("0", 9), None);
        assert_eq!(to_raw_supply("100000000000", 9), None);
    }
}
