//! Phone number normalization and validation.

use super::errors::ValidationError;

/// Minimum number of digits accepted after normalization.
pub const MIN_DIGITS: usize = 7;

/// Maximum number of digits accepted after normalization.
pub const MAX_DIGITS: usize = 15;

/// Strip every space and hyphen from a raw phone entry.
///
/// No other characters are touched, so `"(555) 123"` keeps its parentheses
/// and will later fail validation.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// Validate a raw phone entry.
///
/// Returns `None` when the number is acceptable. The character check runs
/// before the length check, so `"12ab"` reports [`ValidationError::NonDigit`]
/// even though it is also too short.
pub fn validate_phone(raw: &str) -> Option<ValidationError> {
    let cleaned = normalize_phone(raw);

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Some(ValidationError::NonDigit);
    }

    // Every char is ASCII here, so byte length equals digit count
    if cleaned.len() < MIN_DIGITS || cleaned.len() > MAX_DIGITS {
        return Some(ValidationError::InvalidLength);
    }

    None
}
