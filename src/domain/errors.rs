//! Domain validation errors.

use std::fmt;

/// Errors that can occur when validating a phone number entered in the form.
///
/// The `Display` output is the exact message shown next to the phone field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// After stripping spaces and hyphens the value was empty or held a non-digit.
    NonDigit,

    /// The digit count was outside 7..=15.
    InvalidLength,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonDigit => write!(f, "Phone number must contain only digits"),
            Self::InvalidLength => write!(f, "Please enter a valid phone number length"),
        }
    }
}

impl std::error::Error for ValidationError {}
