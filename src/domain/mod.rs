//! Domain value objects and types.
//!
//! Phone validation and the country dialing-code table. Everything here is
//! pure and deterministic; the form state machine calls into it before any
//! network work happens.

pub mod country;
pub mod errors;
pub mod phone;

pub use country::{CountryCode, COUNTRY_CODES};
pub use errors::ValidationError;
pub use phone::{normalize_phone, validate_phone};
