//! Data models for the lead-capture form.

pub mod form;

pub use form::{compose, ContactForm, FormField, SubmissionPayload};
