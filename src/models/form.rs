//! Contact form record and the payload sent to the lead webhook.

use crate::domain::{normalize_phone, CountryCode};
use serde::{Deserialize, Serialize};

/// The user-entered lead information.
///
/// `phone` holds the raw text exactly as typed; normalization happens in
/// [`compose`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Date of birth as entered (`YYYY-MM-DD` from a date input)
    pub birthday: String,
}

impl ContactForm {
    /// Reset every field to an empty string.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when every field is empty.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.phone.is_empty()
            && self.birthday.is_empty()
    }

    /// Mutable access to a single field.
    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Birthday => &mut self.birthday,
        }
    }
}

/// Free-text fields of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Birthday,
}

/// The exact JSON object posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub name: String,
    pub email: String,
    /// Dialing code followed directly by the normalized digits, e.g. `+15550000`
    pub phone: String,
    pub birthday: String,
}

/// Build the outbound payload from a form and the selected country.
///
/// Does not validate; callers run [`crate::domain::validate_phone`] first.
pub fn compose(form: &ContactForm, country: &CountryCode) -> SubmissionPayload {
    SubmissionPayload {
        name: form.name.clone(),
        email: form.email.clone(),
        phone: format!("{}{}", country.code, normalize_phone(&form.phone)),
        birthday: form.birthday.clone(),
    }
}
