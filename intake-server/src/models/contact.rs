//! Contact message submissions

use serde::Deserialize;

use super::validation::{loose_string, optional, RequiredFields};
use super::{EmailAddress, ValidationError};

/// Raw contact payload as posted by the client
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(default, deserialize_with = "loose_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub message: Option<String>,
}

/// Validated contact message, ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub full_name: String,
    pub email: EmailAddress,
    /// `None` when omitted or empty, never `Some("")`
    pub phone_number: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

impl TryFrom<ContactSubmission> for NewContactMessage {
    type Error = ValidationError;

    fn try_from(s: ContactSubmission) -> Result<Self, Self::Error> {
        let mut required = RequiredFields::new();
        let full_name = required.take("fullName", s.full_name);
        let email = required.take("email", s.email);
        let message = required.take("message", s.message);
        required.finish()?;

        Ok(Self {
            full_name,
            email: EmailAddress::new(&email)?,
            phone_number: optional(s.phone_number),
            subject: optional(s.subject),
            message,
        })
    }
}
