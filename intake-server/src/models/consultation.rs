//! Consultation booking submissions

use serde::Deserialize;

use super::validation::{loose_string, RequiredFields};
use super::{EmailAddress, ValidationError};

/// Raw booking payload as posted by the client.
///
/// Every field is optional here so that absence is reported as a
/// validation error rather than a body parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationSubmission {
    #[serde(default, deserialize_with = "loose_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub consultation_type: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub preferred_date: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub preferred_time: Option<String>,
}

/// Validated booking, ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConsultation {
    pub full_name: String,
    pub phone_number: String,
    pub email: EmailAddress,
    pub consultation_type: String,
    pub preferred_date: String,
    pub preferred_time: String,
}

impl TryFrom<ConsultationSubmission> for NewConsultation {
    type Error = ValidationError;

    /// All six fields are required; the email check runs only once they are present.
    fn try_from(s: ConsultationSubmission) -> Result<Self, Self::Error> {
        let mut required = RequiredFields::new();
        let full_name = required.take("fullName", s.full_name);
        let phone_number = required.take("phoneNumber", s.phone_number);
        let email = required.take("email", s.email);
        let consultation_type = required.take("consultationType", s.consultation_type);
        let preferred_date = required.take("preferredDate", s.preferred_date);
        let preferred_time = required.take("preferredTime", s.preferred_time);
        required.finish()?;

        Ok(Self {
            full_name,
            phone_number,
            email: EmailAddress::new(&email)?,
            consultation_type,
            preferred_date,
            preferred_time,
        })
    }
}
