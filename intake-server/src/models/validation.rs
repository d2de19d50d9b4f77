//! Validation error types and required-field helpers

use std::fmt;

use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

/// Validation error for submitted payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields absent or empty
    MissingFields { fields: Vec<&'static str> },

    /// Email doesn't look like `local@domain.tld`
    InvalidEmail,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Callers only ever see these two messages; the field list is for logs.
        match self {
            Self::MissingFields { .. } => write!(f, "Missing required fields"),
            Self::InvalidEmail => write!(f, "Invalid email address"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Collects required fields, remembering which ones were absent.
///
/// A field counts as missing when it is `None` or an empty string.
#[derive(Debug, Default)]
pub(crate) struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Take a required value. Missing values yield an empty placeholder and
    /// are reported by [`RequiredFields::finish`].
    pub(crate) fn take(&mut self, field: &'static str, value: Option<String>) -> String {
        match value {
            Some(v) if !v.is_empty() => v,
            _ => {
                self.missing.push(field);
                String::new()
            }
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields {
                fields: self.missing,
            })
        }
    }
}

/// Normalise an optional field: empty strings are stored as absent.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Deserialize a submitted field the way a loose client treats it: `null`,
/// `false` and `0` count as absent, strings pass through, and any other value
/// fails the body.
pub(crate) fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string, found {other}"
        ))),
    }
}
