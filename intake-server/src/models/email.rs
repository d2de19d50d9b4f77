//! Email address validation
//!
//! Syntactic check only: `local@domain.tld`, no whitespace, exactly one `@`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

/// Validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new email address, validating its shape.
    ///
    /// # Example
    /// ```
    /// use intake_server::models::EmailAddress;
    ///
    /// assert!(EmailAddress::new("jo@x.com").is_ok());
    /// assert!(EmailAddress::new("not-an-email").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if !EMAIL_RE.is_match(s) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
