//! EmailAddress value object.

use super::errors::ValidationError;
use std::fmt;

/// An email address accepted as a tool argument.
///
/// Validation is deliberately shallow: one '@', a non-empty local part and a
/// dotted domain. Folk performs its own checks on top.
///
/// # Example
///
/// ```
/// use folk_mcp_server::domain::EmailAddress;
///
/// let email = EmailAddress::new("  ada@example.com ").unwrap();
/// assert_eq!(email.as_str(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new EmailAddress from trimmed input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEmail` if the address is malformed.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into().trim().to_string();

        if !Self::is_valid(&email) {
            return Err(ValidationError::InvalidEmail(email));
        }

        Ok(Self(email))
    }

    fn is_valid(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || domain.contains('@') || email.contains(char::is_whitespace) {
            return false;
        }

        domain.contains('.') && domain.split('.').all(|part| !part.is_empty())
    }

    /// Get the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
