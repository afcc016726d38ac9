//! FolkId value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// prefix + UUID v4, e.g. "per_xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"
static FOLK_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]{2,4}_[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("Failed to compile Folk ID regex")
});

/// A validated Folk record identifier.
///
/// Identifiers are assigned by Folk; this type only checks their shape so a
/// malformed ID is rejected before a request is made.
///
/// # Example
///
/// ```
/// use folk_mcp_server::domain::FolkId;
///
/// let id = FolkId::parse("per_0b3c2a1e-6f1d-4c8e-9a7b-2d5e8f1a3c4b", "person").unwrap();
/// assert_eq!(id.prefix(), "per");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolkId(String);

impl FolkId {
    /// Parse an identifier, naming the `entity` in the error message.
    ///
    /// Surrounding whitespace is ignored.
    pub fn parse(value: &str, entity: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if !FOLK_ID_REGEX.is_match(trimmed) {
            return Err(ValidationError::InvalidId {
                entity: entity.to_string(),
                value: value.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The type prefix before the underscore (`per`, `com`, `grp`, ...).
    pub fn prefix(&self) -> &str {
        self.0.split('_').next().unwrap_or_default()
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FolkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
