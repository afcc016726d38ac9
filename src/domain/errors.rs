//! Domain validation errors.

use std::fmt;

/// Errors raised while validating tool arguments, before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text argument was empty or blank.
    Empty(String),

    /// An identifier does not follow the Folk `prefix_uuid` format.
    InvalidId { entity: String, value: String },

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// A date-time argument is not RFC 3339.
    InvalidDateTime(String),

    /// An argument is present but unusable.
    InvalidArgument { name: String, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "'{}' cannot be empty", name),
            Self::InvalidId { entity, value } => write!(
                f,
                "Invalid {} ID '{}'. Folk IDs are prefix + UUID v4 format \
                 (e.g., 'per_xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx'). \
                 Call find_person or find_company first to get the correct ID from the search results.",
                entity, value
            ),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::InvalidDateTime(value) => write!(
                f,
                "Invalid date-time '{}': expected ISO 8601 with offset, e.g. '2026-01-28T09:00:00Z'",
                value
            ),
            Self::InvalidArgument { name, reason } => write!(f, "Invalid '{}': {}", name, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reject blank text arguments, returning the trimmed value.
pub fn require_text(name: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty(name.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("name", "  Ada ").unwrap(), "Ada");
        assert_eq!(
            require_text("name", "   "),
            Err(ValidationError::Empty("name".to_string()))
        );
    }

    #[test]
    fn test_invalid_id_message_is_actionable() {
        let err = ValidationError::InvalidId {
            entity: "person".to_string(),
            value: "123".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("person ID '123'"));
        assert!(message.contains("find_person"));
    }
}
