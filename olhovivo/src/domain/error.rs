//! Domain validation errors.
//!
//! Every value object validates its input once, at construction. A
//! `ValidationError` names the offending field and why it was rejected.

/// A field failed validation while constructing a domain value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    field: &'static str,
    reason: String,
}

impl ValidationError {
    pub(crate) fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the field that was rejected.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Human-readable reason for the rejection.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Reject empty (or all-whitespace) required strings.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::new("bus id", "expected 5 digits, got \"123\"");
        assert_eq!(
            err.to_string(),
            "invalid bus id: expected 5 digits, got \"123\""
        );
        assert_eq!(err.field(), "bus id");
    }

    #[test]
    fn non_empty_check() {
        assert!(require_non_empty("name", "Terminal Lapa").is_ok());
        assert!(require_non_empty("name", "").is_err());
        assert!(require_non_empty("name", "   ").is_err());
    }
}
