//! Registration rules for user accounts.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Something, an `@`, something, a dot, something. No whitespace anywhere.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Validate the rough shape of an email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !EMAIL_RE.is_match(email) {
        return Err(CoreError::Validation("Invalid email format".to_string()));
    }
    Ok(())
}

/// Validate that a password meets the minimum length.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), CoreError> {
    if password.chars().count() < min_length {
        return Err(CoreError::Validation(format!(
            "Password must be at least {min_length} characters long"
        )));
    }
    Ok(())
}

/// Return the value if it is present and not blank.
pub fn required(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn accepts_ordinary_email() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email("a.b+tag@sub.example.co.in").is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        for email in ["jane", "jane@example", "@example.com", "jane doe@example.com", "jane@@example.com"] {
            assert_matches!(
                validate_email(email),
                Err(CoreError::Validation(msg)) if msg == "Invalid email format",
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn password_too_short() {
        let result = validate_password_strength("12345", MIN_PASSWORD_LENGTH);
        assert_matches!(
            result,
            Err(CoreError::Validation(msg)) if msg.contains("at least 6 characters")
        );
    }

    #[test]
    fn password_at_minimum_passes() {
        assert!(validate_password_strength("123456", MIN_PASSWORD_LENGTH).is_ok());
        assert!(validate_password_strength("a-much-longer-password", MIN_PASSWORD_LENGTH).is_ok());
    }

    #[test]
    fn blank_values_are_missing() {
        assert_eq!(required(Some("x")), Some("x"));
        assert_eq!(required(Some("   ")), None);
        assert_eq!(required(Some("")), None);
        assert_eq!(required(None), None);
    }
}
