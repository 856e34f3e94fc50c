//! Input shape validation for caller-facing operations.

use regex::Regex;
use std::sync::LazyLock;

use crate::MembershipError;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// Validates an email address's shape.
pub fn validate_email(email: &str) -> Result<(), MembershipError> {
    if email.is_empty() {
        return Err(MembershipError::InvalidArgument(
            "email cannot be empty".to_owned(),
        ));
    }

    if email.len() > 254 {
        return Err(MembershipError::InvalidArgument(
            "email is too long (max 254 characters)".to_owned(),
        ));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(MembershipError::InvalidArgument(
            "invalid email format".to_owned(),
        ));
    }

    Ok(())
}

/// Rejects an empty identifier with a message naming the field.
pub fn require_non_empty(value: &str, field: &str) -> Result<(), MembershipError> {
    if value.is_empty() {
        return Err(MembershipError::InvalidArgument(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}
