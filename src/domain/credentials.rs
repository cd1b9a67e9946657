//! Credential and identity rules shared by the account use cases.
//!
//! Email normalization happens here, before any lookup or storage,
//! so the unique index on `users.email` always sees the canonical form.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{MAX_NAME_LENGTH, MIN_NAME_LENGTH};
use crate::errors::{AppError, AppResult};

/// Accepts `local@domain.tld` shapes, rejects whitespace and missing parts.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Canonical form of an email address: trimmed, lowercased. Idempotent.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate email shape. Call before normalization or after, both pass
/// for the same input since normalization never introduces whitespace.
pub fn validate_email(email: &str) -> AppResult<()> {
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(AppError::validation("Please provide a valid email address."));
    }
    Ok(())
}

/// Validate a display name and return its trimmed form.
pub fn validate_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.chars().count() < MIN_NAME_LENGTH {
        return Err(AppError::validation(
            "Name must be at least 2 characters long.",
        ));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::validation(
            "Name must be at most 100 characters long.",
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize_email("  U@Test.com "), "u@test.com");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_email(" Someone@Example.ORG ");
        assert_eq!(normalize_email(&once), once);
    }

    #[test]
    fn validates_basic_email_shapes() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("  user@example.com  ").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("spaces in@local.part").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn name_is_trimmed_and_bounded() {
        assert_eq!(validate_name("  Al  ").unwrap(), "Al");
        assert!(validate_name("A").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }
}
