//! Field validation for collected form values

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ConversationError;

// Local-part "@" domain-with-dot, no embedded whitespace.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// Check a trimmed name. Accepted iff longer than one character;
/// stored verbatim, no other constraint.
pub fn validate_name(name: &str) -> bool {
    name.chars().count() > 1
}

/// Normalize and validate a phone number.
///
/// All non-digit characters are stripped before validation; the input
/// is accepted iff exactly 10 digits remain. Returns the normalized
/// digit string.
pub fn normalize_phone(input: &str) -> Result<String, ConversationError> {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        Ok(digits)
    } else {
        Err(ConversationError::InvalidPhone)
    }
}

/// Validate an email address.
pub fn validate_email(input: &str) -> Result<(), ConversationError> {
    if EMAIL_RE.is_match(input) {
        Ok(())
    } else {
        Err(ConversationError::InvalidEmail)
    }
}
