//! Email and username checks plus display masking for log output

use once_cell::sync::Lazy;
use regex::Regex;

use super::phone::mask_phone_number;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)+$").unwrap());

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]{3,150}$").unwrap());

/// Basic structural check of an email address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Usernames are 3-150 characters of letters, digits, `_`, `.` or `-`
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username.trim())
}

/// Delivery channel selection: an identifier containing `@` is an email
pub fn looks_like_email(identifier: &str) -> bool {
    identifier.contains('@')
}

/// Mask an email for display (e.g., j***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

/// Mask any identifier, choosing the masking rule by its shape
pub fn mask_identifier(identifier: &str) -> String {
    if looks_like_email(identifier) {
        mask_email(identifier)
    } else if identifier.chars().any(|c| c.is_ascii_digit()) && super::phone::is_valid_phone(identifier) {
        mask_phone_number(identifier)
    } else {
        let first: String = identifier.chars().take(2).collect();
        format!("{}***", first)
    }
}
