//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// E.164: leading '+', country code without zero, at most 15 digits
static E164_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{6,14}$").unwrap());

// Local numbers without a country prefix
static LOCAL_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{7,15}$").unwrap());

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is valid (E.164 or a bare local number)
pub fn is_valid_phone(phone: &str) -> bool {
    if phone.chars().any(char::is_alphabetic) {
        return false;
    }
    let normalized = normalize_phone_number(phone);
    if normalized.is_empty() {
        return false;
    }
    E164_REGEX.is_match(&normalized) || LOCAL_PHONE_REGEX.is_match(&normalized)
}

/// Mask a phone number for display (e.g., +14****2671)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
