//! Email and phone number checks used by the contact forms.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

/// Vietnamese mobile numbers: `+84`, `84` or `0`, a carrier digit, then 8 digits.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+84|84|0)(3|5|7|8|9)[0-9]{8}$").expect("phone regex is valid"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Whitespace is ignored, so `090 123 4567` passes.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_REGEX.is_match(&compact)
}
