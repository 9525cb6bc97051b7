//! Field-level checks

use super::result::{ValidationReason, ValidationResult};
use crate::state::{FieldKind, FormField};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Number of digits a phone number must have once whitespace is stripped
pub const PHONE_DIGITS: usize = 10;

/// True when the value is empty after trimming whitespace
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `local@domain.tld` shape: no whitespace, exactly one `@`, a dot after it
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Exactly ten ASCII digits after all whitespace is removed
pub fn is_valid_phone(value: &str) -> bool {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    digits.chars().all(|c| c.is_ascii_digit()) && digits.len() == PHONE_DIGITS
}

/// Format check for typed fields; `None` for kinds without one
pub fn check_format(kind: &FieldKind, value: &str) -> Option<ValidationReason> {
    match kind {
        FieldKind::Email if !is_valid_email(value) => Some(ValidationReason::BadEmail),
        FieldKind::Tel if !is_valid_phone(value) => Some(ValidationReason::BadPhone),
        _ => None,
    }
}

/// Evaluate one field without touching it.
///
/// Emptiness wins over format. `format_checked` marks the field a submit
/// would format-check (the first email or phone of its form); such a field
/// is checked even when optional, so an empty optional email still fails.
pub fn check_field(field: &FormField, format_checked: bool) -> ValidationResult {
    if field.required && is_blank(&field.value) {
        return ValidationResult::invalid(&field.name, ValidationReason::Missing);
    }
    if !format_checked || !field.kind.is_typed() {
        return ValidationResult::valid(&field.name);
    }
    match check_format(&field.kind, &field.value) {
        Some(reason) => ValidationResult::invalid(&field.name, reason),
        None => ValidationResult::valid(&field.name),
    }
}
