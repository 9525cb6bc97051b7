//! Validation outcomes and errors

use std::fmt;
use thiserror::Error;

/// Why a field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    Missing,
    BadEmail,
    BadPhone,
}

impl ValidationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::BadEmail => "bad-email",
            Self::BadPhone => "bad-phone",
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub field: String,
    pub valid: bool,
    pub reason: Option<ValidationReason>,
}

impl ValidationResult {
    pub fn valid(field: &str) -> Self {
        Self {
            field: field.to_string(),
            valid: true,
            reason: None,
        }
    }

    pub fn invalid(field: &str, reason: ValidationReason) -> Self {
        Self {
            field: field.to_string(),
            valid: false,
            reason: Some(reason),
        }
    }
}

/// A rejected submission. Every variant is recovered locally with a
/// highlight and an alert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required fields left empty: {}", fields.join(", "))]
    MissingRequiredField { fields: Vec<String> },
    #[error("field `{field}` is not a valid email address")]
    InvalidEmailFormat { field: String },
    #[error("field `{field}` is not a 10 digit phone number")]
    InvalidPhoneFormat { field: String },
}

impl ValidationError {
    pub fn reason(&self) -> ValidationReason {
        match self {
            Self::MissingRequiredField { .. } => ValidationReason::Missing,
            Self::InvalidEmailFormat { .. } => ValidationReason::BadEmail,
            Self::InvalidPhoneFormat { .. } => ValidationReason::BadPhone,
        }
    }
}

/// What happened to a submission
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum SubmitOutcome {
    Accepted,
    Rejected(ValidationError),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}
