//! Form validation
//!
//! - `rules`: field-level checks (blank, email shape, phone digits)
//! - `result`: per-field results, rejection errors, submit outcome
//! - `validator`: the submission gate and its deferred feedback

mod result;
mod rules;
mod validator;

pub use result::{SubmitOutcome, ValidationError, ValidationReason, ValidationResult};
pub use validator::{validate, FormValidator, Messages, ValidatorSettings};
