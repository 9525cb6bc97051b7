//! Form domain layer
//!
//! Forms are plain data: the validator receives a `&mut Form` and never
//! looks fields up anywhere else.

mod field;
mod form_state;

pub use field::{FieldKind, FormField};
pub use form_state::Form;
