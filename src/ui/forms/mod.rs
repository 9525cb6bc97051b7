//! Form rendering module
//!
//! - `field_renderer`: single field boxes with focus and highlight styling
//! - `form_view`: a whole form with its Submit button and status line

mod field_renderer;
mod form_view;

pub use form_view::draw_form;
