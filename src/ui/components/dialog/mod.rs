//! Dialog components for TUI

mod alert_dialog;
mod base;
mod success_overlay;

pub use alert_dialog::render_alert_dialog;
pub use success_overlay::render_success_overlay;
