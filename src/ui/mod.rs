//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use components::{render_alert_dialog, render_success_overlay};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (tabs_area, form_area, status_area) = layout::create_layout(frame.area());

    layout::draw_tabs(frame, tabs_area, app);
    forms::draw_form(frame, form_area, app.active_form(), &app.theme);
    layout::draw_status_bar(frame, status_area, app);

    // Overlays stack above the page; a blocking alert sits on top
    if let Some(overlay) = app.validator.overlay() {
        render_success_overlay(frame, overlay, &app.theme, app.now);
    }
    if let Some(alert) = app.alerts.current() {
        render_alert_dialog(frame, alert, app.alert_title(), app.theme.alert);
    }
}
