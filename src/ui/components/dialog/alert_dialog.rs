//! Blocking alert dialog

use super::base::{render_dialog, DialogConfig};
use crate::state::Alert;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render a warning raised by a rejected submission, centered on the screen
pub fn render_alert_dialog(frame: &mut Frame, alert: &Alert, title: &str, alert_color: Color) {
    let hint = vec![
        Span::raw("Press "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" or "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to dismiss"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title,
            title_color: alert_color,
            border_color: alert_color,
            message: &alert.message,
            hint: Some(hint),
            max_width: 60,
            ..Default::default()
        },
    );
}
