//! Field rendering utilities for forms

use crate::config::Theme;
use crate::state::{FieldKind, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw a form field. A flagged field gets the alert border whether or not
/// it has focus.
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool, theme: &Theme) {
    let style = if is_active {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(Color::Gray)
    };

    let border_style = match (field.highlight, is_active) {
        (Some(_), _) => Style::default()
            .fg(theme.alert)
            .add_modifier(Modifier::BOLD),
        (None, true) => Style::default().fg(theme.accent),
        (None, false) => Style::default().fg(Color::DarkGray),
    };

    let display_value = field.display_value();
    let show_placeholder = field.value.is_empty() && !is_active;
    let (display_str, value_style) = match (&field.placeholder, show_placeholder) {
        (Some(placeholder), true) => (placeholder.clone(), Style::default().fg(Color::DarkGray)),
        (None, true) if !matches!(field.kind, FieldKind::Select { .. }) => {
            ("(empty)".to_string(), Style::default().fg(Color::DarkGray))
        }
        _ => (display_value, style),
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = if field.kind.is_multiline() {
        let mut lines: Vec<Line> = display_str
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), value_style)))
            .collect();
        if is_active {
            if display_str.ends_with('\n') || lines.is_empty() {
                lines.push(Line::from(Span::styled(
                    cursor,
                    Style::default().fg(theme.accent),
                )));
            } else if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(theme.accent)));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_str, value_style),
            Span::styled(cursor, Style::default().fg(theme.accent)),
        ]))
    };

    let marker = if field.required { " *" } else { "" };
    let mut title = vec![Span::raw(format!(" {}{marker} ", field.label))];
    if let Some(reason) = field.highlight {
        title.push(Span::styled(
            format!("[{reason}] "),
            Style::default().fg(theme.alert),
        ));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}
