//! Whole-form rendering

use super::field_renderer::draw_field;
use crate::config::Theme;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{Form, FormField};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use crate::validation::{validate, ValidationResult};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows a field box takes
fn field_height(field: &FormField) -> u16 {
    if field.kind.is_multiline() {
        6
    } else {
        3
    }
}

/// Draw a form: its fields top to bottom, the Submit button and a one-line
/// readiness summary
pub fn draw_form(frame: &mut Frame, area: Rect, form: &Form, theme: &Theme) {
    let block = Block::default()
        .title(format!(" {} ", form.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = form
        .fields
        .iter()
        .map(|f| Constraint::Length(field_height(f)))
        .collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT)); // Submit
    constraints.push(Constraint::Length(1)); // Summary
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    for (index, field) in form.fields.iter().enumerate() {
        draw_field(
            frame,
            chunks[index],
            field,
            form.active_field() == index,
            theme,
        );
    }

    let button_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(0)])
        .split(chunks[form.fields.len()]);
    render_button(
        frame,
        button_row[0],
        "Submit",
        form.is_submit_active(),
        theme.accent,
    );

    draw_summary(frame, chunks[form.fields.len() + 1], form, theme);
}

fn draw_summary(frame: &mut Frame, area: Rect, form: &Form, theme: &Theme) {
    let results: Vec<ValidationResult> = validate(form);
    let pending = results.iter().filter(|r| !r.valid).count();
    let line = if pending == 0 {
        Line::from(Span::styled(
            format!(" Ready to send ({SUBMIT_SHORTCUT})"),
            Style::default().fg(theme.success),
        ))
    } else {
        Line::from(Span::styled(
            format!(" {pending} field(s) still need attention"),
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}
