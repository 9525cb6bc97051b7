//! Success confirmation overlay

use super::base::{render_dialog, DialogConfig};
use crate::config::Theme;
use crate::state::SuccessOverlay;
use ratatui::{style::Color, Frame};
use std::time::Instant;

/// Render the overlay, dimmed according to its fade progress
pub fn render_success_overlay(
    frame: &mut Frame,
    overlay: &SuccessOverlay,
    theme: &Theme,
    now: Instant,
) {
    let opacity = overlay.opacity(now);
    if opacity <= 0.0 {
        return;
    }

    let title = format!("✔ {}", overlay.title);
    render_dialog(
        frame,
        DialogConfig {
            title: &title,
            title_color: fade_color(Color::White, opacity),
            border_color: fade_color(theme.border_accent, opacity),
            background: fade_color(theme.success, opacity),
            text_color: fade_color(Color::White, opacity),
            message: &overlay.body,
            hint: None,
            max_width: 56,
        },
    );
}

/// Scale a color toward black. Terminals without true color get a
/// two-step fade instead.
fn fade_color(color: Color, opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    let scale = |channel: u8| (channel as f32 * opacity).round() as u8;
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(scale(r), scale(g), scale(b)),
        Color::White => {
            let v = scale(255);
            Color::Rgb(v, v, v)
        }
        other if opacity >= 0.5 => other,
        _ => Color::DarkGray,
    }
}
