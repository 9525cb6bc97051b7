//! Application state and core logic

use crate::config::{FormguardConfig, Theme};
use crate::platform::{PASTE_MODIFIER, SUBMIT_MODIFIER};
use crate::state::{AlertQueue, Form, FormField};
use crate::validation::{FormValidator, SubmitOutcome, ValidationError};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

/// Poll interval while something is animating (~60fps)
const ANIMATION_POLL: Duration = Duration::from_millis(16);
/// Longest the loop sleeps waiting for input
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Main application struct
pub struct App {
    /// Forms on the page, shown as tabs
    pub forms: Vec<Form>,
    /// Index of the visible form
    pub active_form: usize,
    /// Submission gate shared by every form
    pub validator: FormValidator,
    /// Modal alerts and the status line
    pub alerts: AlertQueue,
    pub theme: Theme,
    /// Clock reading of the last tick, used for animation
    pub now: Instant,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &FormguardConfig) -> Self {
        Self {
            forms: config.forms(),
            active_form: 0,
            validator: FormValidator::new(config.validator_settings()),
            alerts: AlertQueue::new(),
            theme: config.theme(),
            now: Instant::now(),
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn active_form(&self) -> &Form {
        &self.forms[self.active_form]
    }

    /// Advance the clock and run due deferred work
    pub fn tick(&mut self, now: Instant) {
        self.now = now;
        let ran = self.validator.tick(&mut self.forms, now);
        if ran > 0 {
            tracing::trace!("Ran {ran} deferred task(s)");
        }
    }

    /// How long the event loop may wait for input before the next tick
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        if self.validator.overlay().is_some_and(|o| o.opacity(now) < 1.0) {
            return ANIMATION_POLL;
        }
        match self.validator.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    /// Title shown on the current alert
    pub fn alert_title(&self) -> &str {
        self.alerts
            .current()
            .and_then(|alert| alert.form_id.as_deref())
            .and_then(|id| self.forms.iter().find(|f| f.id == id))
            .map(|f| f.title.as_str())
            .unwrap_or("Notice")
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return Ok(());
        }

        // A raised alert blocks the page until acknowledged
        if self.alerts.is_blocking() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alerts.dismiss();
            }
            return Ok(());
        }

        let on_submit = self.active_form().is_submit_active();

        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(SUBMIT_MODIFIER) => {
                self.submit_active_form();
            }
            KeyCode::Char('v') if key.modifiers.contains(PASTE_MODIFIER) => {
                self.paste_clipboard().await;
            }
            KeyCode::PageDown => self.switch_form(true),
            KeyCode::PageUp => self.switch_form(false),
            KeyCode::Tab | KeyCode::Down => self.forms[self.active_form].next_field(),
            KeyCode::BackTab | KeyCode::Up => self.forms[self.active_form].prev_field(),
            KeyCode::Enter if on_submit => self.submit_active_form(),
            KeyCode::Enter => {
                let multiline = self.forms[self.active_form]
                    .get_active_field_mut()
                    .is_some_and(|f| f.kind.is_multiline());
                if multiline {
                    self.edit_active_field(|f| f.push_str("\n"));
                } else {
                    self.forms[self.active_form].next_field();
                }
            }
            KeyCode::Left if !on_submit => {
                self.edit_active_field(|f| f.cycle_option(false));
            }
            KeyCode::Right if !on_submit => {
                self.edit_active_field(|f| f.cycle_option(true));
            }
            KeyCode::Backspace if !on_submit => {
                self.edit_active_field(FormField::pop_char);
            }
            KeyCode::Char(c)
                if !on_submit
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.edit_active_field(|f| f.push_char(c));
            }
            _ => {}
        }
        Ok(())
    }

    fn switch_form(&mut self, forward: bool) {
        let count = self.forms.len();
        self.active_form = if forward {
            (self.active_form + 1) % count
        } else {
            (self.active_form + count - 1) % count
        };
    }

    /// Apply an edit to the focused field; any change clears its highlight
    fn edit_active_field(&mut self, edit: impl FnOnce(&mut FormField) -> bool) {
        let form = &mut self.forms[self.active_form];
        let index = form.active_field();
        let changed = form.get_active_field_mut().map(edit).unwrap_or(false);
        if changed {
            self.validator.clear_field_highlight(form, index);
        }
    }

    /// Run the validator on the visible form
    fn submit_active_form(&mut self) {
        let now = Instant::now();
        self.now = now;

        let form = &mut self.forms[self.active_form];
        self.alerts.set_source(Some(&form.id));
        let outcome = self.validator.handle_submit(form, &mut self.alerts, now);
        self.alerts.set_source(None);

        tracing::debug!(accepted = outcome.is_accepted(), "Submit handled");
        if let SubmitOutcome::Rejected(error) = &outcome {
            focus_flagged_field(form, error);
        }
    }

    /// Paste clipboard text into the focused field
    async fn paste_clipboard(&mut self) {
        let result = tokio::task::spawn_blocking(|| -> Result<String> {
            use arboard::Clipboard;
            let mut clipboard = Clipboard::new()?;
            Ok(clipboard.get_text()?)
        })
        .await;

        match result {
            Ok(Ok(text)) => self.edit_active_field(|f| f.push_str(&text)),
            Ok(Err(err)) => {
                tracing::warn!("Clipboard read failed: {err:#}");
                self.alerts.set_status("Clipboard unavailable");
            }
            Err(err) => {
                tracing::warn!("Clipboard task failed: {err}");
                self.alerts.set_status("Clipboard unavailable");
            }
        }
    }
}

/// Put the cursor on the first field flagged by a rejection
fn focus_flagged_field(form: &mut Form, error: &ValidationError) {
    let reason = error.reason();
    if let Some(index) = form.fields.iter().position(|f| f.highlight == Some(reason)) {
        form.set_active_field(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationReason;
    use pretty_assertions::assert_eq;
    use tokio_test::block_on;

    fn app() -> App {
        App::new(&FormguardConfig::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        block_on(app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    fn press_ctrl(app: &mut App, c: char) {
        block_on(app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn fill_contact(app: &mut App, email: &str, phone: &str) {
        type_text(app, "Ana Pop");
        press(app, KeyCode::Tab);
        type_text(app, email);
        press(app, KeyCode::Tab);
        type_text(app, phone);
        press(app, KeyCode::Tab);
        type_text(app, "Hello");
    }

    #[test]
    fn test_starts_on_first_form() {
        let app = app();
        assert_eq!(app.active_form().id, "contact");
        assert!(!app.should_quit());
        assert!(!app.alerts.is_blocking());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        press_ctrl(&mut app, 'c');
        assert!(app.should_quit());
    }

    #[test]
    fn test_typing_fills_active_field() {
        let mut app = app();
        type_text(&mut app, "Ana");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.active_form().fields[0].value, "An");
    }

    #[test]
    fn test_page_keys_switch_forms() {
        let mut app = app();
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.active_form().id, "demo-lesson");
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.active_form().id, "contact");
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.active_form().id, "demo-lesson");
    }

    #[test]
    fn test_empty_submit_raises_blocking_alert() {
        let mut app = app();
        press_ctrl(&mut app, 's');

        assert!(app.alerts.is_blocking());
        assert_eq!(
            app.alerts.current().unwrap().message,
            "Please fill in all required fields"
        );
        assert_eq!(app.alert_title(), "Contact");

        // Input is swallowed until the alert is dismissed
        type_text(&mut app, "x");
        assert!(app.active_form().fields[0].value.is_empty());

        press(&mut app, KeyCode::Enter);
        assert!(!app.alerts.is_blocking());
    }

    #[test]
    fn test_rejection_focuses_first_flagged_field() {
        let mut app = app();
        fill_contact(&mut app, "bad-email", "0712345678");
        press_ctrl(&mut app, 's');

        assert_eq!(app.active_form().active_field(), 1);
        assert_eq!(
            app.active_form().fields[1].highlight,
            Some(ValidationReason::BadEmail)
        );
    }

    #[test]
    fn test_typing_after_failure_clears_highlight() {
        let mut app = app();
        press_ctrl(&mut app, 's');
        press(&mut app, KeyCode::Esc);

        assert!(app.active_form().fields[0].is_highlighted());
        type_text(&mut app, "A");
        assert!(!app.active_form().fields[0].is_highlighted());
        assert!(app.active_form().fields[1].is_highlighted());
    }

    #[test]
    fn test_rejected_key_does_not_clear_highlight() {
        let mut app = app();
        press_ctrl(&mut app, 's');
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);

        // Letters are not accepted by a phone field
        type_text(&mut app, "x");
        assert!(app.active_form().fields[2].is_highlighted());
    }

    #[test]
    fn test_successful_submit_resets_and_overlay_expires() {
        let mut app = app();
        fill_contact(&mut app, "user@example.com", "123 456 7890");
        press(&mut app, KeyCode::Tab);
        assert!(app.active_form().is_submit_active());
        press(&mut app, KeyCode::Enter);

        assert!(!app.alerts.is_blocking());
        assert!(app.active_form().fields.iter().all(|f| f.value.is_empty()));
        assert!(app.validator.overlay().is_some());
        assert_eq!(
            app.alerts.status_message.as_deref(),
            Some("Your message was sent successfully. We will contact you shortly!")
        );

        let shown_at = app.validator.overlay().unwrap().shown_at;
        app.tick(shown_at + Duration::from_millis(3300));
        assert!(app.validator.overlay().is_none());
    }

    #[test]
    fn test_missing_highlights_clear_on_tick() {
        let mut app = app();
        press_ctrl(&mut app, 's');
        let later = Instant::now() + Duration::from_millis(3000);
        app.tick(later);
        assert!(app.active_form().fields.iter().all(|f| !f.is_highlighted()));
    }

    #[test]
    fn test_enter_in_textarea_adds_newline() {
        let mut app = app();
        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        type_text(&mut app, "a");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "b");
        assert_eq!(app.active_form().fields[3].value, "a\nb");
    }

    #[test]
    fn test_enter_on_single_line_advances() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.active_form().active_field(), 1);
    }

    #[test]
    fn test_arrows_cycle_select_options() {
        let mut app = app();
        press(&mut app, KeyCode::PageDown);
        for _ in 0..4 {
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Right);
        assert_eq!(app.active_form().fields[4].value, "Mental arithmetic");
        press(&mut app, KeyCode::Left);
        assert_eq!(app.active_form().fields[4].value, "");
    }

    #[test]
    fn test_poll_timeout_idle() {
        let app = app();
        assert_eq!(app.poll_timeout(Instant::now()), IDLE_POLL);
    }

    #[test]
    fn test_poll_timeout_waits_for_deadline_then_animates() {
        let mut app = app();
        fill_contact(&mut app, "user@example.com", "0712345678");
        press_ctrl(&mut app, 's');
        let overlay = app.validator.overlay().unwrap().clone();

        assert_eq!(
            app.poll_timeout(overlay.fade_at() - Duration::from_millis(40)),
            Duration::from_millis(40)
        );

        app.tick(overlay.fade_at());
        assert_eq!(
            app.poll_timeout(overlay.fade_at() + Duration::from_millis(10)),
            ANIMATION_POLL
        );
    }
}
