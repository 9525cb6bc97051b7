//! Submission gate: validates a form, flags fields, and drives feedback

use super::result::{SubmitOutcome, ValidationError, ValidationReason, ValidationResult};
use super::rules;
use crate::notifier::Notifier;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::state::{FieldKind, Form, OverlayTiming, SuccessOverlay};
use chrono::Local;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// User-facing texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub missing_required: String,
    pub invalid_email: String,
    pub invalid_phone: String,
    pub success_title: String,
    pub success_body: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            missing_required: "Please fill in all required fields".to_string(),
            invalid_email: "Please enter a valid email address".to_string(),
            invalid_phone: "Please enter a valid phone number (10 digits)".to_string(),
            success_title: "Thank you!".to_string(),
            success_body: "Your message was sent successfully. We will contact you shortly!"
                .to_string(),
        }
    }
}

/// Everything the validator needs to know up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorSettings {
    pub messages: Messages,
    /// How long a missing-field highlight stays before clearing itself
    pub highlight_clear: Duration,
    pub overlay: OverlayTiming,
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        Self {
            messages: Messages::default(),
            highlight_clear: Duration::from_millis(3000),
            overlay: OverlayTiming::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FieldKey {
    form_id: String,
    field: usize,
}

impl FieldKey {
    fn new(form_id: &str, field: usize) -> Self {
        Self {
            form_id: form_id.to_string(),
            field,
        }
    }
}

#[derive(Debug)]
enum DeferredTask {
    ClearHighlight(FieldKey),
    FadeOverlay,
    RemoveOverlay,
}

/// Evaluate every field of a form without side effects.
///
/// Applies the same checks as [`FormValidator::handle_submit`]: only the
/// first email and first phone field get a format check.
pub fn validate(form: &Form) -> Vec<ValidationResult> {
    let first_email = form.first_of_kind(&FieldKind::Email);
    let first_tel = form.first_of_kind(&FieldKind::Tel);
    form.fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let format_checked = Some(index) == first_email || Some(index) == first_tel;
            rules::check_field(field, format_checked)
        })
        .collect()
}

/// Gates submissions of whatever form it is handed.
///
/// Owns the deferred work it creates (highlight clears, overlay fade and
/// removal) and the overlay itself. The host calls [`FormValidator::tick`]
/// from its event loop to run due tasks.
#[derive(Debug)]
pub struct FormValidator {
    settings: ValidatorSettings,
    scheduler: Scheduler<DeferredTask>,
    highlight_timers: HashMap<FieldKey, TaskHandle>,
    overlay: Option<SuccessOverlay>,
    overlay_timers: Vec<TaskHandle>,
}

impl FormValidator {
    pub fn new(settings: ValidatorSettings) -> Self {
        Self {
            settings,
            scheduler: Scheduler::new(),
            highlight_timers: HashMap::new(),
            overlay: None,
            overlay_timers: Vec::new(),
        }
    }

    /// Validate and act on a submission of `form`.
    ///
    /// Nothing is ever sent anywhere. Required fields are all checked and
    /// flagged together; the first email and first phone field are then
    /// checked in that order, stopping at the first failure. Exactly one
    /// warning is raised per rejected submission.
    pub fn handle_submit(
        &mut self,
        form: &mut Form,
        notifier: &mut dyn Notifier,
        now: Instant,
    ) -> SubmitOutcome {
        let submission = Uuid::new_v4();
        let span = tracing::info_span!("submit", form = %form.id, %submission);
        let _guard = span.enter();
        tracing::debug!("Default submission prevented");

        self.cancel_stale_highlights(form);

        let mut missing = Vec::new();
        for (index, field) in form.fields.iter_mut().enumerate() {
            if field.required && rules::is_blank(&field.value) {
                field.highlight = Some(ValidationReason::Missing);
                missing.push(field.name.clone());

                let key = FieldKey::new(&form.id, index);
                let handle = self.scheduler.schedule_after(
                    now,
                    self.settings.highlight_clear,
                    DeferredTask::ClearHighlight(key.clone()),
                );
                self.highlight_timers.insert(key, handle);
            }
        }

        if !missing.is_empty() {
            notifier.warn(&self.settings.messages.missing_required);
            return Self::reject(ValidationError::MissingRequiredField { fields: missing });
        }

        if let Some(index) = form.first_of_kind(&FieldKind::Email) {
            let field = &mut form.fields[index];
            if !rules::is_valid_email(&field.value) {
                field.highlight = Some(ValidationReason::BadEmail);
                notifier.warn(&self.settings.messages.invalid_email);
                return Self::reject(ValidationError::InvalidEmailFormat {
                    field: field.name.clone(),
                });
            }
        }

        if let Some(index) = form.first_of_kind(&FieldKind::Tel) {
            let field = &mut form.fields[index];
            if !rules::is_valid_phone(&field.value) {
                field.highlight = Some(ValidationReason::BadPhone);
                notifier.warn(&self.settings.messages.invalid_phone);
                return Self::reject(ValidationError::InvalidPhoneFormat {
                    field: field.name.clone(),
                });
            }
        }

        tracing::info!(
            submitted_at = %Local::now().to_rfc3339(),
            "Submission accepted"
        );
        self.show_success_message(notifier, now);
        form.reset();
        for field in &mut form.fields {
            field.highlight = None;
        }
        SubmitOutcome::Accepted
    }

    fn reject(error: ValidationError) -> SubmitOutcome {
        tracing::warn!("Submission rejected: {error}");
        SubmitOutcome::Rejected(error)
    }

    /// Drop pending auto-clears left over from an earlier attempt on this
    /// form, along with the flags they were going to clear. The new attempt
    /// decides what is flagged.
    fn cancel_stale_highlights(&mut self, form: &mut Form) {
        let stale: Vec<FieldKey> = self
            .highlight_timers
            .keys()
            .filter(|key| key.form_id == form.id)
            .cloned()
            .collect();

        for key in stale {
            if let Some(handle) = self.highlight_timers.remove(&key) {
                self.scheduler.cancel(handle);
            }
            if let Some(field) = form.fields.get_mut(key.field) {
                field.highlight = None;
            }
        }
    }

    /// Remove a field's flag right away; called whenever the user edits it
    pub fn clear_field_highlight(&mut self, form: &mut Form, field_index: usize) {
        let Some(field) = form.fields.get_mut(field_index) else {
            return;
        };
        field.highlight = None;

        if let Some(handle) = self
            .highlight_timers
            .remove(&FieldKey::new(&form.id, field_index))
        {
            self.scheduler.cancel(handle);
        }
    }

    /// Put up the success overlay and schedule its fade and removal.
    ///
    /// A visible overlay is replaced rather than stacked: its pending fade
    /// and removal are cancelled and the new one gets a full lifetime.
    pub fn show_success_message(&mut self, notifier: &mut dyn Notifier, now: Instant) {
        if self.overlay.take().is_some() {
            tracing::debug!("Replacing visible success overlay");
            for handle in self.overlay_timers.drain(..) {
                self.scheduler.cancel(handle);
            }
        }

        let messages = &self.settings.messages;
        let overlay = SuccessOverlay::new(
            now,
            self.settings.overlay,
            &messages.success_title,
            &messages.success_body,
        );

        self.overlay_timers.push(
            self.scheduler
                .schedule_at(overlay.fade_at(), DeferredTask::FadeOverlay),
        );
        self.overlay_timers.push(
            self.scheduler
                .schedule_at(overlay.remove_at(), DeferredTask::RemoveOverlay),
        );
        self.overlay = Some(overlay);

        notifier.info(&messages.success_body);
    }

    /// Run every deferred task due at `now`. Returns how many ran.
    pub fn tick(&mut self, forms: &mut [Form], now: Instant) -> usize {
        let due = self.scheduler.take_due(now);
        let count = due.len();

        for task in due {
            match task {
                DeferredTask::ClearHighlight(key) => {
                    self.highlight_timers.remove(&key);
                    if let Some(field) = forms
                        .iter_mut()
                        .find(|f| f.id == key.form_id)
                        .and_then(|f| f.fields.get_mut(key.field))
                    {
                        field.highlight = None;
                    }
                }
                DeferredTask::FadeOverlay => {
                    if let Some(overlay) = self.overlay.as_mut() {
                        overlay.begin_fade();
                    }
                }
                DeferredTask::RemoveOverlay => {
                    if let Some(mut overlay) = self.overlay.take() {
                        overlay.remove();
                        tracing::debug!("Success overlay removed");
                    }
                    self.overlay_timers.clear();
                }
            }
        }

        count
    }

    /// The overlay currently on the page
    pub fn overlay(&self) -> Option<&SuccessOverlay> {
        self.overlay.as_ref()
    }

    /// Earliest instant at which [`FormValidator::tick`] has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    #[cfg(test)]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }
}

impl Default for FormValidator {
    fn default() -> Self {
        Self::new(ValidatorSettings::default())
    }
}
