//! Modal alert queue backing the terminal notifier

use crate::notifier::Notifier;
use std::collections::VecDeque;

/// A warning waiting to be acknowledged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    /// Form that raised it, when known
    pub form_id: Option<String>,
}

/// Warnings queue up as modal dialogs; info lands in the status line
#[derive(Debug, Default)]
pub struct AlertQueue {
    pending: VecDeque<Alert>,
    /// Latest informational message, shown in the status bar
    pub status_message: Option<String>,
    /// Form currently being submitted, stamped onto raised alerts
    source: Option<String>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The alert currently shown, if any
    pub fn current(&self) -> Option<&Alert> {
        self.pending.front()
    }

    /// Whether a modal alert is blocking input
    pub fn is_blocking(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Acknowledge the current alert
    pub fn dismiss(&mut self) -> Option<Alert> {
        self.pending.pop_front()
    }

    /// Attribute subsequent alerts to a form
    pub fn set_source(&mut self, form_id: Option<&str>) {
        self.source = form_id.map(str::to_string);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}

impl Notifier for AlertQueue {
    fn warn(&mut self, message: &str) {
        tracing::debug!("Alert raised: {message}");
        self.pending.push_back(Alert {
            message: message.to_string(),
            form_id: self.source.clone(),
        });
    }

    fn info(&mut self, message: &str) {
        tracing::debug!("Info: {message}");
        self.status_message = Some(message.to_string());
    }
}
