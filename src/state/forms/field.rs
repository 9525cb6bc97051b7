//! Form field value objects

use crate::validation::ValidationReason;
use serde::{Deserialize, Serialize};

/// Semantic type of a field, mirroring the input types a page can carry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
    Number,
    Textarea,
    Select {
        options: Vec<String>,
    },
}

impl FieldKind {
    /// Typed fields get a format check on top of the emptiness check
    pub fn is_typed(&self) -> bool {
        matches!(self, FieldKind::Email | FieldKind::Tel)
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, FieldKind::Textarea)
    }

    /// Whether a typed character is allowed into a field of this kind
    pub fn accepts(&self, c: char) -> bool {
        match self {
            FieldKind::Number => c.is_ascii_digit(),
            FieldKind::Tel => c.is_ascii_digit() || matches!(c, ' ' | '+' | '-'),
            FieldKind::Select { .. } => false,
            FieldKind::Text | FieldKind::Email | FieldKind::Textarea => !c.is_control(),
        }
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip)]
    pub value: String,
    /// Why the field is currently flagged, if it is
    #[serde(skip)]
    pub highlight: Option<ValidationReason>,
}

impl FormField {
    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            placeholder: None,
            value: String::new(),
            highlight: None,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn email(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn tel(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Tel)
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn textarea(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Textarea)
    }

    pub fn select(name: &str, label: &str, options: &[&str]) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Select {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        )
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    #[cfg(test)]
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight.is_some()
    }

    /// Push a character to the field value, ignoring characters the kind rejects.
    /// Returns true when the value changed.
    pub fn push_char(&mut self, c: char) -> bool {
        if self.kind.accepts(c) {
            self.value.push(c);
            true
        } else {
            false
        }
    }

    /// Push pasted text, keeping only accepted characters
    pub fn push_str(&mut self, text: &str) -> bool {
        let before = self.value.len();
        for c in text.chars() {
            if c == '\n' && self.kind.is_multiline() {
                self.value.push(c);
            } else if self.kind.accepts(c) {
                self.value.push(c);
            }
        }
        self.value.len() != before
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) -> bool {
        if matches!(self.kind, FieldKind::Select { .. }) {
            // Selects are cleared back to the empty choice instead
            let had_value = !self.value.is_empty();
            self.value.clear();
            return had_value;
        }
        self.value.pop().is_some()
    }

    /// Cycle through select options; the empty choice sits before the first option.
    /// Returns false for non-select fields.
    pub fn cycle_option(&mut self, forward: bool) -> bool {
        let FieldKind::Select { options } = &self.kind else {
            return false;
        };
        if options.is_empty() {
            return false;
        }
        // Position 0 is the empty choice, option i is at i + 1
        let slots = options.len() + 1;
        let current = options
            .iter()
            .position(|o| *o == self.value)
            .map(|i| i + 1)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        self.value = if next == 0 {
            String::new()
        } else {
            options[next - 1].clone()
        };
        true
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.kind {
            FieldKind::Select { .. } if self.value.is_empty() => "‹ choose ›".to_string(),
            FieldKind::Select { .. } => format!("‹ {} ›", self.value),
            _ => self.value.clone(),
        }
    }
}
