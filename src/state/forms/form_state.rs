//! Form state and the built-in form layouts

use super::field::{FieldKind, FormField};
use serde::{Deserialize, Serialize};

/// A form hosted on the page: an ordered set of fields plus focus.
///
/// Focus indices run over the fields and then one extra slot for the
/// Submit button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub id: String,
    pub title: String,
    pub fields: Vec<FormField>,
    #[serde(skip)]
    pub active_field_index: usize,
}

impl Form {
    pub fn new(id: &str, title: &str, fields: Vec<FormField>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            fields,
            active_field_index: 0,
        }
    }

    /// The contact form: name, email, phone and a free-text message
    pub fn contact() -> Self {
        Self::new(
            "contact",
            "Contact",
            vec![
                FormField::text("name", "Name")
                    .required()
                    .with_placeholder("Full name"),
                FormField::email("email", "Email")
                    .required()
                    .with_placeholder("address@email.com"),
                FormField::tel("phone", "Phone")
                    .required()
                    .with_placeholder("07xx xxx xxx"),
                FormField::textarea("message", "Message")
                    .required()
                    .with_placeholder("Write us your message..."),
            ],
        )
    }

    /// The demo lesson booking form
    pub fn demo_lesson() -> Self {
        Self::new(
            "demo-lesson",
            "Demo lesson",
            vec![
                FormField::text("parent_name", "Parent name")
                    .required()
                    .with_placeholder("Full name"),
                FormField::email("parent_email", "Parent email")
                    .required()
                    .with_placeholder("address@email.com"),
                FormField::tel("parent_phone", "Parent phone")
                    .required()
                    .with_placeholder("07xx xxx xxx"),
                FormField::number("child_age", "Child age")
                    .required()
                    .with_placeholder("3-18"),
                FormField::select(
                    "course",
                    "Course",
                    &["Mental arithmetic", "Soroban", "Speed reading"],
                )
                .required(),
                FormField::select("location", "Location", &["Online", "Bucharest", "Cluj"])
                    .required(),
            ],
        )
    }

    /// Number of focus slots (fields + Submit button)
    pub fn field_count(&self) -> usize {
        self.fields.len() + 1
    }

    pub fn active_field(&self) -> usize {
        self.active_field_index
    }

    pub fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len());
    }

    pub fn next_field(&mut self) {
        let count = self.field_count();
        self.set_active_field((self.active_field_index + 1) % count);
    }

    pub fn prev_field(&mut self) {
        if self.active_field_index == 0 {
            self.set_active_field(self.field_count() - 1);
        } else {
            self.set_active_field(self.active_field_index - 1);
        }
    }

    /// Returns true if the Submit button is focused
    pub fn is_submit_active(&self) -> bool {
        self.active_field_index == self.fields.len()
    }

    pub fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }

    /// First field of the given kind, the way a page query returns the first match
    pub fn first_of_kind(&self, kind: &FieldKind) -> Option<usize> {
        self.fields.iter().position(|f| &f.kind == kind)
    }

    /// Empty every value. Highlights are left alone; focus returns to the top.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.active_field_index = 0;
    }
}
