//! Email template entity

use uuid::Uuid;

/// A stored email template: the entity a tracked send is built from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailTemplate {
    id: Uuid,
    subject: String,
}

impl EmailTemplate {
    /// Create a new email template
    pub fn new(id: Uuid, subject: impl Into<String>) -> Self {
        Self {
            id,
            subject: subject.into(),
        }
    }

    /// The template's ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The subject stored on the template
    pub fn subject(&self) -> &str {
        &self.subject
    }
}
