//! Recipient record

use uuid::Uuid;

use crate::domain::emails::EmailAddress;

/// The tracked contact an email is addressed to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipient {
    /// The recipient's ID
    pub id: Uuid,

    /// The recipient's email address, when known
    pub email: Option<EmailAddress>,
}

impl Recipient {
    /// Create a recipient with no known address
    pub fn new(id: Uuid) -> Self {
        Self { id, email: None }
    }

    /// Create a recipient with a known address
    pub fn with_email(id: Uuid, email: EmailAddress) -> Self {
        Self {
            id,
            email: Some(email),
        }
    }
}
