//! In-memory mail composer

use std::collections::HashMap;

use crate::domain::emails::{
    composer::hash_contents, Composer, EmailTemplate, Recipient, SendSource,
};

/// A self-contained [`Composer`] that holds the message state in memory.
///
/// This is the composer the platform attaches to a send that is assembled
/// in-process; it holds state only and leaves delivery to the transport
/// layer.
#[derive(Debug, Default)]
pub struct MessageComposer {
    /// Whether this send is a system notification
    pub internal_send: bool,

    /// Whether the transport is batching sends
    pub batch_mode: bool,

    /// The template the message is built from
    pub email: Option<EmailTemplate>,

    /// The HTML body
    pub body: String,

    /// The plain-text body
    pub plain_text: String,

    /// The message subject
    pub subject: String,

    /// The recipient the message is addressed to
    pub recipient: Option<Recipient>,

    /// The hash identifying the per-recipient tracking record
    pub id_hash: Option<String>,

    /// The entity that triggered the send
    pub source: Option<SendSource>,

    /// Tokens that apply to every send made through this composer
    pub global_tokens: HashMap<String, String>,

    /// Custom headers for the outgoing message
    pub custom_headers: HashMap<String, String>,
}

impl Composer for MessageComposer {
    fn is_internal_send(&self) -> bool {
        self.internal_send
    }

    fn in_batch_mode(&self) -> bool {
        self.batch_mode
    }

    fn email(&self) -> Option<EmailTemplate> {
        self.email.clone()
    }

    fn body(&self) -> String {
        self.body.clone()
    }

    fn set_body(&mut self, body: &str) {
        self.body = body.to_string();
    }

    fn plain_text(&self) -> String {
        self.plain_text.clone()
    }

    fn set_plain_text(&mut self, plain_text: &str) {
        self.plain_text = plain_text.to_string();
    }

    fn subject(&self) -> String {
        self.subject.clone()
    }

    fn set_subject(&mut self, subject: &str) {
        self.subject = subject.to_string();
    }

    fn recipient(&self) -> Option<Recipient> {
        self.recipient.clone()
    }

    fn id_hash(&self) -> Option<String> {
        self.id_hash.clone()
    }

    fn source(&self) -> Option<SendSource> {
        self.source.clone()
    }

    fn global_tokens(&self) -> HashMap<String, String> {
        self.global_tokens.clone()
    }

    fn add_custom_header(&mut self, name: &str, value: &str) {
        self.custom_headers
            .insert(name.to_string(), value.to_string());
    }

    fn custom_headers(&self) -> HashMap<String, String> {
        self.custom_headers.clone()
    }

    fn content_hash(&self) -> String {
        hash_contents(&self.body, &self.plain_text)
    }
}
