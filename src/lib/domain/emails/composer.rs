//! Mail composer contract

use std::collections::HashMap;

use sha2::{Digest, Sha256};

#[cfg(test)]
use mockall::mock;

use crate::domain::emails::{EmailTemplate, Recipient, SendSource};

/// The object holding and building an outgoing email's content, subject and
/// metadata.
///
/// When a composer is attached to an [`EmailSendContext`], the context
/// forwards every content read and write to it; the composer is the single
/// source of truth for the message under construction. All capabilities are
/// plain in-memory reads and writes, so the contract is synchronous.
///
/// [`EmailSendContext`]: crate::domain::emails::EmailSendContext
pub trait Composer {
    /// Whether this send is a system notification rather than a message to
    /// the tracked recipient
    fn is_internal_send(&self) -> bool;

    /// Whether the mailer is batching sends with per-recipient token
    /// substitution deferred to the transport
    fn in_batch_mode(&self) -> bool;

    /// The template the message is built from, if any
    fn email(&self) -> Option<EmailTemplate>;

    /// The HTML body composed so far
    fn body(&self) -> String;

    /// Replace the HTML body
    fn set_body(&mut self, body: &str);

    /// The plain-text body composed so far
    fn plain_text(&self) -> String;

    /// Replace the plain-text body
    fn set_plain_text(&mut self, plain_text: &str);

    /// The message subject
    fn subject(&self) -> String;

    /// Replace the message subject
    fn set_subject(&mut self, subject: &str);

    /// The recipient the message is addressed to, if any
    fn recipient(&self) -> Option<Recipient>;

    /// The hash identifying the per-recipient tracking record, if any
    fn id_hash(&self) -> Option<String>;

    /// The entity that triggered the send, if any
    fn source(&self) -> Option<SendSource>;

    /// Tokens that apply to every send made through this composer
    fn global_tokens(&self) -> HashMap<String, String>;

    /// Add a custom header to the outgoing message
    fn add_custom_header(&mut self, name: &str, value: &str);

    /// The custom headers added so far
    fn custom_headers(&self) -> HashMap<String, String>;

    /// A digest of the composed content, used to detect changes made by
    /// earlier listeners
    fn content_hash(&self) -> String;
}

/// Digest of the composed bodies: SHA-256 over the HTML body concatenated
/// with the plain-text body, lower-hex encoded
pub(crate) fn hash_contents(body: &str, plain_text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    hasher.update(plain_text.as_bytes());

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mock! {
    pub Composer {}

    impl Composer for Composer {
        fn is_internal_send(&self) -> bool;
        fn in_batch_mode(&self) -> bool;
        fn email(&self) -> Option<EmailTemplate>;
        fn body(&self) -> String;
        fn set_body(&mut self, body: &str);
        fn plain_text(&self) -> String;
        fn set_plain_text(&mut self, plain_text: &str);
        fn subject(&self) -> String;
        fn set_subject(&mut self, subject: &str);
        fn recipient(&self) -> Option<Recipient>;
        fn id_hash(&self) -> Option<String>;
        fn source(&self) -> Option<SendSource>;
        fn global_tokens(&self) -> HashMap<String, String>;
        fn add_custom_header(&mut self, name: &str, value: &str);
        fn custom_headers(&self) -> HashMap<String, String>;
        fn content_hash(&self) -> String;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_contents_is_deterministic() {
        let first = hash_contents("<p>Hello</p>", "Hello");
        let second = hash_contents("<p>Hello</p>", "Hello");

        assert_eq!(first, second);
    }

    #[test]
    fn test_hash_contents_changes_with_either_input() {
        let original = hash_contents("<p>Hello</p>", "Hello");

        assert_ne!(original, hash_contents("<p>Goodbye</p>", "Hello"));
        assert_ne!(original, hash_contents("<p>Hello</p>", "Goodbye"));
    }
}
