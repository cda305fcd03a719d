//! Email send context

use std::collections::HashMap;
use std::fmt;

use crate::domain::emails::{
    composer::hash_contents, Clickthrough, Composer, EmailTemplate, Recipient, SendSource,
};

/// Options recognized when constructing an [`EmailSendContext`].
///
/// Any field left at its default falls back to the context's own default.
/// When the context is built around a composer, only `tokens` and
/// `internal_send` are consulted; the composer is the source of truth for
/// everything else.
#[derive(Debug, Default)]
pub struct SendOptions {
    /// The HTML content of the email
    pub content: Option<String>,

    /// The plain-text content of the email
    pub plain_text: Option<String>,

    /// The subject of the email; falls back to the template's stored subject
    pub subject: Option<String>,

    /// The template the email is built from
    pub email: Option<EmailTemplate>,

    /// The hash identifying the per-recipient tracking record
    pub id_hash: Option<String>,

    /// The recipient the email is addressed to
    pub recipient: Option<Recipient>,

    /// The entity or process that triggered the send
    pub source: Option<SendSource>,

    /// Initial placeholder tokens
    pub tokens: HashMap<String, String>,

    /// Whether this is a system notification rather than a tracked send;
    /// falls back to the composer's answer, then to false
    pub internal_send: Option<bool>,

    /// Initial custom headers
    pub custom_headers: HashMap<String, String>,
}

/// Content state for a context built without a composer
#[derive(Debug, Default)]
struct LocalContent {
    content: String,
    plain_text: String,
    subject: String,
    email: Option<EmailTemplate>,
    recipient: Option<Recipient>,
    id_hash: Option<String>,
    source: Option<SendSource>,
    custom_headers: HashMap<String, String>,
}

/// Where the content state lives, fixed at construction
enum Backing<'a> {
    /// Delegate every content read and write to the attached composer
    Composer(&'a mut dyn Composer),

    /// Self-contained; the context owns the content state
    Local(LocalContent),
}

/// The mutable state of one outgoing email as it passes through the dispatch
/// listener chain.
///
/// The dispatcher constructs the context immediately before invoking the
/// listeners, either around a borrowed [`Composer`] or from [`SendOptions`]
/// alone; listeners read and mutate the subject, bodies, tokens and headers;
/// the dispatcher reads the final state back to proceed with sending. The
/// context is owned exclusively for one sequential dispatch pass and is
/// discarded afterwards.
pub struct EmailSendContext<'a> {
    backing: Backing<'a>,
    tokens: HashMap<String, String>,
    internal_send: bool,
    dynamic_content_parsing: bool,
}

impl<'a> EmailSendContext<'a> {
    /// Create a self-contained context from the given options.
    ///
    /// When `subject` is not supplied but a template is, the subject falls
    /// back to the template's stored subject. `dynamic_content_parsing`
    /// marks a pass performed only to resolve dynamic-content tokens, not
    /// for delivery; it is fixed for the context's lifetime.
    pub fn new(options: SendOptions, dynamic_content_parsing: bool) -> Self {
        let subject = options
            .subject
            .or_else(|| options.email.as_ref().map(|e| e.subject().to_string()))
            .unwrap_or_default();

        let local = LocalContent {
            content: options.content.unwrap_or_default(),
            plain_text: options.plain_text.unwrap_or_default(),
            subject,
            email: options.email,
            recipient: options.recipient,
            id_hash: options.id_hash,
            source: options.source,
            custom_headers: options.custom_headers,
        };

        Self {
            backing: Backing::Local(local),
            tokens: options.tokens,
            internal_send: options.internal_send.unwrap_or(false),
            dynamic_content_parsing,
        }
    }

    /// Create a context that delegates content state to `composer`.
    ///
    /// Only `tokens` and `internal_send` are taken from the options; the
    /// content fields are discarded so the context and the composer cannot
    /// diverge. When the options leave `internal_send` unset, the composer
    /// is asked.
    pub fn with_composer(
        composer: &'a mut dyn Composer,
        options: SendOptions,
        dynamic_content_parsing: bool,
    ) -> Self {
        let internal_send = options
            .internal_send
            .unwrap_or_else(|| composer.is_internal_send());

        Self {
            backing: Backing::Composer(composer),
            tokens: options.tokens,
            internal_send,
            dynamic_content_parsing,
        }
    }

    /// Whether this send is a system notification rather than a message to
    /// the tracked recipient; internal sends carry no recipient tracking
    pub fn is_internal_send(&self) -> bool {
        self.internal_send
    }

    /// Whether the mailer is batching sends with token substitution deferred
    /// to the transport; always false without a composer
    pub fn in_batch_mode(&self) -> bool {
        match &self.backing {
            Backing::Composer(composer) => composer.in_batch_mode(),
            Backing::Local(_) => false,
        }
    }

    /// The template the email is built from, if any
    pub fn email_template(&self) -> Option<EmailTemplate> {
        match &self.backing {
            Backing::Composer(composer) => composer.email(),
            Backing::Local(local) => local.email.clone(),
        }
    }

    /// The HTML content, with placeholder tokens left in place
    pub fn content(&self) -> String {
        match &self.backing {
            Backing::Composer(composer) => composer.body(),
            Backing::Local(local) => local.content.clone(),
        }
    }

    /// The HTML content with every token replaced by its value.
    ///
    /// Each key of the merged token map (see [`tokens`](Self::tokens)) is
    /// treated as a literal substring and replaced in a single pass over the
    /// map; replaced values are not scanned again for further tokens.
    pub fn content_with_tokens(&self) -> String {
        let mut content = self.content();

        for (token, value) in self.tokens() {
            content = content.replace(&token, &value);
        }

        content
    }

    /// Replace the HTML content
    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();

        match &mut self.backing {
            Backing::Composer(composer) => composer.set_body(&content),
            Backing::Local(local) => local.content = content,
        }
    }

    /// The plain-text content
    pub fn plain_text(&self) -> String {
        match &self.backing {
            Backing::Composer(composer) => composer.plain_text(),
            Backing::Local(local) => local.plain_text.clone(),
        }
    }

    /// Replace the plain-text content
    pub fn set_plain_text(&mut self, plain_text: impl Into<String>) {
        let plain_text = plain_text.into();

        match &mut self.backing {
            Backing::Composer(composer) => composer.set_plain_text(&plain_text),
            Backing::Local(local) => local.plain_text = plain_text,
        }
    }

    /// The subject of the email
    pub fn subject(&self) -> String {
        match &self.backing {
            Backing::Composer(composer) => composer.subject(),
            Backing::Local(local) => local.subject.clone(),
        }
    }

    /// Replace the subject
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        let subject = subject.into();

        match &mut self.backing {
            Backing::Composer(composer) => composer.set_subject(&subject),
            Backing::Local(local) => local.subject = subject,
        }
    }

    /// The recipient the email is addressed to, if any
    pub fn recipient(&self) -> Option<Recipient> {
        match &self.backing {
            Backing::Composer(composer) => composer.recipient(),
            Backing::Local(local) => local.recipient.clone(),
        }
    }

    /// The hash identifying the per-recipient tracking record, if any
    pub fn id_hash(&self) -> Option<String> {
        match &self.backing {
            Backing::Composer(composer) => composer.id_hash(),
            Backing::Local(local) => local.id_hash.clone(),
        }
    }

    /// The entity or process that triggered the send, if any
    pub fn source(&self) -> Option<SendSource> {
        match &self.backing {
            Backing::Composer(composer) => composer.source(),
            Backing::Local(local) => local.source.clone(),
        }
    }

    /// Merge the given tokens into the context's token map; entries in the
    /// argument win on key collision
    pub fn add_tokens(&mut self, tokens: HashMap<String, String>) {
        self.tokens.extend(tokens);
    }

    /// Set a single token
    pub fn add_token(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.tokens.insert(token.into(), value.into());
    }

    /// The full token map: the composer's global tokens, when one is
    /// attached, overridden by the tokens added to this context
    pub fn tokens(&self) -> HashMap<String, String> {
        match &self.backing {
            Backing::Composer(composer) => {
                let mut tokens = composer.global_tokens();
                tokens.extend(self.tokens.clone());

                tokens
            }
            Backing::Local(_) => self.tokens.clone(),
        }
    }

    /// The tokens added to this context, without the composer's globals
    pub fn local_tokens(&self) -> &HashMap<String, String> {
        &self.tokens
    }

    /// Add a custom header to the outgoing email
    pub fn add_custom_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        match &mut self.backing {
            Backing::Composer(composer) => composer.add_custom_header(&name.into(), &value.into()),
            Backing::Local(local) => {
                local.custom_headers.insert(name.into(), value.into());
            }
        }
    }

    /// The custom headers added so far
    pub fn custom_headers(&self) -> HashMap<String, String> {
        match &self.backing {
            Backing::Composer(composer) => composer.custom_headers(),
            Backing::Local(local) => local.custom_headers.clone(),
        }
    }

    /// The attached composer, if any
    pub fn composer(&self) -> Option<&dyn Composer> {
        match &self.backing {
            Backing::Composer(composer) => Some(&**composer),
            Backing::Local(_) => None,
        }
    }

    /// The attached composer, if any, for mutation beyond the context's own
    /// surface
    pub fn composer_mut(&mut self) -> Option<&mut dyn Composer> {
        match &mut self.backing {
            Backing::Composer(composer) => Some(&mut **composer),
            Backing::Local(_) => None,
        }
    }

    /// Whether the listener rewriting links should append its own
    /// clickthrough, rather than leaving it to the centralized tracking pass
    /// that handles template-based sends.
    ///
    /// # Returns
    /// True only when the send is not internal and no template is attached.
    pub fn should_append_clickthrough(&self) -> bool {
        !self.is_internal_send() && self.email_template().is_none()
    }

    /// Build the clickthrough metadata for this send, used by listeners to
    /// tag outgoing links for click tracking
    pub fn clickthrough(&self) -> Clickthrough {
        Clickthrough {
            source: self.source(),
            email: self.email_template().map(|email| email.id()),
            stat: self.id_hash(),
            lead: self.recipient().map(|recipient| recipient.id),
        }
    }

    /// A digest of the current content, used by listeners to detect whether
    /// an earlier listener already changed the body
    pub fn content_hash(&self) -> String {
        match &self.backing {
            Backing::Composer(composer) => composer.content_hash(),
            Backing::Local(local) => hash_contents(&local.content, &local.plain_text),
        }
    }

    /// Whether this pass only resolves dynamic-content tokens and is not a
    /// delivery
    pub fn is_dynamic_content_parsing(&self) -> bool {
        self.dynamic_content_parsing
    }
}

impl fmt::Debug for EmailSendContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let backing = match &self.backing {
            Backing::Composer(_) => "Composer",
            Backing::Local(_) => "Local",
        };

        f.debug_struct("EmailSendContext")
            .field("backing", &backing)
            .field("tokens", &self.tokens)
            .field("internal_send", &self.internal_send)
            .field("dynamic_content_parsing", &self.dynamic_content_parsing)
            .finish()
    }
}
