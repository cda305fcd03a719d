//! Clickthrough metadata for tracked links

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::domain::emails::SendSource;

/// Errors that can occur when decoding a clickthrough value from a tracked
/// link
#[derive(Debug, Error)]
pub enum ClickthroughError {
    /// The value is not valid base64
    #[error("clickthrough value is not valid base64")]
    InvalidEncoding,

    /// The decoded payload is malformed
    #[error("clickthrough payload is malformed")]
    InvalidPayload,

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}

impl From<base64::DecodeError> for ClickthroughError {
    fn from(_err: base64::DecodeError) -> Self {
        debug!("base64::DecodeError -> ClickthroughError");

        ClickthroughError::InvalidEncoding
    }
}

impl From<serde_json::Error> for ClickthroughError {
    fn from(_err: serde_json::Error) -> Self {
        debug!("serde_json::Error -> ClickthroughError");

        ClickthroughError::InvalidPayload
    }
}

/// Metadata attached to the links of an outgoing email so later click events
/// can be attributed back to the send
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Clickthrough {
    /// The entity that triggered the send
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SendSource>,

    /// The template the email was built from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Uuid>,

    /// The per-recipient tracking record's hash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat: Option<String>,

    /// The recipient's ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<Uuid>,
}

impl Clickthrough {
    /// Encode the clickthrough as an opaque, URL-safe value suitable for a
    /// link query parameter
    pub fn encode(&self) -> Result<String, ClickthroughError> {
        let json = serde_json::to_vec(self)?;

        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Decode a clickthrough from the value carried in a tracked link
    pub fn decode(encoded: &str) -> Result<Self, ClickthroughError> {
        let json = URL_SAFE_NO_PAD.decode(encoded)?;

        Ok(serde_json::from_slice(&json)?)
    }
}
