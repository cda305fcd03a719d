//! Send source

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The entity or process that triggered a send, e.g. a campaign action or a
/// broadcast
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendSource {
    /// The kind of entity that triggered the send
    #[serde(rename = "type")]
    pub kind: String,

    /// The triggering entity's ID
    pub id: Uuid,
}

impl SendSource {
    /// Create a new send source
    pub fn new(kind: impl Into<String>, id: Uuid) -> Self {
        Self {
            kind: kind.into(),
            id,
        }
    }
}
