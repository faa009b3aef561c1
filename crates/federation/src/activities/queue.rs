//! Processing-queue items and vaulted messages.

use chrono::{DateTime, Utc};
use enigmatick_common::AppResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::activity::ActivityObject;
use super::instrument::Instrument;
use crate::normalize::{lenient_datetime, one_or_many, one_or_many_ids};
use crate::objects::FederatedObject;

/// Kinds of entries in a user's processing queue.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum QueueItemKind {
    EncryptedNote,
    EncryptedSession,
    VaultNote,
    Note,
    Announce,
    Create,
}

/// An entry in a user's processing queue awaiting client-side handling
/// (session establishment, decryption, vaulting).
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    #[serde(rename = "@context", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(rename = "type")]
    pub kind: QueueItemKind,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributed_to: Option<String>,
    #[serde(default, deserialize_with = "one_or_many_ids")]
    pub to: Vec<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub published: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, alias = "conversations", skip_serializing_if = "Option::is_none")]
    pub conversation: Option<String>,
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub instrument: Vec<Instrument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<ActivityObject>,
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<Value>,
}

impl QueueItem {
    /// Parse a raw JSON queue item.
    pub fn from_value(value: Value) -> AppResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Whether the item carries ciphertext rather than plaintext.
    #[must_use]
    pub const fn is_encrypted(&self) -> bool {
        matches!(
            self.kind,
            QueueItemKind::EncryptedNote | QueueItemKind::EncryptedSession
        )
    }

    /// Embedded object, when it is one this client renders.
    #[must_use]
    pub fn object(&self) -> Option<&FederatedObject> {
        match &self.object {
            Some(ActivityObject::Object(object)) => Some(object),
            _ => None,
        }
    }

    /// First vaulted-ciphertext instrument.
    #[must_use]
    pub fn vault_item(&self) -> Option<&Instrument> {
        self.instrument.iter().find(|i| i.is_vault_item())
    }

    /// Sender of the item.
    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        self.actor.as_deref().or(self.attributed_to.as_deref())
    }
}

/// A decrypted message stored in the user's vault.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VaultedMessage {
    pub message: String,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub published: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributed_to: Option<String>,
}
