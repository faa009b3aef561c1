//! Key material and ciphertext attached to activities.

use serde::{Deserialize, Serialize};

/// Instrument discriminant.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum InstrumentKind {
    OlmIdentityKey,
    OlmOneTimeKey,
    OlmSession,
    OlmAccount,
    /// Vaulted ciphertext of an encrypted note.
    VaultItem,
    /// Pre-Olm schema name for identity keys.
    IdentityKey,
    /// Pre-Olm schema name for session keys.
    SessionKey,
    #[serde(other)]
    Other,
}

/// Typed key material or ciphertext.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    #[serde(rename = "type")]
    pub kind: InstrumentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation_of: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
}

impl Instrument {
    /// Create an instrument with content.
    #[must_use]
    pub fn new(kind: InstrumentKind, content: &str) -> Self {
        Self {
            kind,
            content: Some(content.to_string()),
            hash: None,
            uuid: None,
            mutation_of: None,
            activity: None,
        }
    }

    /// Create a vault item holding `ciphertext`.
    #[must_use]
    pub fn vault_item(ciphertext: &str) -> Self {
        Self::new(InstrumentKind::VaultItem, ciphertext)
    }

    #[must_use]
    pub fn is_vault_item(&self) -> bool {
        self.kind == InstrumentKind::VaultItem
    }
}
