//! Create and Announce activities.

use activitypub_federation::kinds::activity::{AnnounceType, CreateType};
use chrono::{DateTime, Utc};
use enigmatick_common::AppResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::instrument::Instrument;
use crate::normalize::{lenient_datetime, one_or_many, one_or_many_ids, single_reference};
use crate::objects::FederatedObject;

/// Activity verbs carrying displayable objects.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ActivityVerb {
    Create(CreateType),
    Announce(AnnounceType),
}

/// Object of an activity.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ActivityObject {
    /// Embedded object.
    Object(Box<FederatedObject>),
    /// Bare reference (Announce of a remote note).
    Reference(String),
    /// Embedded object of a kind this client does not render.
    Other(Value),
}

/// `ActivityPub` activity wrapping a federated object.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "@context", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(rename = "type")]
    pub kind: ActivityVerb,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "single_reference")]
    pub actor: String,

    #[serde(default, deserialize_with = "one_or_many_ids", skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<String>,

    #[serde(default, deserialize_with = "one_or_many_ids", skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<String>,

    pub object: ActivityObject,

    #[serde(default, deserialize_with = "lenient_datetime")]
    pub published: Option<DateTime<Utc>>,

    /// Attached key material or vaulted ciphertext.
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Vec::is_empty")]
    pub instrument: Vec<Instrument>,

    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub ephemeral_created_at: Option<DateTime<Utc>>,

    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub ephemeral_updated_at: Option<DateTime<Utc>>,
}

impl Activity {
    /// Parse a raw JSON activity.
    pub fn from_value(value: Value) -> AppResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Create a new Create activity embedding `object`, addressed like it.
    #[must_use]
    pub fn create(actor: &str, object: FederatedObject) -> Self {
        let body = object.body();
        let (to, cc) = (body.to.clone(), body.cc.clone());
        let published = body.published;
        Self {
            context: None,
            kind: ActivityVerb::Create(CreateType::Create),
            id: None,
            actor: actor.to_string(),
            to,
            cc,
            object: ActivityObject::Object(Box::new(object)),
            published,
            instrument: Vec::new(),
            ephemeral_created_at: None,
            ephemeral_updated_at: None,
        }
    }

    /// Create a new Announce activity embedding `object`.
    #[must_use]
    pub fn announce(actor: &str, object: FederatedObject) -> Self {
        Self {
            kind: ActivityVerb::Announce(AnnounceType::Announce),
            to: Vec::new(),
            cc: Vec::new(),
            ..Self::create(actor, object)
        }
    }

    /// Attach an instrument.
    #[must_use]
    pub fn with_instrument(mut self, instrument: Instrument) -> Self {
        self.instrument.push(instrument);
        self
    }

    #[must_use]
    pub const fn is_announce(&self) -> bool {
        matches!(self.kind, ActivityVerb::Announce(_))
    }

    /// Embedded object, when it is one this client renders.
    #[must_use]
    pub fn object(&self) -> Option<&FederatedObject> {
        match &self.object {
            ActivityObject::Object(object) => Some(object),
            ActivityObject::Reference(_) | ActivityObject::Other(_) => None,
        }
    }

    /// Take the embedded object out of the activity.
    #[must_use]
    pub fn into_parts(mut self) -> (Option<FederatedObject>, Self) {
        match std::mem::replace(&mut self.object, ActivityObject::Other(Value::Null)) {
            ActivityObject::Object(object) => {
                if let Some(id) = object.id() {
                    self.object = ActivityObject::Reference(id.to_string());
                }
                (Some(*object), self)
            }
            other => {
                self.object = other;
                (None, self)
            }
        }
    }

    /// Identifier of the object, embedded or referenced.
    #[must_use]
    pub fn object_id(&self) -> Option<&str> {
        match &self.object {
            ActivityObject::Object(object) => object.id(),
            ActivityObject::Reference(id) => Some(id),
            ActivityObject::Other(value) => value.get("id").and_then(Value::as_str),
        }
    }

    /// Recipients in `to` followed by `cc`.
    pub fn recipients(&self) -> impl Iterator<Item = &str> {
        self.to.iter().chain(&self.cc).map(String::as_str)
    }

    /// Instruments holding vaulted ciphertext, in document order.
    pub fn vault_items(&self) -> impl Iterator<Item = &Instrument> {
        self.instrument.iter().filter(|i| i.is_vault_item())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::ApNote;
    use serde_json::json;

    #[test]
    fn test_create_with_embedded_note() {
        let activity = Activity::from_value(json!({
            "@context": "https://www.w3.org/ns/activitystreams",
            "type": "Create",
            "id": "https://example.com/activities/1",
            "actor": "https://example.com/users/alice",
            "to": "https://www.w3.org/ns/activitystreams#Public",
            "object": {
                "type": "Note",
                "id": "https://example.com/notes/1",
                "attributedTo": "https://example.com/users/alice",
                "content": "hi",
                "published": "2024-01-01T00:00:00Z"
            },
            "published": "2024-01-01T00:00:00Z",
            "ephemeralCreatedAt": "2024-01-01T00:00:01Z"
        }))
        .unwrap();

        assert!(!activity.is_announce());
        assert_eq!(activity.to.len(), 1);
        assert!(activity.object().is_some_and(FederatedObject::is_note));
        assert_eq!(activity.object_id(), Some("https://example.com/notes/1"));
        assert!(activity.ephemeral_created_at.is_some());
    }

    #[test]
    fn test_announce_by_reference() {
        let activity = Activity::from_value(json!({
            "type": "Announce",
            "id": "https://example.com/activities/2",
            "actor": { "type": "Person", "id": "https://example.com/users/bob" },
            "object": "https://remote.example/notes/9",
            "published": null
        }))
        .unwrap();

        assert!(activity.is_announce());
        assert_eq!(activity.actor, "https://example.com/users/bob");
        assert!(activity.object().is_none());
        assert_eq!(activity.object_id(), Some("https://remote.example/notes/9"));
    }

    #[test]
    fn test_unrenderable_object_kind_is_kept() {
        let activity = Activity::from_value(json!({
            "type": "Create",
            "actor": "https://example.com/users/alice",
            "object": { "type": "Event", "id": "https://example.com/events/1" }
        }))
        .unwrap();

        assert!(activity.object().is_none());
        assert_eq!(activity.object_id(), Some("https://example.com/events/1"));
    }

    #[test]
    fn test_other_verbs_rejected() {
        let result = Activity::from_value(json!({
            "type": "Like",
            "actor": "https://example.com/users/alice",
            "object": "https://example.com/notes/1"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_single_instrument_normalized() {
        let activity = Activity::from_value(json!({
            "type": "Create",
            "actor": "https://example.com/users/alice",
            "object": { "type": "EncryptedNote", "attributedTo": "https://example.com/users/alice" },
            "instrument": { "type": "VaultItem", "content": "cipherXYZ" }
        }))
        .unwrap();

        assert_eq!(activity.vault_items().count(), 1);
    }

    #[test]
    fn test_into_parts() {
        let note = ApNote::new(Some("https://example.com/notes/3"), "https://example.com/users/a", "x");
        let activity = Activity::create("https://example.com/users/a", FederatedObject::Note(note));

        let (object, rest) = activity.into_parts();
        assert!(object.is_some());
        assert_eq!(rest.object_id(), Some("https://example.com/notes/3"));
    }

    #[test]
    fn test_create_serializes_verb() {
        let note = ApNote::new(None, "https://example.com/users/a", "x").public();
        let activity = Activity::announce("https://example.com/users/b", FederatedObject::Note(note));

        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["type"], "Announce");
        assert_eq!(json["object"]["type"], "Note");
    }
}
