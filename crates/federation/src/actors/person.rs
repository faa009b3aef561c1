//! `ActivityPub` actor profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::{lenient_datetime, lenient_list, lenient_string};
use crate::objects::{ApAttachment, ApImage, ApTag, Tagged};

/// Full `ActivityPub` actor profile (Person, Service, Group, ...).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApPerson {
    #[serde(rename = "@context", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(rename = "type", default = "default_actor_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub preferred_username: String,
    pub inbox: String,
    pub outbox: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liked: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_tags: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<ApPublicKey>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manually_approves_followers: Option<bool>,

    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub published: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<ApTag>,

    /// Profile fields (`PropertyValue`) and identity proofs.
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub attachment: Vec<ApAttachment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<ApImage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ApImage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Capabilities>,

    #[serde(flatten)]
    pub ephemeral: ProfileEphemeral,
}

fn default_actor_kind() -> String {
    "Person".to_string()
}

/// `ActivityPub` public key.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApPublicKey {
    pub id: String,
    pub owner: String,
    pub public_key_pem: String,
}

/// Client capabilities advertised on a profile.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepts_chat_messages: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enigmatick_encryption: Option<bool>,
}

/// Relationship facts computed for the current viewer.
///
/// View-specific; never persisted as federation truth.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEphemeral {
    /// Whether the viewer follows this actor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_following: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_leader_ap_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_follow_activity_ap_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_summary_markdown: Option<String>,

    /// Actors this actor follows.
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub ephemeral_leaders: Vec<ActorRef>,

    /// Actors following this actor.
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub ephemeral_followers: Vec<ActorRef>,
}

/// Follower/following list entries: bare URIs on older servers, profiles on newer ones.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ActorRef {
    Id(String),
    Profile(Box<ApPerson>),
}

impl ActorRef {
    /// Identifier of the referenced actor, when known.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Id(id) => Some(id),
            Self::Profile(profile) => profile.id.as_deref(),
        }
    }
}

impl ApPerson {
    /// Create a new Person actor.
    #[must_use]
    pub fn new(id: &str, username: &str, inbox: &str, outbox: &str) -> Self {
        Self {
            context: None,
            kind: default_actor_kind(),
            id: Some(id.to_string()),
            preferred_username: username.to_string(),
            inbox: inbox.to_string(),
            outbox: outbox.to_string(),
            followers: None,
            following: None,
            liked: None,
            featured: None,
            featured_tags: None,
            name: None,
            summary: None,
            url: None,
            public_key: None,
            manually_approves_followers: None,
            published: None,
            tag: Vec::new(),
            attachment: Vec::new(),
            endpoints: None,
            icon: None,
            image: None,
            capabilities: None,
            ephemeral: ProfileEphemeral::default(),
        }
    }

    /// Whether the viewer follows this actor.
    #[must_use]
    pub fn viewer_follows(&self) -> bool {
        self.ephemeral.ephemeral_following.unwrap_or(false)
    }

    /// Number of followers the server reported for this view.
    #[must_use]
    pub fn follower_count(&self) -> usize {
        self.ephemeral.ephemeral_followers.len()
    }

    /// Number of followed actors the server reported for this view.
    #[must_use]
    pub fn leader_count(&self) -> usize {
        self.ephemeral.ephemeral_leaders.len()
    }

    /// Whether this actor advertises end-to-end encrypted messaging.
    #[must_use]
    pub fn supports_encryption(&self) -> bool {
        self.capabilities
            .as_ref()
            .and_then(|c| c.enigmatick_encryption)
            .unwrap_or(false)
    }

    /// Copy of this profile with viewer relationship facts removed.
    #[must_use]
    pub fn canonical(&self) -> Self {
        Self {
            ephemeral: ProfileEphemeral::default(),
            ..self.clone()
        }
    }
}

impl Tagged for ApPerson {
    fn tags(&self) -> &[ApTag] {
        &self.tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mastodon_profile() -> Value {
        json!({
            "@context": ["https://www.w3.org/ns/activitystreams", "https://w3id.org/security/v1"],
            "type": "Person",
            "id": "https://mastodon.social/users/alice",
            "preferredUsername": "alice",
            "name": "Alice :blobcat:",
            "inbox": "https://mastodon.social/users/alice/inbox",
            "outbox": "https://mastodon.social/users/alice/outbox",
            "followers": "https://mastodon.social/users/alice/followers",
            "following": "https://mastodon.social/users/alice/following",
            "url": "https://mastodon.social/@alice",
            "publicKey": {
                "id": "https://mastodon.social/users/alice#main-key",
                "owner": "https://mastodon.social/users/alice",
                "publicKeyPem": "-----BEGIN PUBLIC KEY-----\n...\n-----END PUBLIC KEY-----"
            },
            "tag": {
                "type": "Emoji",
                "name": ":blobcat:",
                "icon": { "type": "Image", "url": "https://files.mastodon.social/blobcat.png" }
            },
            "attachment": [{ "type": "PropertyValue", "name": "Site", "value": "example.com" }]
        })
    }

    #[test]
    fn test_profile_deserialization() {
        let person: ApPerson = serde_json::from_value(mastodon_profile()).unwrap();

        assert_eq!(person.preferred_username, "alice");
        assert_eq!(person.tags().len(), 1);
        assert_eq!(person.attachment.len(), 1);
        assert!(person.public_key.is_some());
        assert!(!person.viewer_follows());
        assert!(!person.supports_encryption());
    }

    #[test]
    fn test_ephemeral_relationships_mixed_shapes() {
        let mut value = mastodon_profile();
        value["ephemeralFollowing"] = json!(true);
        value["ephemeralFollowers"] = json!([
            "https://a.example/users/1",
            {
                "id": "https://b.example/users/2",
                "preferredUsername": "two",
                "inbox": "https://b.example/users/2/inbox",
                "outbox": "https://b.example/users/2/outbox"
            }
        ]);
        value["ephemeralLeaders"] = json!("https://c.example/users/3");
        value["capabilities"] = json!({ "enigmatickEncryption": true });

        let person: ApPerson = serde_json::from_value(value).unwrap();

        assert!(person.viewer_follows());
        assert_eq!(person.follower_count(), 2);
        assert_eq!(person.leader_count(), 1);
        assert_eq!(
            person.ephemeral.ephemeral_followers[1].id(),
            Some("https://b.example/users/2")
        );
        assert!(person.supports_encryption());

        let canonical = person.canonical();
        assert_eq!(canonical.follower_count(), 0);
        assert!(!serde_json::to_string(&canonical).unwrap().contains("ephemeral"));
    }
}
