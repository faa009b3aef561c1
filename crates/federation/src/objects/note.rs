//! `ActivityPub` Note body shared by notes, encrypted notes, articles and questions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::tag::{ApAttachment, ApTag, Metadata, Tagged};
use crate::actors::{ApActorRef, ApPerson};
use crate::audience;
use crate::normalize::{
    lenient_datetime, lenient_list, lenient_string, one_or_many_ids, optional_reference,
};

/// `ActivityPub` Note body.
///
/// Every field a newer server version may add is optional; the `type` tag
/// lives on [`crate::objects::FederatedObject`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApNote {
    #[serde(rename = "@context", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Absent for encrypted or not-yet-persisted objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "one_or_many_ids", skip_serializing_if = "Vec::is_empty")]
    pub attributed_to: Vec<String>,

    #[serde(default, deserialize_with = "one_or_many_ids", skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<String>,

    #[serde(default, deserialize_with = "one_or_many_ids", skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<String>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default, deserialize_with = "lenient_datetime")]
    pub published: Option<DateTime<Utc>>,

    #[serde(
        default,
        deserialize_with = "optional_reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub in_reply_to: Option<String>,

    #[serde(
        default,
        deserialize_with = "optional_reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub conversation: Option<String>,

    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Content warning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,

    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<ApTag>,

    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub attachment: Vec<ApAttachment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replies: Option<Value>,

    #[serde(flatten)]
    pub ephemeral: NoteEphemeral,
}

/// Server-computed annotations attached to a note for the current viewer.
///
/// Never part of the canonical federated representation.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoteEphemeral {
    /// Actors that announced (boosted) the note.
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub ephemeral_announces: Vec<ApActorRef>,

    /// The viewer's own Announce activity id, if they boosted it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_announced: Option<String>,

    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub ephemeral_actors: Vec<ApPerson>,

    /// The viewer's own Like activity id, if they liked it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_liked: Option<String>,

    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub ephemeral_likes: Vec<ApActorRef>,

    /// Whether the viewer was directly addressed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_targeted: Option<bool>,

    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub ephemeral_timestamp: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub ephemeral_metadata: Vec<Metadata>,

    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub ephemeral_attributed_to: Vec<ApActorRef>,
}

impl NoteEphemeral {
    /// Number of likes known to the server.
    #[must_use]
    pub fn like_count(&self) -> usize {
        self.ephemeral_likes.len()
    }

    /// Number of announces known to the server.
    #[must_use]
    pub fn announce_count(&self) -> usize {
        self.ephemeral_announces.len()
    }

    /// Whether the viewer liked the note.
    #[must_use]
    pub const fn viewer_liked(&self) -> bool {
        self.ephemeral_liked.is_some()
    }

    /// Whether the viewer announced the note.
    #[must_use]
    pub const fn viewer_announced(&self) -> bool {
        self.ephemeral_announced.is_some()
    }
}

impl ApNote {
    /// Create a note body addressed to nobody.
    #[must_use]
    pub fn new(id: Option<&str>, attributed_to: &str, content: &str) -> Self {
        Self {
            id: id.map(str::to_string),
            attributed_to: vec![attributed_to.to_string()],
            content: Some(content.to_string()),
            ..Self::default()
        }
    }

    /// Set public addressing.
    #[must_use]
    pub fn public(mut self) -> Self {
        self.to = vec![audience::PUBLIC_COLLECTION.to_string()];
        self
    }

    /// Recipients in `to` followed by `cc`.
    pub fn recipients(&self) -> impl Iterator<Item = &str> {
        self.to.iter().chain(&self.cc).map(String::as_str)
    }

    /// Whether `to ∪ cc` includes a public audience sentinel.
    #[must_use]
    pub fn is_public(&self) -> bool {
        audience::addresses_public(self.recipients())
    }

    /// First attributed actor.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.attributed_to.first().map(String::as_str)
    }

    /// Copy of this body with the ephemeral side channel removed.
    #[must_use]
    pub fn canonical(&self) -> Self {
        Self {
            ephemeral: NoteEphemeral::default(),
            ..self.clone()
        }
    }
}

impl Tagged for ApNote {
    fn tags(&self) -> &[ApTag] {
        &self.tag
    }
}

/// Article body: a note with a title.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApArticle {
    #[serde(flatten)]
    pub note: ApNote,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Question (poll) body.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApQuestion {
    #[serde(flatten)]
    pub note: ApNote,

    /// Single choice poll options
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<ApPollOption>,

    /// Multiple choice poll options
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<ApPollOption>,

    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<DateTime<Utc>>,

    /// Poll closed time (some servers send `true` instead, which reads as unknown)
    #[serde(
        default,
        deserialize_with = "lenient_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub closed: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voters_count: Option<u32>,
}

impl ApQuestion {
    /// Whether voters may pick several options.
    #[must_use]
    pub fn is_multiple_choice(&self) -> bool {
        !self.any_of.is_empty()
    }

    /// Options regardless of choice mode.
    #[must_use]
    pub fn options(&self) -> &[ApPollOption] {
        if self.is_multiple_choice() {
            &self.any_of
        } else {
            &self.one_of
        }
    }
}

/// `ActivityPub` poll option (for Question objects).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApPollOption {
    #[serde(rename = "type", default = "default_option_kind")]
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replies: Option<ApPollReplies>,
}

/// Poll option vote count.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApPollReplies {
    #[serde(rename = "type", default = "default_replies_kind")]
    pub kind: String,
    #[serde(default)]
    pub total_items: u64,
}

fn default_option_kind() -> String {
    "Note".to_string()
}

fn default_replies_kind() -> String {
    "Collection".to_string()
}

impl ApPollOption {
    /// Create a new poll option.
    #[must_use]
    pub fn new(name: &str, votes: u64) -> Self {
        Self {
            kind: default_option_kind(),
            name: name.to_string(),
            replies: Some(ApPollReplies {
                kind: default_replies_kind(),
                total_items: votes,
            }),
        }
    }

    /// Votes cast for this option, zero when unreported.
    #[must_use]
    pub fn votes(&self) -> u64 {
        self.replies.as_ref().map_or(0, |r| r.total_items)
    }
}
