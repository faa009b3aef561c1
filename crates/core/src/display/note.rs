//! Display note projection.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use enigmatick_common::IdGenerator;
use enigmatick_federation::{Activity, Actor, FederatedObject, addresses_public};

/// A federated object resolved for display, with its reply subtree.
///
/// Each node owns its replies, so a `DisplayNote` tree cannot contain a
/// cycle.
#[derive(Clone, Debug)]
pub struct DisplayNote {
    /// Object id, else the wrapping activity's id, else a generated
    /// `local:` key.
    pub key: String,
    /// The normalized object.
    pub object: FederatedObject,
    /// Resolved author.
    pub actor: Actor,
    /// Wrapping activity, when the object arrived inside one.
    pub activity: Option<Activity>,
    /// Publication time, never missing.
    pub published: DateTime<Utc>,
    /// Locally resolved creation time used for ordering.
    pub created_at: DateTime<Utc>,
    /// Whether the note is addressed to the public audience.
    pub public: bool,
    /// Direct replies keyed by their `key`.
    pub replies: BTreeMap<String, DisplayNote>,
}

impl DisplayNote {
    /// Build a node, resolving missing timestamps to the current time.
    #[must_use]
    pub fn build(
        actor: Actor,
        object: FederatedObject,
        activity: Option<Activity>,
        replies: Option<BTreeMap<String, Self>>,
    ) -> Self {
        Self::build_at(actor, object, activity, replies, Utc::now())
    }

    /// Build a node, resolving missing timestamps to `now`.
    ///
    /// `published` falls back to the server's `ephemeralTimestamp`, then
    /// `now`; `created_at` is `ephemeralTimestamp` or `now`. Visibility
    /// comes from the object's recipients, or the activity's when the object
    /// names none.
    #[must_use]
    pub fn build_at(
        actor: Actor,
        object: FederatedObject,
        activity: Option<Activity>,
        replies: Option<BTreeMap<String, Self>>,
        now: DateTime<Utc>,
    ) -> Self {
        let body = object.body();
        let timestamp = body.ephemeral.ephemeral_timestamp;
        let published = body.published.or(timestamp).unwrap_or(now);
        let created_at = timestamp.unwrap_or(now);

        let public = if body.to.is_empty() && body.cc.is_empty() {
            activity
                .as_ref()
                .is_some_and(|activity| addresses_public(activity.recipients()))
        } else {
            body.is_public()
        };

        let key = body
            .id
            .clone()
            .or_else(|| activity.as_ref().and_then(|activity| activity.id.clone()))
            .unwrap_or_else(|| IdGenerator::new().generate_local_key());

        Self {
            key,
            object,
            actor,
            activity,
            published,
            created_at,
            public,
            replies: replies.unwrap_or_default(),
        }
    }

    /// Parent object id, if this is a reply.
    #[must_use]
    pub fn in_reply_to(&self) -> Option<&str> {
        self.object.in_reply_to()
    }

    /// Direct replies in display order.
    #[must_use]
    pub fn sorted_replies(&self) -> Vec<&Self> {
        let mut replies: Vec<&Self> = self.replies.values().collect();
        replies.sort_by(|a, b| order_siblings(a, b));
        replies
    }

    /// Node with `key` in this subtree, including this node.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Self> {
        if self.key == key {
            return Some(self);
        }
        find_in(&self.replies, key)
    }
}

pub(crate) fn find_in<'a>(nodes: &'a BTreeMap<String, DisplayNote>, key: &str) -> Option<&'a DisplayNote> {
    if let Some(node) = nodes.get(key) {
        return Some(node);
    }
    nodes.values().find_map(|node| find_in(&node.replies, key))
}

pub(crate) fn find_in_mut<'a>(
    nodes: &'a mut BTreeMap<String, DisplayNote>,
    key: &str,
) -> Option<&'a mut DisplayNote> {
    if nodes.contains_key(key) {
        return nodes.get_mut(key);
    }
    nodes
        .values_mut()
        .find_map(|node| find_in_mut(&mut node.replies, key))
}

pub(crate) fn remove_in(nodes: &mut BTreeMap<String, DisplayNote>, key: &str) -> Option<DisplayNote> {
    if let Some(node) = nodes.remove(key) {
        return Some(node);
    }
    nodes
        .values_mut()
        .find_map(|node| remove_in(&mut node.replies, key))
}

/// Number of descendants of `node`, at any depth.
#[must_use]
pub fn count_replies(node: &DisplayNote) -> usize {
    node.replies
        .values()
        .map(|reply| 1 + count_replies(reply))
        .sum()
}

/// Display order of two siblings: ascending `created_at`.
#[must_use]
pub fn order_siblings(a: &DisplayNote, b: &DisplayNote) -> Ordering {
    a.created_at.cmp(&b.created_at)
}
