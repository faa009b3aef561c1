//! Conversation container tolerant of out-of-order delivery.

use std::collections::{BTreeMap, BTreeSet};

use enigmatick_common::{AppError, AppResult};
use enigmatick_federation::{Activity, ActivityObject, FederatedObject};
use tracing::{debug, warn};

use super::author::resolve_author;
use super::note::{DisplayNote, count_replies, find_in, find_in_mut, remove_in};
use crate::render::RenderContext;

/// Where an inserted node ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Top-level node.
    Root,
    /// Under its parent.
    Attached,
    /// Held until its parent arrives.
    Orphaned,
}

/// Outcome of ingesting a batch of activities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Nodes placed in the thread.
    pub inserted: usize,
    /// Activities that only reference their object, or embed a kind this
    /// client does not render.
    pub skipped: usize,
    /// Activities whose embedded object failed to parse.
    pub malformed: usize,
    /// Nodes rejected because they would close a reply cycle.
    pub rejected: usize,
}

/// Reply trees plus the replies still waiting for their parent.
///
/// Single writer: callers feeding several pages must insert them one at a
/// time.
#[derive(Clone, Debug, Default)]
pub struct Thread {
    roots: BTreeMap<String, DisplayNote>,
    /// Parent id to the replies waiting on it.
    orphans: BTreeMap<String, BTreeMap<String, DisplayNote>>,
}

fn collect_keys(node: &DisplayNote, keys: &mut BTreeSet<String>) {
    keys.insert(node.key.clone());
    for reply in node.replies.values() {
        collect_keys(reply, keys);
    }
}

impl Thread {
    /// Empty thread.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level nodes keyed by `key`.
    #[must_use]
    pub const fn roots(&self) -> &BTreeMap<String, DisplayNote> {
        &self.roots
    }

    /// Replies whose parent has not arrived, with the parent id.
    pub fn orphans(&self) -> impl Iterator<Item = (&str, &DisplayNote)> {
        self.orphans
            .iter()
            .flat_map(|(parent, nodes)| nodes.values().map(move |node| (parent.as_str(), node)))
    }

    /// Number of nodes held, at any depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.top_level()
            .map(|node| 1 + count_replies(node))
            .sum()
    }

    /// Whether no node is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty() && self.orphans.is_empty()
    }

    /// Roots followed by orphaned subtrees.
    pub(crate) fn top_level(&self) -> impl Iterator<Item = &DisplayNote> {
        self.roots
            .values()
            .chain(self.orphans.values().flat_map(BTreeMap::values))
    }

    /// Node with `key`, attached or orphaned.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&DisplayNote> {
        find_in(&self.roots, key).or_else(|| {
            self.orphans
                .values()
                .find_map(|nodes| find_in(nodes, key))
        })
    }

    /// Insert `node`, routing it by its `inReplyTo`.
    pub fn insert(&mut self, node: DisplayNote) -> AppResult<Placement> {
        match node.in_reply_to().map(str::to_string) {
            Some(parent) => self.insert_reply(&parent, node),
            None => {
                let node = self.absorb(node);
                self.roots.insert(node.key.clone(), node);
                Ok(Placement::Root)
            }
        }
    }

    /// Insert `child` under `parent_id`, or hold it until that parent arrives.
    ///
    /// A node with the same key already present is replaced and its
    /// replies carried over. Fails without changing the thread if the
    /// insertion would make a node its own ancestor.
    pub fn insert_reply(&mut self, parent_id: &str, child: DisplayNote) -> AppResult<Placement> {
        if self.prospective_keys(&child).contains(parent_id) {
            warn!(parent = parent_id, child = %child.key, "Rejecting reply cycle");
            return Err(AppError::ReplyCycle(format!(
                "{} cannot reply to its descendant {parent_id}",
                child.key
            )));
        }

        let child = self.absorb(child);

        if let Some(parent) = self.find_mut(parent_id) {
            parent.replies.insert(child.key.clone(), child);
            return Ok(Placement::Attached);
        }

        debug!(parent = parent_id, child = %child.key, "Holding orphaned reply");
        self.orphans
            .entry(parent_id.to_string())
            .or_default()
            .insert(child.key.clone(), child);
        Ok(Placement::Orphaned)
    }

    /// Build and insert one node per activity with an embedded object.
    pub fn ingest_activities<I>(&mut self, activities: I, ctx: &RenderContext) -> IngestSummary
    where
        I: IntoIterator<Item = Activity>,
    {
        let mut summary = IngestSummary::default();

        for activity in activities {
            let (object, activity) = activity.into_parts();
            let Some(object) = object else {
                let error = match &activity.object {
                    ActivityObject::Other(raw) => FederatedObject::from_value(raw.clone()).err(),
                    _ => None,
                };
                match error {
                    Some(e) if !matches!(e, AppError::Unsupported(_)) => {
                        warn!(
                            activity = activity.id.as_deref().unwrap_or_default(),
                            object = activity.object_id().unwrap_or_default(),
                            error = %e,
                            "Skipping activity whose object did not parse"
                        );
                        summary.malformed += 1;
                    }
                    _ => {
                        debug!(
                            activity = activity.id.as_deref().unwrap_or_default(),
                            object = activity.object_id().unwrap_or_default(),
                            "Skipping activity without an embedded object"
                        );
                        summary.skipped += 1;
                    }
                }
                continue;
            };

            let actor = resolve_author(&object, Some(&activity));
            let node = DisplayNote::build_at(actor, object, Some(activity), None, ctx.now());
            match self.insert(node) {
                Ok(_) => summary.inserted += 1,
                Err(e) => {
                    e.log();
                    summary.rejected += 1;
                }
            }
        }

        summary
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut DisplayNote> {
        if let Some(node) = find_in_mut(&mut self.roots, key) {
            return Some(node);
        }
        self.orphans
            .values_mut()
            .find_map(|nodes| find_in_mut(nodes, key))
    }

    fn remove(&mut self, key: &str) -> Option<DisplayNote> {
        if let Some(node) = remove_in(&mut self.roots, key) {
            return Some(node);
        }
        let removed = self
            .orphans
            .values_mut()
            .find_map(|nodes| remove_in(nodes, key));
        self.orphans.retain(|_, nodes| !nodes.is_empty());
        removed
    }

    /// Keys that would be in `node`'s subtree once it is inserted: its own
    /// replies, those of a node it replaces, and every orphan it adopts.
    fn prospective_keys(&self, node: &DisplayNote) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        collect_keys(node, &mut keys);
        if let Some(existing) = self.find(&node.key) {
            collect_keys(existing, &mut keys);
        }

        let mut pending: Vec<String> = keys.iter().cloned().collect();
        while let Some(key) = pending.pop() {
            let Some(waiting) = self.orphans.get(&key) else {
                continue;
            };
            for orphan in waiting.values() {
                let mut adopted = BTreeSet::new();
                collect_keys(orphan, &mut adopted);
                for key in adopted {
                    if keys.insert(key.clone()) {
                        pending.push(key);
                    }
                }
            }
        }

        keys
    }

    /// Take over the replies of a node with the same key, then adopt every
    /// orphan waiting on a key in the subtree.
    fn absorb(&mut self, mut node: DisplayNote) -> DisplayNote {
        if let Some(existing) = self.remove(&node.key) {
            debug!(key = %node.key, "Replacing node");
            for (key, reply) in existing.replies {
                node.replies.entry(key).or_insert(reply);
            }
        }
        self.adopt(&mut node);
        node
    }

    fn adopt(&mut self, node: &mut DisplayNote) {
        if let Some(waiting) = self.orphans.remove(&node.key) {
            debug!(parent = %node.key, count = waiting.len(), "Adopting orphaned replies");
            node.replies.extend(waiting);
        }
        for reply in node.replies.values_mut() {
            self.adopt(reply);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enigmatick_federation::{ApActorRef, ApNote};
    use serde_json::json;

    fn node(id: &str, in_reply_to: Option<&str>) -> DisplayNote {
        let mut note = ApNote::new(Some(id), "https://example.com/users/alice", id);
        note.in_reply_to = in_reply_to.map(str::to_string);
        DisplayNote::build(
            ApActorRef::new("https://example.com/users/alice", "alice").into(),
            FederatedObject::Note(note),
            None,
            None,
        )
    }

    #[test]
    fn test_routes_by_in_reply_to() {
        let mut thread = Thread::new();
        assert_eq!(thread.insert(node("a", None)).unwrap(), Placement::Root);
        assert_eq!(thread.insert(node("b", Some("a"))).unwrap(), Placement::Attached);
        assert_eq!(thread.insert(node("c", Some("b"))).unwrap(), Placement::Attached);

        assert_eq!(thread.roots().len(), 1);
        assert_eq!(thread.len(), 3);
        assert!(thread.roots()["a"].replies["b"].replies.contains_key("c"));
    }

    #[test]
    fn test_orphan_adopted_when_parent_arrives() {
        let mut thread = Thread::new();
        assert_eq!(thread.insert(node("b", Some("a"))).unwrap(), Placement::Orphaned);
        assert_eq!(thread.orphans().count(), 1);

        assert_eq!(thread.insert(node("a", None)).unwrap(), Placement::Root);
        assert_eq!(thread.orphans().count(), 0);
        assert!(thread.roots()["a"].replies.contains_key("b"));
    }

    #[test]
    fn test_orphan_chain_adopted_through_orphan_parent() {
        let mut thread = Thread::new();
        thread.insert(node("c", Some("b"))).unwrap();
        assert_eq!(thread.insert(node("b", Some("a"))).unwrap(), Placement::Orphaned);
        assert_eq!(thread.orphans().count(), 1);

        thread.insert(node("a", None)).unwrap();
        assert!(thread.orphans().next().is_none());
        assert!(thread.find("c").is_some());
        assert_eq!(thread.len(), 3);
    }

    #[test]
    fn test_attach_under_orphaned_parent() {
        let mut thread = Thread::new();
        thread.insert(node("b", Some("a"))).unwrap();
        assert_eq!(thread.insert(node("c", Some("b"))).unwrap(), Placement::Attached);
        assert_eq!(thread.len(), 2);
    }

    #[test]
    fn test_self_reply_rejected() {
        let mut thread = Thread::new();
        let result = thread.insert(node("a", Some("a")));
        assert!(matches!(result, Err(AppError::ReplyCycle(_))));
        assert!(thread.is_empty());
    }

    #[test]
    fn test_ancestor_reply_rejected_without_mutation() {
        let mut thread = Thread::new();
        thread.insert(node("a", None)).unwrap();
        thread.insert(node("b", Some("a"))).unwrap();

        let result = thread.insert_reply("b", node("a", None));
        assert!(matches!(result, Err(AppError::ReplyCycle(_))));
        assert_eq!(thread.len(), 2);
        assert!(thread.roots()["a"].replies.contains_key("b"));
    }

    #[test]
    fn test_cycle_through_waiting_orphans_rejected() {
        let mut thread = Thread::new();
        thread.insert(node("b", Some("a"))).unwrap();

        let result = thread.insert(node("a", Some("b")));
        assert!(matches!(result, Err(AppError::ReplyCycle(_))));
        assert_eq!(thread.orphans().count(), 1);
    }

    #[test]
    fn test_duplicate_keeps_replies() {
        let mut thread = Thread::new();
        thread.insert(node("a", None)).unwrap();
        thread.insert(node("b", Some("a"))).unwrap();

        let mut updated = node("a", None);
        if let FederatedObject::Note(note) = &mut updated.object {
            note.content = Some("edited".to_string());
        }
        thread.insert(updated).unwrap();

        let root = &thread.roots()["a"];
        assert_eq!(root.object.body().content.as_deref(), Some("edited"));
        assert!(root.replies.contains_key("b"));
        assert_eq!(thread.len(), 2);
    }

    #[test]
    fn test_duplicate_reply_moves_with_replies() {
        let mut thread = Thread::new();
        thread.insert(node("r1", None)).unwrap();
        thread.insert(node("r2", None)).unwrap();
        thread.insert(node("x", Some("r1"))).unwrap();
        thread.insert(node("y", Some("x"))).unwrap();

        thread.insert(node("x", Some("r2"))).unwrap();
        assert!(thread.roots()["r1"].replies.is_empty());
        assert!(thread.roots()["r2"].replies["x"].replies.contains_key("y"));
    }

    fn ctx() -> RenderContext {
        RenderContext::new(chrono::Utc::now())
    }

    #[test]
    fn test_reingesting_idless_note_replaces_it() {
        let dm = || {
            Activity::from_value(json!({
                "type": "Create",
                "id": "https://example.com/activities/dm-1",
                "actor": "https://example.com/users/alice",
                "to": "https://example.com/users/bob",
                "object": { "type": "EncryptedNote" },
                "instrument": { "type": "VaultItem", "content": "cipher" }
            }))
            .unwrap()
        };

        let mut thread = Thread::new();
        thread.ingest_activities([dm()], &ctx());
        thread.ingest_activities([dm()], &ctx());

        assert_eq!(thread.len(), 1);
        assert!(thread.find("https://example.com/activities/dm-1").is_some());
    }

    #[test]
    fn test_ingest_counts_references_and_malformed_objects() {
        let reference = Activity::from_value(json!({
            "type": "Announce",
            "actor": "https://example.com/users/bob",
            "object": "https://remote.example/notes/1"
        }))
        .unwrap();
        let malformed = Activity::from_value(json!({
            "type": "Create",
            "actor": "https://example.com/users/bob",
            "object": { "type": "Note", "id": "https://example.com/notes/2", "content": { "bad": true } }
        }))
        .unwrap();
        let unsupported = Activity::from_value(json!({
            "type": "Create",
            "actor": "https://example.com/users/bob",
            "object": { "type": "Event", "id": "https://example.com/events/3" }
        }))
        .unwrap();

        let mut thread = Thread::new();
        let summary = thread.ingest_activities([reference, malformed, unsupported], &ctx());

        assert_eq!(summary.inserted, 0);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.malformed, 1);
        assert!(thread.is_empty());
    }
}
