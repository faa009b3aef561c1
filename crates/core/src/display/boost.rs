//! Boost (Announce) summaries.

use enigmatick_federation::{ApActorRef, Actor};
use serde::Serialize;

use super::note::DisplayNote;

/// Who boosted a note, for the "boosted by" line.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct AnnounceParams {
    /// Profile URL of the first booster.
    pub url: String,
    /// Display name of the first booster.
    pub name: String,
    /// Remainder label, empty when there is a single booster.
    pub others: String,
}

/// The actor credited first for boosting `note`.
///
/// Taken from `ephemeralAnnounces`, else from the wrapping Announce.
#[must_use]
pub fn first_announcer(note: &DisplayNote) -> Option<Actor> {
    let announces = &note.object.body().ephemeral.ephemeral_announces;
    if let Some(first) = announces.first() {
        return Some(first.clone().into());
    }
    note.activity
        .as_ref()
        .filter(|activity| activity.is_announce())
        .map(|activity| ApActorRef::from_uri(&activity.actor).into())
}

/// Summary of the actors that boosted `note`, if any.
#[must_use]
pub fn boost_summary(note: &DisplayNote) -> Option<AnnounceParams> {
    let first = first_announcer(note)?;
    let count = note.object.body().ephemeral.announce_count().max(1);

    let others = match count - 1 {
        0 => String::new(),
        1 => "and 1 other".to_string(),
        n => format!("and {n} others"),
    };

    Some(AnnounceParams {
        url: first.url().or_else(|| first.id()).unwrap_or_default().to_string(),
        name: first.display_name().to_string(),
        others,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use enigmatick_federation::{Activity, FederatedObject};
    use serde_json::json;

    fn build(object: serde_json::Value, activity: Option<Activity>) -> DisplayNote {
        let object = FederatedObject::from_value(object).unwrap();
        let actor = ApActorRef::new("https://example.com/users/alice", "alice").into();
        DisplayNote::build(actor, object, activity, None)
    }

    #[test]
    fn test_no_boosts() {
        let note = build(json!({ "type": "Note", "id": "https://example.com/notes/1" }), None);
        assert!(boost_summary(&note).is_none());
    }

    #[test]
    fn test_single_booster() {
        let note = build(
            json!({
                "type": "Note",
                "id": "https://example.com/notes/1",
                "ephemeralAnnounces": [{
                    "id": "https://remote.example/users/bob",
                    "url": "https://remote.example/@bob",
                    "preferredUsername": "bob",
                    "name": "Bob"
                }]
            }),
            None,
        );

        assert_eq!(
            boost_summary(&note),
            Some(AnnounceParams {
                url: "https://remote.example/@bob".to_string(),
                name: "Bob".to_string(),
                others: String::new(),
            })
        );
    }

    #[test]
    fn test_several_boosters() {
        let note = build(
            json!({
                "type": "Note",
                "id": "https://example.com/notes/1",
                "ephemeralAnnounces": [
                    { "id": "https://remote.example/users/bob", "preferredUsername": "bob" },
                    { "id": "https://remote.example/users/carol", "preferredUsername": "carol" },
                    { "id": "https://remote.example/users/dave", "preferredUsername": "dave" }
                ]
            }),
            None,
        );

        let summary = boost_summary(&note).unwrap();
        assert_eq!(summary.url, "https://remote.example/users/bob");
        assert_eq!(summary.name, "bob");
        assert_eq!(summary.others, "and 2 others");
    }

    #[test]
    fn test_from_wrapping_announce() {
        let announce = Activity::from_value(json!({
            "type": "Announce",
            "actor": "https://remote.example/users/erin",
            "object": "https://example.com/notes/1"
        }))
        .unwrap();
        let note = build(
            json!({ "type": "Note", "id": "https://example.com/notes/1" }),
            Some(announce),
        );

        let summary = boost_summary(&note).unwrap();
        assert_eq!(summary.name, "erin");
        assert_eq!(summary.url, "https://remote.example/users/erin");
    }
}
