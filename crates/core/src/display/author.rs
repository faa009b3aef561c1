//! Author resolution from server annotations.

use enigmatick_federation::{Activity, ActivityVerb, ApActorRef, Actor, FederatedObject};

/// Actor to display as the author of `object`.
///
/// The author URI is the object's first `attributedTo`, else the activity
/// actor (when the activity is not an Announce). It is looked up in
/// `ephemeralAttributedTo`, then `ephemeralActors`; failing that a terse
/// reference is synthesized from the URI.
#[must_use]
pub fn resolve_author(object: &FederatedObject, activity: Option<&Activity>) -> Actor {
    let body = object.body();
    let ephemeral = &body.ephemeral;
    let author = body.author().or_else(|| {
        activity
            .filter(|activity| matches!(activity.kind, ActivityVerb::Create(_)))
            .map(|activity| activity.actor.as_str())
    });

    let Some(author) = author else {
        return ephemeral
            .ephemeral_attributed_to
            .first()
            .cloned()
            .map_or_else(|| ApActorRef::from_uri("").into(), Actor::from);
    };

    if let Some(terse) = ephemeral
        .ephemeral_attributed_to
        .iter()
        .find(|actor| actor.id == author)
    {
        return terse.clone().into();
    }

    if let Some(profile) = ephemeral
        .ephemeral_actors
        .iter()
        .find(|actor| actor.id.as_deref() == Some(author))
    {
        return profile.clone().into();
    }

    ApActorRef::from_uri(author).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: serde_json::Value) -> FederatedObject {
        FederatedObject::from_value(value).unwrap()
    }

    #[test]
    fn test_from_ephemeral_attributed_to() {
        let object = object(json!({
            "type": "Note",
            "attributedTo": "https://example.com/users/alice",
            "ephemeralAttributedTo": [
                { "id": "https://example.com/users/bob", "preferredUsername": "bob" },
                { "id": "https://example.com/users/alice", "preferredUsername": "alice", "name": "Alice" }
            ]
        }));

        let actor = resolve_author(&object, None);
        assert_eq!(actor.id(), Some("https://example.com/users/alice"));
        assert_eq!(actor.display_name(), "Alice");
    }

    #[test]
    fn test_from_ephemeral_actors() {
        let object = object(json!({
            "type": "Note",
            "attributedTo": "https://example.com/users/alice",
            "ephemeralActors": [{
                "type": "Person",
                "id": "https://example.com/users/alice",
                "preferredUsername": "alice",
                "inbox": "https://example.com/users/alice/inbox",
                "outbox": "https://example.com/users/alice/outbox"
            }]
        }));

        let actor = resolve_author(&object, None);
        assert!(actor.as_profile().is_some());
    }

    #[test]
    fn test_synthesized_from_uri() {
        let object = object(json!({
            "type": "Note",
            "attributedTo": "https://remote.example/users/carol"
        }));

        let actor = resolve_author(&object, None);
        assert_eq!(actor.id(), Some("https://remote.example/users/carol"));
        assert_eq!(actor.preferred_username(), "carol");
    }

    #[test]
    fn test_falls_back_to_create_actor() {
        let activity = Activity::from_value(json!({
            "type": "Create",
            "actor": "https://example.com/users/dave",
            "object": { "type": "EncryptedNote" }
        }))
        .unwrap();

        let actor = resolve_author(activity.object().unwrap(), Some(&activity));
        assert_eq!(actor.preferred_username(), "dave");
    }

    #[test]
    fn test_announce_actor_is_not_the_author() {
        let activity = Activity::from_value(json!({
            "type": "Announce",
            "actor": "https://example.com/users/booster",
            "object": { "type": "Note" }
        }))
        .unwrap();

        let actor = resolve_author(activity.object().unwrap(), Some(&activity));
        assert_eq!(actor.id(), Some(""));
    }
}
