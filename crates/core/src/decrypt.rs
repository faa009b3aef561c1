//! Content dispatch for plaintext and end-to-end encrypted objects.

use enigmatick_common::AppResult;
use enigmatick_federation::{Activity, FederatedObject, Instrument, QueueItem};
use tracing::{debug, warn};

/// Markup shown in place of a message that could not be decrypted.
pub const DECRYPTION_FAILURE_MARKUP: &str =
    "<span class=\"decryption-failure\">Unable to decrypt message</span>";

/// Client-side decryption of vaulted ciphertext.
///
/// `Ok(None)` means the capability ran but produced no plaintext.
pub trait Decryptor: Send + Sync {
    /// Decrypt `ciphertext`.
    fn decrypt(&self, ciphertext: &str) -> AppResult<Option<String>>;
}

impl<F> Decryptor for F
where
    F: Fn(&str) -> AppResult<Option<String>> + Send + Sync,
{
    fn decrypt(&self, ciphertext: &str) -> AppResult<Option<String>> {
        self(ciphertext)
    }
}

/// The vault item among `instruments`: the first `VaultItem`.
pub fn find_vault_item(instruments: &[Instrument]) -> Option<&Instrument> {
    let mut vault_items = instruments.iter().filter(|i| i.is_vault_item());
    let first = vault_items.next()?;

    let ignored = vault_items.count();
    if ignored > 0 {
        warn!(ignored, "Multiple vault items attached, using the first");
    }
    Some(first)
}

fn decrypt_vaulted(instruments: &[Instrument], decryptor: Option<&dyn Decryptor>) -> String {
    let Some(ciphertext) = find_vault_item(instruments).and_then(|i| i.content.as_deref()) else {
        debug!("No vault item with content");
        return DECRYPTION_FAILURE_MARKUP.to_string();
    };
    let Some(decryptor) = decryptor else {
        debug!("No decryptor available");
        return DECRYPTION_FAILURE_MARKUP.to_string();
    };

    match decryptor.decrypt(ciphertext) {
        Ok(plaintext) => plaintext.unwrap_or_default(),
        Err(e) => {
            debug!(error = %e, "Decryption failed");
            DECRYPTION_FAILURE_MARKUP.to_string()
        }
    }
}

/// Displayable content of `object`.
///
/// Encrypted notes are decrypted from the vault item among `instruments`;
/// every failure folds into [`DECRYPTION_FAILURE_MARKUP`]. Other objects
/// yield their `content`, or an empty string.
#[must_use]
pub fn dispatch_content(
    object: &FederatedObject,
    instruments: &[Instrument],
    decryptor: Option<&dyn Decryptor>,
) -> String {
    if object.is_encrypted_note() {
        decrypt_vaulted(instruments, decryptor)
    } else {
        object.body().content.clone().unwrap_or_default()
    }
}

/// Displayable content of the object embedded in `activity`.
#[must_use]
pub fn activity_content(activity: &Activity, decryptor: Option<&dyn Decryptor>) -> String {
    activity
        .object()
        .map(|object| dispatch_content(object, &activity.instrument, decryptor))
        .unwrap_or_default()
}

/// Displayable content of a processing-queue item.
#[must_use]
pub fn queue_item_content(item: &QueueItem, decryptor: Option<&dyn Decryptor>) -> String {
    match item.object() {
        Some(object) => dispatch_content(object, &item.instrument, decryptor),
        None if item.is_encrypted() => decrypt_vaulted(&item.instrument, decryptor),
        None => item.content.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enigmatick_common::AppError;
    use enigmatick_federation::{ApNote, InstrumentKind};
    use serde_json::json;

    fn encrypted() -> FederatedObject {
        FederatedObject::EncryptedNote(ApNote {
            content: None,
            ..ApNote::new(None, "https://example.com/users/alice", "")
        })
    }

    fn hello(ciphertext: &str) -> AppResult<Option<String>> {
        if ciphertext == "cipherXYZ" {
            Ok(Some("hello".to_string()))
        } else {
            Err(AppError::Decryption("unknown session".to_string()))
        }
    }

    #[test]
    fn test_decrypts_vault_item() {
        let decryptor: &dyn Decryptor = &hello;
        let instruments = [
            Instrument::new(InstrumentKind::OlmSession, "session"),
            Instrument::vault_item("cipherXYZ"),
        ];
        assert_eq!(
            dispatch_content(&encrypted(), &instruments, Some(decryptor)),
            "hello"
        );
    }

    #[test]
    fn test_missing_vault_item() {
        let decryptor: &dyn Decryptor = &hello;
        assert_eq!(
            dispatch_content(&encrypted(), &[], Some(decryptor)),
            DECRYPTION_FAILURE_MARKUP
        );
    }

    #[test]
    fn test_missing_decryptor() {
        assert_eq!(
            dispatch_content(&encrypted(), &[Instrument::vault_item("cipherXYZ")], None),
            DECRYPTION_FAILURE_MARKUP
        );
    }

    #[test]
    fn test_capability_error_folds_into_markup() {
        let decryptor: &dyn Decryptor = &hello;
        assert_eq!(
            dispatch_content(&encrypted(), &[Instrument::vault_item("garbage")], Some(decryptor)),
            DECRYPTION_FAILURE_MARKUP
        );
    }

    #[test]
    fn test_capability_without_plaintext() {
        let empty = |_: &str| -> AppResult<Option<String>> { Ok(None) };
        let decryptor: &dyn Decryptor = &empty;
        assert_eq!(
            dispatch_content(&encrypted(), &[Instrument::vault_item("c")], Some(decryptor)),
            ""
        );
    }

    #[test]
    fn test_first_vault_item_wins() {
        let instruments = [Instrument::vault_item("first"), Instrument::vault_item("second")];
        assert_eq!(
            find_vault_item(&instruments).and_then(|i| i.content.as_deref()),
            Some("first")
        );
    }

    #[test]
    fn test_plaintext_objects() {
        let note = FederatedObject::Note(ApNote::new(None, "https://example.com/users/a", "<p>hi</p>"));
        assert_eq!(dispatch_content(&note, &[], None), "<p>hi</p>");

        let empty = FederatedObject::Article(Default::default());
        assert_eq!(dispatch_content(&empty, &[], None), "");
    }

    #[test]
    fn test_activity_content() {
        let activity = Activity::from_value(json!({
            "type": "Create",
            "actor": "https://example.com/users/alice",
            "object": { "type": "EncryptedNote", "attributedTo": "https://example.com/users/alice" },
            "instrument": { "type": "VaultItem", "content": "cipherXYZ" }
        }))
        .unwrap();
        let decryptor: &dyn Decryptor = &hello;
        assert_eq!(activity_content(&activity, Some(decryptor)), "hello");
        assert_eq!(activity_content(&activity, None), DECRYPTION_FAILURE_MARKUP);
    }

    #[test]
    fn test_queue_item_content() {
        let decryptor: &dyn Decryptor = &hello;

        let encrypted = QueueItem::from_value(json!({
            "type": "EncryptedNote",
            "id": "https://example.com/queue/1",
            "instrument": { "type": "VaultItem", "content": "cipherXYZ" }
        }))
        .unwrap();
        assert_eq!(queue_item_content(&encrypted, Some(decryptor)), "hello");

        let plain = QueueItem::from_value(json!({
            "type": "Note",
            "id": "https://example.com/queue/2",
            "content": "plain"
        }))
        .unwrap();
        assert_eq!(queue_item_content(&plain, Some(decryptor)), "plain");
    }
}
