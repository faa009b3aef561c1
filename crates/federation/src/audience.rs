//! Public audience addressing.

/// The `ActivityStreams` public collection.
pub const PUBLIC_COLLECTION: &str = "https://www.w3.org/ns/activitystreams#Public";

/// Every spelling of the public audience seen in the wild.
pub const PUBLIC_SENTINELS: [&str; 3] = [PUBLIC_COLLECTION, "as:Public", "Public"];

/// Whether a single recipient is a public audience sentinel.
#[must_use]
pub fn is_public_recipient(recipient: &str) -> bool {
    PUBLIC_SENTINELS.contains(&recipient)
}

/// Whether any of the given recipients is a public audience sentinel.
pub fn addresses_public<'a, I>(recipients: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    recipients.into_iter().any(is_public_recipient)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_matches_activitypub_federation() {
        assert_eq!(activitypub_federation::kinds::public().as_str(), PUBLIC_COLLECTION);
    }

    #[test]
    fn test_public_spellings() {
        assert!(addresses_public(["https://www.w3.org/ns/activitystreams#Public"]));
        assert!(addresses_public(["https://example.com/users/a", "as:Public"]));
        assert!(addresses_public(["Public"]));
    }

    #[test]
    fn test_private_addressing() {
        assert!(!addresses_public(["https://example.com/users/alice"]));
        assert!(!addresses_public(std::iter::empty()));
        assert!(!addresses_public(["https://www.w3.org/ns/activitystreams#public"]));
    }
}
