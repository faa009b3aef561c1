//! Custom emoji substitution.

use enigmatick_federation::Tagged;

use crate::markup::html_escape;
use crate::media::{MediaProxy, rewrite_media_url};

/// Replace every emoji shortcode of `entity` in `text` with an inline image.
///
/// Without a proxy the text is returned unchanged. Tags without an icon or
/// with an empty shortcode are ignored.
#[must_use]
pub fn substitute_emoji<T>(proxy: Option<&MediaProxy>, text: &str, entity: &T) -> String
where
    T: Tagged + ?Sized,
{
    let Some(proxy) = proxy else {
        return text.to_string();
    };

    entity
        .tags()
        .iter()
        .filter_map(|tag| tag.emoji_icon_url().map(|icon| (tag.name.as_str(), icon)))
        .fold(text.to_string(), |text, (name, icon)| {
            if !text.contains(name) {
                return text;
            }
            let src = html_escape(&rewrite_media_url(Some(proxy), icon));
            text.replace(name, &format!("<img class=\"emoji\" src=\"{src}\"/>"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaEncoder;
    use enigmatick_federation::{ApActorRef, ApNote, ApTag};

    struct Identity;

    impl MediaEncoder for Identity {
        fn url_safe_encode(&self, url: &str) -> String {
            url.to_string()
        }
    }

    #[test]
    fn test_no_tags_unchanged() {
        let proxy = MediaProxy::new(Identity);
        let note = ApNote::new(None, "https://example.com/users/a", "hello world");
        assert_eq!(substitute_emoji(Some(&proxy), "hello world", &note), "hello world");
    }

    #[test]
    fn test_substitutes_every_occurrence() {
        let proxy = MediaProxy::new(Identity);
        let mut note = ApNote::new(None, "https://example.com/users/a", "");
        note.tag.push(ApTag::emoji(":cat:", "https://remote.example/cat.png"));

        assert_eq!(
            substitute_emoji(Some(&proxy), ":cat: and :cat:", &note),
            "<img class=\"emoji\" src=\"/api/cache?url=https://remote.example/cat.png\"/> and \
             <img class=\"emoji\" src=\"/api/cache?url=https://remote.example/cat.png\"/>"
        );
    }

    #[test]
    fn test_without_proxy_unchanged() {
        let mut actor = ApActorRef::new("https://example.com/users/a", "a");
        actor.tag.push(ApTag::emoji(":cat:", "https://remote.example/cat.png"));
        assert_eq!(substitute_emoji(None, "Alice :cat:", &actor), "Alice :cat:");
    }

    #[test]
    fn test_skips_unusable_tags() {
        let proxy = MediaProxy::new(Identity);
        let mut note = ApNote::new(None, "https://example.com/users/a", "");
        note.tag.push(ApTag::emoji("", "https://remote.example/empty.png"));
        let mut iconless = ApTag::emoji(":dog:", "https://remote.example/dog.png");
        iconless.icon = None;
        note.tag.push(iconless);

        assert_eq!(substitute_emoji(Some(&proxy), "a :dog: b", &note), "a :dog: b");
    }
}
