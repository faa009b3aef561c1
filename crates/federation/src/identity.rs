//! Actor handles, resource identifiers and pagination cursors.
//!
//! Every function here is total: input that does not look like what is
//! expected produces a sentinel (`None`, the raw URL, [`PageCursor::None`])
//! rather than an error.

use regex::Regex;
use url::Url;
use uuid::Uuid;

use crate::actors::Actor;

#[allow(clippy::unwrap_used)]
static ACTOR_ID_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^https://([a-zA-Z0-9\-.]+?)/[A-Za-z0-9/\-._]+$").unwrap()
});

#[allow(clippy::unwrap_used)]
static RESOURCE_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(
        r"https://(?:[a-zA-Z0-9.-]+)(?:\.[a-zA-Z0-9.-]+)+/(?:notes|conversation)/([a-zA-Z0-9-]+)",
    )
    .unwrap()
});

#[allow(clippy::unwrap_used)]
static ORIGIN_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(https://(?:[a-zA-Z0-9.-]+)(?:\.[a-zA-Z0-9.-]+)+)/.*").unwrap()
});

/// Base used to resolve relative pagination links.
const PLACEHOLDER_BASE: &str = "https://placeholder.invalid/";

/// `@user@domain` handle of an actor.
///
/// Falls back to the actor's `url`, then its id, then the empty string when
/// the id is not an `https` URL with a path.
#[must_use]
pub fn webfinger_of(actor: &Actor) -> String {
    if let Some(domain) = actor
        .id()
        .and_then(|id| ACTOR_ID_RE.captures(id))
        .and_then(|captures| captures.get(1))
    {
        return format!("@{}@{}", actor.preferred_username(), domain.as_str());
    }

    actor
        .url()
        .or_else(|| actor.id())
        .unwrap_or_default()
        .to_string()
}

/// Handle for a browsable profile URL such as `https://host/@user`.
///
/// Returns `user` when `short`, otherwise `user@host`. A segment that
/// already names a host (`@user@other.host`) keeps it in the long form.
/// `None` when the path does not start with `@user`.
#[must_use]
pub fn remote_profile_handle(url: &str, short: bool) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.next()?;
    let handle = segment.strip_prefix('@').filter(|h| !h.is_empty())?;

    let (username, host) = match handle.split_once('@') {
        Some((username, host)) if !host.is_empty() => (username, host),
        Some(_) => return None,
        None => (handle, parsed.host_str()?),
    };
    if username.is_empty() {
        return None;
    }

    Some(if short {
        username.to_string()
    } else {
        format!("{username}@{host}")
    })
}

/// Identifier segment of a `/notes/<id>` or `/conversation/<id>` URI.
#[must_use]
pub fn extract_resource_id(uri: &str) -> Option<&str> {
    RESOURCE_RE
        .captures(uri)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Like [`extract_resource_id`], for servers that key resources by UUID.
#[must_use]
pub fn extract_resource_uuid(uri: &str) -> Option<Uuid> {
    extract_resource_id(uri).and_then(|id| Uuid::parse_str(id).ok())
}

/// Whether two URLs share the same `https` origin.
#[must_use]
pub fn same_origin(a: &str, b: &str) -> bool {
    fn origin(url: &str) -> Option<&str> {
        ORIGIN_RE
            .captures(url)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
    }
    matches!((origin(a), origin(b)), (Some(a), Some(b)) if a == b)
}

/// Pagination cursor carried by a collection page URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageCursor {
    /// Page of items older than the value.
    Max(String),
    /// Page of items newer than the value.
    Min(String),
    /// No usable cursor.
    None,
}

impl PageCursor {
    /// Query parameter name, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<&'static str> {
        match self {
            Self::Max(_) => Some("max"),
            Self::Min(_) => Some("min"),
            Self::None => None,
        }
    }

    /// Cursor value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Max(value) | Self::Min(value) => Some(value),
            Self::None => None,
        }
    }
}

/// Extract the `max` or `min` cursor from a page URL. `max` wins when both
/// are present.
#[must_use]
pub fn extract_page_cursor(url: &str) -> PageCursor {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            match Url::parse(PLACEHOLDER_BASE).and_then(|base| base.join(url)) {
                Ok(parsed) => parsed,
                Err(_) => return PageCursor::None,
            }
        }
        Err(_) => return PageCursor::None,
    };

    let param = |name: &str| {
        parsed
            .query_pairs()
            .find(|(key, value)| key == name && !value.is_empty())
            .map(|(_, value)| value.into_owned())
    };

    if let Some(max) = param("max") {
        PageCursor::Max(max)
    } else if let Some(min) = param("min") {
        PageCursor::Min(min)
    } else {
        PageCursor::None
    }
}
