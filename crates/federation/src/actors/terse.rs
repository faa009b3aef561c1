//! Terse actor reference embedded in server annotations.

use serde::{Deserialize, Serialize};

use crate::normalize::{lenient_list, lenient_string};
use crate::objects::{ApImage, ApTag, Tagged};

/// Minimal actor description (likes, announces, resolved attribution).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApActorRef {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub preferred_username: String,
    #[serde(default, deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<ApTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<ApImage>,
}

impl ApActorRef {
    /// Create a terse reference.
    #[must_use]
    pub fn new(id: &str, preferred_username: &str) -> Self {
        Self {
            id: id.to_string(),
            url: None,
            name: None,
            preferred_username: preferred_username.to_string(),
            tag: Vec::new(),
            icon: None,
        }
    }

    /// Synthesize a reference from a bare actor URI.
    ///
    /// The username is the last non-empty path segment (leading `@`
    /// removed), or the whole URI when there is none.
    #[must_use]
    pub fn from_uri(uri: &str) -> Self {
        let username = url::Url::parse(uri)
            .ok()
            .and_then(|parsed| {
                parsed
                    .path_segments()
                    .and_then(|mut segments| segments.rfind(|s| !s.is_empty()).map(str::to_string))
            })
            .map_or_else(
                || uri.to_string(),
                |segment| segment.trim_start_matches('@').to_string(),
            );

        Self {
            url: Some(uri.to_string()),
            ..Self::new(uri, &username)
        }
    }
}

impl Tagged for ApActorRef {
    fn tags(&self) -> &[ApTag] {
        &self.tag
    }
}
