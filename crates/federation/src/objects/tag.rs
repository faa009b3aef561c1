//! Tags, attachments, images and link-preview metadata.

use serde::{Deserialize, Serialize};

use crate::normalize::{lenient_dimension, lenient_string, lenient_text};

/// Tag kinds understood by the renderer.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum TagKind {
    Mention,
    Emoji,
    Hashtag,
    #[default]
    #[serde(other)]
    Other,
}

/// `ActivityPub` tag (mention, hashtag or custom emoji).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApTag {
    #[serde(rename = "type", default)]
    pub kind: TagKind,
    /// Shortcode for emoji (`:blobcat:`), `@user@host` for mentions, `#tag` for hashtags.
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<ApImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ApTag {
    /// Create an emoji tag.
    #[must_use]
    pub fn emoji(name: &str, icon_url: &str) -> Self {
        Self {
            kind: TagKind::Emoji,
            name: name.to_string(),
            href: None,
            id: None,
            updated: None,
            icon: Some(ApImage::new(icon_url)),
            value: None,
        }
    }

    /// Icon URL of a usable emoji tag: an `Emoji` with a shortcode and an icon.
    #[must_use]
    pub fn emoji_icon_url(&self) -> Option<&str> {
        if self.kind != TagKind::Emoji || self.name.is_empty() {
            return None;
        }
        self.icon.as_ref().and_then(|icon| icon.url.as_deref())
    }
}

/// Entities that carry a `tag` list.
pub trait Tagged {
    /// Normalized tag list (empty when the entity had none).
    fn tags(&self) -> &[ApTag];
}

/// `ActivityPub` Image object.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApImage {
    #[serde(rename = "type", default = "default_image_kind")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

fn default_image_kind() -> String {
    "Image".to_string()
}

impl ApImage {
    /// Create an image reference.
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            kind: default_image_kind(),
            url: Some(url.to_string()),
            media_type: None,
        }
    }
}

/// Attachment kinds.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum AttachmentKind {
    PropertyValue,
    Document,
    IdentityProof,
    #[default]
    #[serde(other)]
    Other,
}

/// `ActivityPub` attachment (file, profile field or identity proof).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApAttachment {
    #[serde(rename = "type", default)]
    pub kind: AttachmentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation_of: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blurhash: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_dimension",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_dimension",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<u32>,
}

impl ApAttachment {
    /// Create a `Document` attachment.
    #[must_use]
    pub fn document(url: &str, media_type: &str) -> Self {
        Self {
            kind: AttachmentKind::Document,
            name: None,
            value: None,
            hash: None,
            mutation_of: None,
            media_type: Some(media_type.to_string()),
            url: Some(url.to_string()),
            blurhash: None,
            width: None,
            height: None,
        }
    }

    /// Set the declared dimensions.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// Link-preview metadata computed by the server for URLs in a note.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_site_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_type: Option<String>,
}

impl Metadata {
    /// Preferred title: Open Graph, then Twitter card.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.og_title.as_deref().or(self.twitter_title.as_deref())
    }

    /// Preferred description: Open Graph, Twitter card, then plain `description`.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.og_description
            .as_deref()
            .or(self.twitter_description.as_deref())
            .or(self.description.as_deref())
    }

    /// Preferred preview image: Open Graph, then Twitter card.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.og_image.as_deref().or(self.twitter_image.as_deref())
    }
}
