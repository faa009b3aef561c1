//! Serializable render projection of display notes.

use chrono::{DateTime, Utc};
use enigmatick_common::RenderConfig;
use enigmatick_content::{
    Base64UrlEncoder, MediaProxy, render_attachments, rewrite_media_url, strip_markup,
    substitute_emoji, time_since,
};
use enigmatick_federation::{Actor, webfinger_of};
use serde::Serialize;

use crate::decrypt::{Decryptor, dispatch_content};
use crate::display::{
    AnnounceParams, DisplayNote, Thread, boost_summary, count_replies, first_announcer,
    order_siblings,
};

/// Capabilities and clock shared by every render call.
///
/// Built once at the application boundary.
pub struct RenderContext {
    decryptor: Option<Box<dyn Decryptor>>,
    media: Option<MediaProxy>,
    now: DateTime<Utc>,
}

impl RenderContext {
    /// Context without capabilities.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            decryptor: None,
            media: None,
            now,
        }
    }

    /// Context with the media proxy described by `config`.
    #[must_use]
    pub fn from_config(config: &RenderConfig, now: DateTime<Utc>) -> Self {
        let context = Self::new(now);
        if config.proxy_media {
            context.with_media_proxy(
                MediaProxy::new(Base64UrlEncoder).with_endpoint(config.cache_endpoint.clone()),
            )
        } else {
            context
        }
    }

    /// Attach the decryption capability.
    #[must_use]
    pub fn with_decryptor(mut self, decryptor: impl Decryptor + 'static) -> Self {
        self.decryptor = Some(Box::new(decryptor));
        self
    }

    /// Attach the media proxy.
    #[must_use]
    pub fn with_media_proxy(mut self, proxy: MediaProxy) -> Self {
        self.media = Some(proxy);
        self
    }

    /// Decryption capability, if wired.
    #[must_use]
    pub fn decryptor(&self) -> Option<&dyn Decryptor> {
        self.decryptor.as_deref()
    }

    /// Media proxy, if wired.
    #[must_use]
    pub const fn media(&self) -> Option<&MediaProxy> {
        self.media.as_ref()
    }

    /// Reference time for fallbacks and ages.
    #[must_use]
    pub const fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("decryptor", &self.decryptor.is_some())
            .field("media", &self.media)
            .field("now", &self.now)
            .finish()
    }
}

/// Author line of a rendered note.
#[derive(Clone, Debug, Serialize)]
pub struct RenderedAuthor {
    /// Actor id.
    pub id: Option<String>,
    /// `@user@domain`, or the profile URL when no handle can be derived.
    pub handle: String,
    /// Display name with custom emoji inlined.
    pub display_name: String,
    /// Avatar URL, proxied when a media proxy is wired.
    pub icon: Option<String>,
}

/// A display note resolved to text and markup.
#[derive(Clone, Debug, Serialize)]
pub struct RenderedNote {
    /// Key of the display note.
    pub key: String,
    /// Object `type`.
    pub kind: &'static str,
    /// Parent object id.
    pub in_reply_to: Option<String>,
    /// Resolved author.
    pub author: RenderedAuthor,
    /// Article title.
    pub title: Option<String>,
    /// Content warning.
    pub summary: Option<String>,
    /// Content after decryption and emoji substitution.
    pub content: String,
    /// Plain-text preview of `content`.
    pub preview: String,
    /// Image and video markup.
    pub attachments: String,
    /// Addressed to the public audience.
    pub public: bool,
    /// Resolved publication time.
    pub published: DateTime<Utc>,
    /// Resolved creation time used for ordering.
    pub created_at: DateTime<Utc>,
    /// Relative age of `published`.
    pub age: String,
    /// Likes reported by the server.
    pub like_count: usize,
    /// Announces reported by the server.
    pub announce_count: usize,
    /// "Boosted by" line.
    pub boost: Option<AnnounceParams>,
    /// Title of the first link preview.
    pub link_title: Option<String>,
    /// Descendants at any depth.
    pub reply_count: usize,
    /// Direct replies in display order.
    pub replies: Vec<RenderedNote>,
}

fn render_author(actor: &Actor, ctx: &RenderContext) -> RenderedAuthor {
    let media = ctx.media();
    RenderedAuthor {
        id: actor.id().map(str::to_string),
        handle: webfinger_of(actor),
        display_name: substitute_emoji(media, actor.display_name(), actor),
        icon: actor
            .icon()
            .and_then(|icon| icon.url.as_deref())
            .map(|url| rewrite_media_url(media, url)),
    }
}

impl DisplayNote {
    /// Resolve this note and its replies for display.
    #[must_use]
    pub fn render(&self, ctx: &RenderContext) -> RenderedNote {
        let body = self.object.body();
        let media = ctx.media();

        let instruments = self
            .activity
            .as_ref()
            .map_or(&[][..], |activity| activity.instrument.as_slice());
        let content = substitute_emoji(
            media,
            &dispatch_content(&self.object, instruments, ctx.decryptor()),
            &self.object,
        );

        let boost = boost_summary(self).map(|mut boost| {
            if let Some(announcer) = first_announcer(self) {
                boost.name = substitute_emoji(media, &boost.name, &announcer);
            }
            boost
        });

        RenderedNote {
            key: self.key.clone(),
            kind: self.object.kind().as_str(),
            in_reply_to: self.in_reply_to().map(str::to_string),
            author: render_author(&self.actor, ctx),
            title: self.object.title().map(str::to_string),
            summary: body.summary.clone(),
            preview: strip_markup(Some(&content)),
            content,
            attachments: render_attachments(&body.attachment),
            public: self.public,
            published: self.published,
            created_at: self.created_at,
            age: time_since(self.published, ctx.now()),
            like_count: body.ephemeral.like_count(),
            announce_count: body.ephemeral.announce_count(),
            boost,
            link_title: body
                .ephemeral
                .ephemeral_metadata
                .iter()
                .find_map(|metadata| metadata.title())
                .map(str::to_string),
            reply_count: count_replies(self),
            replies: self
                .sorted_replies()
                .into_iter()
                .map(|reply| reply.render(ctx))
                .collect(),
        }
    }
}

impl Thread {
    /// Render roots and orphaned subtrees in display order.
    #[must_use]
    pub fn render(&self, ctx: &RenderContext) -> Vec<RenderedNote> {
        let mut top: Vec<&DisplayNote> = self.top_level().collect();
        top.sort_by(|a, b| order_siblings(a, b));
        top.into_iter().map(|node| node.render(ctx)).collect()
    }
}
