//! Render-ready text and media for federated content.
//!
//! # Features
//!
//! - **Media proxy**: rewrite remote media URLs via [`rewrite_media_url`]
//! - **Emoji**: inline custom emoji via [`substitute_emoji`]
//! - **Attachments**: image and video markup via [`render_attachments`]
//! - **Previews**: plain text via [`strip_markup`]
//! - **Timestamps**: relative labels via [`time_since`]
//!
//! # Example
//!
//! ```
//! use enigmatick_content::{Base64UrlEncoder, MediaProxy, rewrite_media_url, strip_markup};
//!
//! let proxy = MediaProxy::new(Base64UrlEncoder);
//! let src = rewrite_media_url(Some(&proxy), "https://remote.example/a.png");
//! assert!(src.starts_with("/api/cache?url="));
//! assert_eq!(strip_markup(Some("<p>hi</p>")), " hi ");
//! ```

mod attachments;
mod emoji;
mod markup;
mod media;
mod time;

pub use attachments::render_attachments;
pub use emoji::substitute_emoji;
pub use markup::{html_escape, strip_markup};
pub use media::{
    Base64UrlEncoder, DEFAULT_CACHE_ENDPOINT, MediaEncoder, MediaProxy, rewrite_media_url,
};
pub use time::time_since;
