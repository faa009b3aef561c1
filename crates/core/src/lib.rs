//! Conversation reconstruction for the enigmatick client.
//!
//! - **Decryption**: content dispatch for encrypted notes via [`dispatch_content`]
//! - **Display**: [`DisplayNote`] trees assembled by [`Thread`]
//! - **Render**: serializable [`RenderedNote`] projections under a [`RenderContext`]

pub mod decrypt;
pub mod display;
pub mod render;

pub use decrypt::{
    DECRYPTION_FAILURE_MARKUP, Decryptor, activity_content, dispatch_content, find_vault_item,
    queue_item_content,
};
pub use display::*;
pub use render::{RenderContext, RenderedAuthor, RenderedNote};
