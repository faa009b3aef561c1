//! `ActivityPub` object model for the enigmatick client.
//!
//! Payloads arrive from servers running different schema versions. This
//! crate normalizes them at the boundary into one model:
//!
//! - **Objects**: Note, `EncryptedNote`, Article, Question
//! - **Activities**: Create and Announce, with attached instruments
//! - **Actors**: full profiles and terse references
//! - **Collections**: pages with `max`/`min` cursors
//! - **Queue**: processing-queue items and vaulted messages
//! - **Identity**: webfinger handles, resource ids, origin checks
//!
//! # Schema drift
//!
//! Fields that servers send as either a single value or a list are always
//! lists here, and unparsable timestamps become `None` instead of failing
//! the whole object. Server annotations prefixed with `ephemeral` are kept
//! in separate side-channel structs.

pub mod activities;
pub mod actors;
pub mod audience;
pub mod collection;
pub mod identity;
pub mod normalize;
pub mod objects;

pub use activities::*;
pub use actors::*;
pub use audience::{PUBLIC_COLLECTION, addresses_public, is_public_recipient};
pub use collection::{ApCollection, CollectionKind, PageLink, PageRef, PageRel};
pub use identity::{
    PageCursor, extract_page_cursor, extract_resource_id, extract_resource_uuid,
    remote_profile_handle, same_origin, webfinger_of,
};
pub use objects::*;
