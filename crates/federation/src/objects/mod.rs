//! `ActivityPub` object types.

#![allow(missing_docs)]

mod note;
mod object;
mod tag;

pub use note::{ApArticle, ApNote, ApPollOption, ApPollReplies, ApQuestion, NoteEphemeral};
pub use object::{FederatedObject, ObjectKind};
pub use tag::{ApAttachment, ApImage, ApTag, AttachmentKind, Metadata, TagKind, Tagged};
