//! The federated object tagged union.

use enigmatick_common::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::note::{ApArticle, ApNote, ApQuestion};
use super::tag::{ApTag, Tagged};

/// Object kinds this client renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Note,
    EncryptedNote,
    Article,
    Question,
}

impl ObjectKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 4] = [Self::Note, Self::EncryptedNote, Self::Article, Self::Question];

    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::EncryptedNote => "EncryptedNote",
            Self::Article => "Article",
            Self::Question => "Question",
        }
    }

    /// Parse a wire `type` value.
    #[must_use]
    pub fn from_type(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == kind)
    }
}

/// A content object received from a local or remote server, discriminated by `type`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum FederatedObject {
    Note(ApNote),
    EncryptedNote(ApNote),
    Article(ApArticle),
    Question(ApQuestion),
}

impl FederatedObject {
    /// Parse a raw JSON object, rejecting kinds this client does not render.
    pub fn from_value(value: Value) -> AppResult<Self> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::Malformed("object without a string `type`".to_string()))?;

        if ObjectKind::from_type(kind).is_none() {
            return Err(AppError::Unsupported(kind.to_string()));
        }

        Ok(serde_json::from_value(value)?)
    }

    /// The discriminant.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        match self {
            Self::Note(_) => ObjectKind::Note,
            Self::EncryptedNote(_) => ObjectKind::EncryptedNote,
            Self::Article(_) => ObjectKind::Article,
            Self::Question(_) => ObjectKind::Question,
        }
    }

    #[must_use]
    pub const fn is_note(&self) -> bool {
        matches!(self, Self::Note(_))
    }

    #[must_use]
    pub const fn is_encrypted_note(&self) -> bool {
        matches!(self, Self::EncryptedNote(_))
    }

    #[must_use]
    pub const fn is_article(&self) -> bool {
        matches!(self, Self::Article(_))
    }

    #[must_use]
    pub const fn is_question(&self) -> bool {
        matches!(self, Self::Question(_))
    }

    /// Shared body.
    #[must_use]
    pub const fn body(&self) -> &ApNote {
        match self {
            Self::Note(note) | Self::EncryptedNote(note) => note,
            Self::Article(article) => &article.note,
            Self::Question(question) => &question.note,
        }
    }

    /// Shared body, mutably.
    pub const fn body_mut(&mut self) -> &mut ApNote {
        match self {
            Self::Note(note) | Self::EncryptedNote(note) => note,
            Self::Article(article) => &mut article.note,
            Self::Question(question) => &mut question.note,
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.body().id.as_deref()
    }

    #[must_use]
    pub fn in_reply_to(&self) -> Option<&str> {
        self.body().in_reply_to.as_deref()
    }

    /// Article title, if this is an article.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Article(article) => article.name.as_deref(),
            _ => None,
        }
    }

    /// Poll body, if this is a question.
    #[must_use]
    pub const fn as_question(&self) -> Option<&ApQuestion> {
        match self {
            Self::Question(question) => Some(question),
            _ => None,
        }
    }
}

impl Tagged for FederatedObject {
    fn tags(&self) -> &[ApTag] {
        &self.body().tag
    }
}
