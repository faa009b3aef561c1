//! `ActivityPub` actor types.

#![allow(missing_docs)]

mod person;
mod terse;

use serde::{Deserialize, Serialize};

pub use person::{ActorRef, ApPerson, ApPublicKey, Capabilities, ProfileEphemeral};
pub use terse::ApActorRef;

use crate::objects::{ApImage, ApTag, Tagged};

/// An actor in either of the two shapes servers send.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Actor {
    /// Full profile with collections and key material.
    Profile(Box<ApPerson>),
    /// Terse reference.
    Terse(ApActorRef),
}

impl Actor {
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Profile(profile) => profile.id.as_deref(),
            Self::Terse(terse) => Some(&terse.id),
        }
    }

    #[must_use]
    pub fn preferred_username(&self) -> &str {
        match self {
            Self::Profile(profile) => &profile.preferred_username,
            Self::Terse(terse) => &terse.preferred_username,
        }
    }

    /// Browsable profile URL.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Profile(profile) => profile.url.as_deref(),
            Self::Terse(terse) => terse.url.as_deref(),
        }
    }

    /// Display name, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        let name = match self {
            Self::Profile(profile) => profile.name.as_deref(),
            Self::Terse(terse) => terse.name.as_deref(),
        };
        name.filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.preferred_username())
    }

    #[must_use]
    pub fn icon(&self) -> Option<&ApImage> {
        match self {
            Self::Profile(profile) => profile.icon.as_ref(),
            Self::Terse(terse) => terse.icon.as_ref(),
        }
    }

    /// Full profile, when this is one.
    #[must_use]
    pub fn as_profile(&self) -> Option<&ApPerson> {
        match self {
            Self::Profile(profile) => Some(profile),
            Self::Terse(_) => None,
        }
    }
}

impl From<ApPerson> for Actor {
    fn from(profile: ApPerson) -> Self {
        Self::Profile(Box::new(profile))
    }
}

impl From<ApActorRef> for Actor {
    fn from(terse: ApActorRef) -> Self {
        Self::Terse(terse)
    }
}

impl Tagged for Actor {
    fn tags(&self) -> &[ApTag] {
        match self {
            Self::Profile(profile) => profile.tags(),
            Self::Terse(terse) => terse.tags(),
        }
    }
}
