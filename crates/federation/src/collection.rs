//! `ActivityPub` collections and collection pages.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::activities::Activity;
use crate::identity::{PageCursor, extract_page_cursor};

/// Collection discriminant.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum CollectionKind {
    Collection,
    CollectionPage,
    OrderedCollection,
    OrderedCollectionPage,
}

/// A page link, either a URL or an embedded page.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PageRef {
    Url(String),
    Page(Box<ApCollection>),
}

impl PageRef {
    /// URL of the linked page.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url),
            Self::Page(page) => page.id.as_deref(),
        }
    }
}

/// Navigation relation of a page link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageRel {
    First,
    Next,
    Prev,
    Last,
}

/// A resolved page link with its pagination cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLink {
    pub rel: PageRel,
    pub href: String,
    pub cursor: PageCursor,
}

/// `ActivityPub` collection or collection page.
///
/// `total_items` comes from the server and is only a hint: after paging,
/// the number of items actually materialized is what callers should trust.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApCollection {
    #[serde(rename = "@context", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(rename = "type")]
    pub kind: CollectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ordered_items: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<PageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<PageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of: Option<String>,
}

impl ApCollection {
    /// Create an empty ordered collection page.
    #[must_use]
    pub const fn page(id: Option<String>) -> Self {
        Self {
            context: None,
            kind: CollectionKind::OrderedCollectionPage,
            id,
            total_items: None,
            items: Vec::new(),
            ordered_items: Vec::new(),
            first: None,
            last: None,
            next: None,
            prev: None,
            part_of: None,
        }
    }

    /// Raw items, `orderedItems` first.
    pub fn raw_items(&self) -> impl Iterator<Item = &Value> {
        self.ordered_items.iter().chain(&self.items)
    }

    /// Parse items as activities, skipping entries that do not parse.
    #[must_use]
    pub fn activities(&self) -> Vec<Activity> {
        self.raw_items()
            .enumerate()
            .filter_map(|(index, raw)| match Activity::from_value(raw.clone()) {
                Ok(activity) => Some(activity),
                Err(e) => {
                    warn!(
                        collection = self.id.as_deref().unwrap_or_default(),
                        index,
                        error = %e,
                        "Skipping collection item"
                    );
                    None
                }
            })
            .collect()
    }

    /// Server-reported item count. Not authoritative once pages are merged.
    #[must_use]
    pub const fn total_items_hint(&self) -> Option<u64> {
        self.total_items
    }

    /// Number of items present in this document.
    #[must_use]
    pub fn materialized_len(&self) -> usize {
        self.ordered_items.len() + self.items.len()
    }

    /// Navigation links with their cursors, in first/next/prev/last order.
    #[must_use]
    pub fn page_links(&self) -> Vec<PageLink> {
        [
            (PageRel::First, &self.first),
            (PageRel::Next, &self.next),
            (PageRel::Prev, &self.prev),
            (PageRel::Last, &self.last),
        ]
        .into_iter()
        .filter_map(|(rel, link)| {
            let href = link.as_ref()?.href()?;
            Some(PageLink {
                rel,
                href: href.to_string(),
                cursor: extract_page_cursor(href),
            })
        })
        .collect()
    }
}
