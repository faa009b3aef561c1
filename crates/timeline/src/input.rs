//! Reading fetched payloads from disk.

use std::path::Path;

use enigmatick_common::AppResult;
use enigmatick_federation::{Activity, ApCollection};
use serde_json::Value;
use tracing::{info, warn};

const COLLECTION_TYPES: [&str; 4] = [
    "Collection",
    "CollectionPage",
    "OrderedCollection",
    "OrderedCollectionPage",
];

/// Read the activities held in the JSON file at `path`.
pub fn read_activities(path: &Path) -> AppResult<Vec<Activity>> {
    let raw = std::fs::read_to_string(path)?;
    activities_from_value(serde_json::from_str(&raw)?)
}

/// Activities from a collection page, an array of activities, or a single
/// activity.
///
/// Collection and array entries that do not parse are skipped; a single
/// activity that does not parse is an error.
pub fn activities_from_value(value: Value) -> AppResult<Vec<Activity>> {
    let is_collection = value
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|kind| COLLECTION_TYPES.contains(&kind));

    if is_collection {
        let collection: ApCollection = serde_json::from_value(value)?;
        for link in collection.page_links() {
            info!(
                rel = ?link.rel,
                href = %link.href,
                cursor = link.cursor.value().unwrap_or_default(),
                "Page link"
            );
        }
        let activities = collection.activities();
        info!(
            reported = collection.total_items_hint(),
            materialized = collection.materialized_len(),
            "Read collection page"
        );
        return Ok(activities);
    }

    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match Activity::from_value(item) {
                Ok(activity) => Some(activity),
                Err(e) => {
                    warn!(index, error = %e, "Skipping array item");
                    None
                }
            })
            .collect()),
        other => Ok(vec![Activity::from_value(other)?]),
    }
}
