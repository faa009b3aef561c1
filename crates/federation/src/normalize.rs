//! Boundary normalization for loosely typed federated JSON.
//!
//! Servers disagree on whether a field holds one value or a list, whether a
//! reference is a bare URI or an embedded object, and how timestamps are
//! written. These deserializers fold all of those shapes into one internal
//! representation so nothing past the parse boundary has to care.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Deserialize a value that may be a single item, a list, `null` or absent.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
    })
}

/// Deserialize a list of references given as URIs or as objects carrying an `id`.
pub fn one_or_many_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Vec<Value> = one_or_many(deserializer)?;
    Ok(items.iter().filter_map(reference_id).collect())
}

/// Deserialize a list, dropping entries that do not fit `T`.
///
/// Used for enrichment data where one bad entry must not discard the object.
pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items: Vec<Value> = one_or_many(deserializer)?;
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Deserialize a timestamp, treating unparsable values as absent.
pub fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(parse_timestamp))
}

/// Deserialize a link-ish field: a string, a `Link` object with `href`, or a
/// list of either (first usable entry wins).
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(link_href))
}

/// Deserialize a single required reference (URI or object with `id`).
pub fn single_reference<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    reference_id(&raw).ok_or_else(|| serde::de::Error::custom("expected a URI or an object with an id"))
}

/// Deserialize an optional reference, taking the first usable entry of a
/// list. Anything else is absent.
pub fn optional_reference<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(items)) => items.iter().find_map(reference_id),
        Some(value) => reference_id(&value),
        None => None,
    })
}

/// Deserialize free text, treating `null` and non-strings as empty.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default())
}

/// Deserialize a pixel dimension given as an integer, a float or a numeric
/// string. Negative, oversized or unparsable values are absent.
pub fn lenient_dimension<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let number = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number
        .filter(|n| n.is_finite() && *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n.round() as u32))
}

/// Parse an RFC 3339 timestamp, accepting zone-less values as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn reference_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get("id").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn link_href(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map
            .get("href")
            .or_else(|| map.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string),
        Value::Array(items) => items.iter().find_map(link_href),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Addressed {
        #[serde(default, deserialize_with = "one_or_many_ids")]
        to: Vec<String>,
        #[serde(default, deserialize_with = "lenient_datetime")]
        published: Option<DateTime<Utc>>,
        #[serde(default, deserialize_with = "lenient_string")]
        url: Option<String>,
        #[serde(default, deserialize_with = "optional_reference")]
        in_reply_to: Option<String>,
        #[serde(default, deserialize_with = "lenient_dimension")]
        width: Option<u32>,
    }

    fn addressed(value: Value) -> Addressed {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_single_recipient_becomes_list() {
        let parsed = addressed(json!({ "to": "https://example.com/users/alice" }));
        assert_eq!(parsed.to, vec!["https://example.com/users/alice"]);
    }

    #[test]
    fn test_null_and_absent_recipients_are_empty() {
        assert!(addressed(json!({ "to": null })).to.is_empty());
        assert!(addressed(json!({})).to.is_empty());
    }

    #[test]
    fn test_embedded_recipient_objects() {
        let parsed = addressed(json!({
            "to": [{ "type": "Person", "id": "https://a.example/u/1" }, "as:Public", 7]
        }));
        assert_eq!(parsed.to, vec!["https://a.example/u/1", "as:Public"]);
    }

    #[test]
    fn test_bad_timestamp_is_absent() {
        assert!(addressed(json!({ "published": "yesterday-ish" })).published.is_none());
        assert!(addressed(json!({ "published": 1_700_000_000 })).published.is_none());
    }

    #[test]
    fn test_timestamp_formats() {
        let with_zone = parse_timestamp("2024-01-01T00:00:00Z").unwrap();
        let naive = parse_timestamp("2024-01-01T00:00:00.000").unwrap();
        let offset = parse_timestamp("2024-01-01T09:00:00+09:00").unwrap();
        assert_eq!(with_zone, naive);
        assert_eq!(with_zone, offset);
    }

    #[test]
    fn test_link_shapes() {
        let link = addressed(json!({ "url": { "type": "Link", "href": "https://a.example/x" } }));
        assert_eq!(link.url.as_deref(), Some("https://a.example/x"));

        let list = addressed(json!({ "url": [{ "href": "https://a.example/y" }, "https://b"] }));
        assert_eq!(list.url.as_deref(), Some("https://a.example/y"));
    }

    #[test]
    fn test_optional_reference_shapes() {
        let embedded = addressed(json!({
            "in_reply_to": { "type": "Note", "id": "https://a.example/notes/1" }
        }));
        assert_eq!(embedded.in_reply_to.as_deref(), Some("https://a.example/notes/1"));

        let listed = addressed(json!({ "in_reply_to": [7, "https://a.example/notes/2"] }));
        assert_eq!(listed.in_reply_to.as_deref(), Some("https://a.example/notes/2"));

        assert!(addressed(json!({ "in_reply_to": { "type": "Note" } })).in_reply_to.is_none());
        assert!(addressed(json!({ "in_reply_to": null })).in_reply_to.is_none());
    }

    #[test]
    fn test_dimension_shapes() {
        assert_eq!(addressed(json!({ "width": 640 })).width, Some(640));
        assert_eq!(addressed(json!({ "width": 640.0 })).width, Some(640));
        assert_eq!(addressed(json!({ "width": "480" })).width, Some(480));
        assert!(addressed(json!({ "width": -1 })).width.is_none());
        assert!(addressed(json!({ "width": "wide" })).width.is_none());
        assert!(addressed(json!({ "width": null })).width.is_none());
    }
}
