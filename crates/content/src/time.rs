//! Relative time labels.

use chrono::{DateTime, Utc};

const YEAR: i64 = 31_536_000;
const MONTH: i64 = 2_592_000;
const DAY: i64 = 86_400;
const HOUR: i64 = 3_600;
const MINUTE: i64 = 60;

/// Compact label for the time elapsed from `then` to `now` (`3yr`, `2mo`,
/// `5d`, `4h`, `12m`, `30s`).
///
/// A unit is used once strictly more than one of it has elapsed. Future
/// timestamps count as zero seconds.
#[must_use]
pub fn time_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);

    for (unit, suffix) in [
        (YEAR, "yr"),
        (MONTH, "mo"),
        (DAY, "d"),
        (HOUR, "h"),
        (MINUTE, "m"),
    ] {
        if seconds > unit {
            return format!("{}{suffix}", seconds / unit);
        }
    }
    format!("{seconds}s")
}
