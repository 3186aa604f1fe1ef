//! Relative-age rendering for recorded transfer timestamps.

use ink::prelude::{format, string::String};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Renders how long ago `timestamp` was, seen from `now` (both in seconds).
///
/// Returns `None` when `timestamp` lies after `now`.
pub fn timestamp_to_string(timestamp: u64, now: u64) -> Option<String> {
    let elapsed = now.checked_sub(timestamp)?;
    let (count, unit) = if elapsed < MINUTE {
        (elapsed, "second")
    } else if elapsed < HOUR {
        (elapsed / MINUTE, "minute")
    } else if elapsed < DAY {
        (elapsed / HOUR, "hour")
    } else {
        (elapsed / DAY, "day")
    };
    let plural = if count == 1 { "" } else { "s" };
    Some(format!("{count} {unit}{plural} ago"))
}
