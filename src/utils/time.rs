//! Time helpers

use chrono::{SecondsFormat, Utc};

/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current UTC time as an ISO-8601 string with millisecond precision.
///
/// Lexicographic order equals chronological order, which the audit log
/// read-back relies on.
pub fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
