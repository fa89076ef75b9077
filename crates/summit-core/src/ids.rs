//! Identifier generation and timestamp normalization.
//!
//! Identifiers are UUID v7 values rendered as simple hex behind a readable
//! prefix (`obj-…`, `plan-…`, `task-…`). Timestamps are UTC instants truncated
//! to millisecond precision and rendered in one fixed-width format, so string
//! order and chronological order agree.

use jiff::Timestamp;
use uuid::Uuid;

/// Prefix used for objective identifiers.
pub const OBJECTIVE_PREFIX: &str = "obj";
/// Prefix used for plan identifiers.
pub const PLAN_PREFIX: &str = "plan";
/// Prefix used for plan task identifiers.
pub const TASK_PREFIX: &str = "task";

/// Generates a new identifier, optionally namespaced with `prefix`.
///
/// # Examples
///
/// ```rust
/// use summit_core::ids::new_id;
///
/// let id = new_id(Some("obj"));
/// assert!(id.starts_with("obj-"));
/// assert_eq!(new_id(None).len(), 32);
/// ```
pub fn new_id(prefix: Option<&str>) -> String {
    let opaque = Uuid::now_v7().simple().to_string();
    match prefix {
        Some(prefix) => format!("{prefix}-{opaque}"),
        None => opaque,
    }
}

/// Returns the current instant truncated to millisecond precision.
pub fn now() -> Timestamp {
    let ts = Timestamp::now();
    Timestamp::from_millisecond(ts.as_millisecond()).unwrap_or(ts)
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn format_timestamp(ts: &Timestamp) -> String {
    format!(
        "{}.{:03}Z",
        ts.strftime("%Y-%m-%dT%H:%M:%S"),
        ts.subsec_millisecond().unsigned_abs()
    )
}

/// Parses a timestamp previously produced by [`format_timestamp`] (or any
/// RFC 3339 instant).
pub fn parse_timestamp(value: &str) -> Result<Timestamp, jiff::Error> {
    value.parse::<Timestamp>()
}

/// Serde adapter that writes timestamps in the fixed wire format.
pub mod wire_timestamp {
    use jiff::Timestamp;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_ids_are_unique() {
        let ids: std::collections::HashSet<String> =
            (0..1000).map(|_| new_id(Some(TASK_PREFIX))).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.starts_with("task-")));
    }

    #[test]
    fn test_successive_ids_sort_in_creation_order() {
        let first = new_id(Some(PLAN_PREFIX));
        let second = new_id(Some(PLAN_PREFIX));
        assert!(first < second);
    }

    #[test]
    fn test_format_is_fixed_width() {
        let whole = Timestamp::from_second(1_640_995_200).unwrap();
        assert_eq!(format_timestamp(&whole), "2022-01-01T00:00:00.000Z");

        let fractional = Timestamp::from_millisecond(1_640_995_200_042).unwrap();
        assert_eq!(format_timestamp(&fractional), "2022-01-01T00:00:00.042Z");
    }

    #[test]
    fn test_string_order_matches_time_order() {
        let earlier = Timestamp::from_millisecond(1_640_995_200_999).unwrap();
        let later = Timestamp::from_millisecond(1_640_995_201_000).unwrap();
        assert!(format_timestamp(&earlier) < format_timestamp(&later));
    }

    #[test]
    fn test_now_has_millisecond_precision() {
        let ts = now();
        assert_eq!(ts.subsec_nanosecond() % 1_000_000, 0);
        let parsed = parse_timestamp(&format_timestamp(&ts)).unwrap();
        assert_eq!(parsed, ts);
    }
}
