//! Wire format for record timestamps.
//!
//! Timestamps travel as ISO-8601 UTC with whole seconds and a `Z`
//! designator, e.g. `2025-01-15T10:30:00Z`. Use with
//! `#[serde(with = "customer_service_core::types::timestamp")]`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Format a timestamp in the wire format.
#[must_use]
pub fn format(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Serialize a timestamp in the wire format.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(at))
}

/// Deserialize any RFC 3339 timestamp and normalize it to UTC.
///
/// # Errors
///
/// Returns a deserializer error if the input is not valid RFC 3339.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}
