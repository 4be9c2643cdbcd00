//! Serde glue for optional due dates.
//!
//! Dates are written as `YYYY-MM-DD`. On the way in, full timestamps are
//! accepted too, since older documents stored the date picker's value as
//! an ISO-8601 date-time. A string that is no date at all is logged and
//! read as "no due date" so the rest of the document still loads.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};
use tracing::warn;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse the textual form of a due date.
///
/// Accepts a plain date, an RFC 3339 timestamp (the date is taken in the
/// timestamp's own offset), or a naive `YYYY-MM-DDTHH:MM:SS` timestamp.
pub fn parse_due_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(date) => serializer.serialize_str(&format_due_date(*date)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|text| {
        let date = parse_due_date(&text);
        if date.is_none() {
            warn!(due_date = %text, "unreadable due date, dropping it");
        }
        date
    }))
}
