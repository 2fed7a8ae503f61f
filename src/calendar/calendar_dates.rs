//! Flexible date parsing for imported spreadsheet cells.
//
// Anything that is already `YYYY-MM-DD` is left alone. Other strings are
// parsed to an instant and reduced to the UTC calendar date of that instant.
// For a reading zone east or west of UTC this can move the date by a day;
// callers relying on local dates should keep the reading zone at UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::debug;

use crate::calendar::calendar_validation::validate_date_format;

/// Date-time layouts carrying an explicit offset, beyond RFC 3339 and RFC 2822.
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M:%S%z", "%Y-%m-%dT%H:%M%z"];

/// Date-time layouts read in the caller's zone.
const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts, read as midnight in the caller's zone. Month-name
/// directives accept both full and abbreviated names.
const LOCAL_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%d-%B-%Y",
    "%A, %B %d, %Y",
    "%a %B %d %Y",
];

/// Normalize a date cell, reading offset-less values in `tz`.
///
/// Returns the input unchanged when it is already ISO or cannot be parsed;
/// an unreadable date is never replaced with a made-up one.
pub fn normalize_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || validate_date_format(trimmed) {
        return trimmed.to_string();
    }
    match parse_instant(trimmed, tz) {
        Some(instant) => {
            let date = instant.date_naive().format("%Y-%m-%d").to_string();
            debug!("Normalized date '{}' to {}", trimmed, date);
            date
        }
        None => {
            debug!("Could not parse date '{}', keeping it as is", trimmed);
            raw.to_string()
        }
    }
}

/// Normalize a date cell, reading offset-less values as UTC.
pub fn normalize_date(raw: &str) -> String {
    normalize_date_in(raw, &Utc)
}

/// Parse a loosely formatted date or date-time to a UTC instant.
pub fn parse_instant<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in LOCAL_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return localize(&naive, tz);
        }
    }
    for format in LOCAL_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return localize(&date.and_hms_opt(0, 0, 0)?, tz);
        }
    }
    None
}

fn localize<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    // A wall-clock time skipped by a DST jump has no instant; treat it as unparseable
    tz.from_local_datetime(naive).earliest().map(|dt| dt.with_timezone(&Utc))
}
