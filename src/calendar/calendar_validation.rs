//! Validation helpers for calendar event dates.
//
// Checks here look at the shape of a date string, not whether the day
// exists.

use chrono::{Datelike, NaiveDate};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::calendar::calendar_types::CalendarEvent;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("ISO date pattern is valid"));

static YEAR_MONTH_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(\d{1,2})").expect("year-month pattern is valid"));

/// Validate date string has format YYYY-MM-DD
pub fn validate_date_format(date: &str) -> bool {
    ISO_DATE.is_match(date)
}

/// Month component (1-12) of an ISO-style date string.
pub fn month_of(date: &str) -> Option<u32> {
    let date = date.trim();
    if let Ok(naive) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(naive.month());
    }
    // Shape-valid but impossible days ("2026-02-30") still carry a usable month
    let month: u32 = YEAR_MONTH_PREFIX.captures(date)?.get(1)?.as_str().parse().ok()?;
    (1..=12).contains(&month).then_some(month)
}

/// Log anything about an event that would draw oddly on the timeline.
/// Returns false when a problem was found; never rejects the event.
pub fn check_event_dates(event: &CalendarEvent) -> bool {
    let start = NaiveDate::parse_from_str(&event.start_date, "%Y-%m-%d");
    let end = NaiveDate::parse_from_str(&event.end_date, "%Y-%m-%d");
    match (start, end) {
        (Ok(start), Ok(end)) if start > end => {
            warn!("Event '{}' ends ({}) before it starts ({})", event.title, end, start);
            false
        }
        (Ok(_), Ok(_)) => true,
        _ => {
            warn!(
                "Event '{}' has a non-ISO date range: {} - {}",
                event.title, event.start_date, event.end_date
            );
            false
        }
    }
}
