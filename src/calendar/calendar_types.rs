//! Core calendar types shared by the import normalizer and the timeline packer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar::calendar_validation::month_of;

/// Status given to every event that does not carry one of its own.
pub const DEFAULT_STATUS: &str = "Planned";

/// Display tier of a campaign. The labels are part of the external contract
/// and must match stored data exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum CanonicalCategory {
    #[serde(rename = "Overarching Campaign")]
    OverarchingCampaign,
    #[serde(rename = "Category-Led")]
    CategoryLed,
    #[serde(rename = "Campaigns")]
    Campaigns,
    #[serde(rename = "Other Global Campaigns")]
    #[default]
    OtherGlobalCampaigns,
    #[serde(rename = "Other Local Campaigns")]
    OtherLocalCampaigns,
}

impl CanonicalCategory {
    /// All categories in timeline display order.
    pub const ALL: [CanonicalCategory; 5] = [
        CanonicalCategory::OverarchingCampaign,
        CanonicalCategory::CategoryLed,
        CanonicalCategory::Campaigns,
        CanonicalCategory::OtherGlobalCampaigns,
        CanonicalCategory::OtherLocalCampaigns,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CanonicalCategory::OverarchingCampaign => "Overarching Campaign",
            CanonicalCategory::CategoryLed => "Category-Led",
            CanonicalCategory::Campaigns => "Campaigns",
            CanonicalCategory::OtherGlobalCampaigns => "Other Global Campaigns",
            CanonicalCategory::OtherLocalCampaigns => "Other Local Campaigns",
        }
    }

    /// Exact label match only. Free-text mapping lives in the import module.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }

    pub fn display_order() -> &'static [CanonicalCategory] {
        &Self::ALL
    }
}

impl fmt::Display for CanonicalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `[start_month, end_month]` of an event, 1-12, with year and day discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpan {
    pub start: u32,
    pub end: u32,
}

impl MonthSpan {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Two spans intersect unless one ends before the other starts.
    pub fn overlaps(&self, other: &MonthSpan) -> bool {
        !(self.end < other.start || self.start > other.end)
    }

    /// Zero-based start column and width on a 12-column grid. A span whose
    /// end month precedes its start month (a campaign crossing New Year) is
    /// clipped at December.
    pub fn grid_columns(&self) -> (usize, usize) {
        let start = self.start.clamp(1, 12) as usize;
        let end = self.end.clamp(1, 12) as usize;
        let width = if end >= start { end - start + 1 } else { 13 - start };
        (start - 1, width)
    }
}

/// A dated campaign entry. Treated as immutable: edits produce a new value
/// with the same `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub category: CanonicalCategory,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

impl CalendarEvent {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        category: CanonicalCategory,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            category,
            status: default_status(),
        }
    }

    pub fn with_status(self, status: impl Into<String>) -> Self {
        Self { status: status.into(), ..self }
    }

    /// `None` when either date has no readable month component.
    pub fn month_span(&self) -> Option<MonthSpan> {
        Some(MonthSpan::new(month_of(&self.start_date)?, month_of(&self.end_date)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_category_labels_round_trip() {
        for category in CanonicalCategory::ALL {
            assert_eq!(CanonicalCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(CanonicalCategory::from_label("category-led"), None);
        assert_eq!(CanonicalCategory::default(), CanonicalCategory::OtherGlobalCampaigns);
    }

    #[test]
    fn test_display_order_matches_renderer_contract() {
        let labels: Vec<&str> =
            CanonicalCategory::display_order().iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Overarching Campaign",
                "Category-Led",
                "Campaigns",
                "Other Global Campaigns",
                "Other Local Campaigns",
            ]
        );
    }

    #[test]
    fn test_month_span_overlap() {
        let q1 = MonthSpan::new(1, 3);
        assert!(q1.overlaps(&MonthSpan::new(2, 2)));
        assert!(q1.overlaps(&MonthSpan::new(3, 5)));
        assert!(!q1.overlaps(&MonthSpan::new(4, 6)));
        assert!(!MonthSpan::new(4, 6).overlaps(&q1));
    }

    #[test]
    fn test_grid_columns() {
        assert_eq!(MonthSpan::new(1, 3).grid_columns(), (0, 3));
        assert_eq!(MonthSpan::new(12, 12).grid_columns(), (11, 1));
        assert_eq!(MonthSpan::new(11, 2).grid_columns(), (10, 2));
    }

    #[test]
    fn test_event_json_uses_camel_case() {
        let event = CalendarEvent::new("e1", "Spring Sale", "2026-03-01", "2026-04-15", CanonicalCategory::Campaigns);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["startDate"], "2026-03-01");
        assert_eq!(json["category"], "Campaigns");
        assert_eq!(json["status"], "Planned");

        let parsed: CalendarEvent = serde_json::from_str(
            r#"{"id":"x","title":"T","startDate":"2026-01-01","endDate":"2026-01-02","category":"Category-Led"}"#,
        )
        .unwrap();
        assert_eq!(parsed.status, DEFAULT_STATUS);
        assert_eq!(parsed.month_span(), Some(MonthSpan::new(1, 1)));
    }
}
