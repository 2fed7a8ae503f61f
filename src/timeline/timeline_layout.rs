//! Row packing for the campaign Gantt view.
//
// Events of one category are laid out in horizontal rows so that no two
// events sharing a row overlap by month. Placement is greedy in list order:
// each event takes the first row it fits in, or opens a new one. Months are
// compared without their year, so a January campaign in 2025 and one in 2026
// collide.

use log::{debug, warn};

use crate::calendar::{CalendarEvent, CanonicalCategory, MonthSpan};

/// Rows of events per category, in the order the categories were requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAssignment<'a> {
    bands: Vec<(CanonicalCategory, Vec<Vec<&'a CalendarEvent>>)>,
}

impl<'a> RowAssignment<'a> {
    /// Rows of a category, or `None` if it was not part of the packing.
    pub fn rows(&self, category: CanonicalCategory) -> Option<&[Vec<&'a CalendarEvent>]> {
        self.bands.iter().find(|(c, _)| *c == category).map(|(_, rows)| rows.as_slice())
    }

    pub fn row_count(&self, category: CanonicalCategory) -> usize {
        self.rows(category).map_or(0, <[_]>::len)
    }

    pub fn categories(&self) -> impl Iterator<Item = CanonicalCategory> + '_ {
        self.bands.iter().map(|(c, _)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalCategory, &[Vec<&'a CalendarEvent>])> {
        self.bands.iter().map(|(c, rows)| (*c, rows.as_slice()))
    }

    /// Category and row index holding the event with `id`.
    pub fn row_index_of(&self, id: &str) -> Option<(CanonicalCategory, usize)> {
        self.bands.iter().find_map(|(category, rows)| {
            rows.iter().position(|row| row.iter().any(|e| e.id == id)).map(|index| (*category, index))
        })
    }

    /// Total number of rows across all categories.
    pub fn total_rows(&self) -> usize {
        self.bands.iter().map(|(_, rows)| rows.len()).sum()
    }
}

/// A row under construction, keeping each event's span next to it.
struct Lane<'a> {
    placed: Vec<(&'a CalendarEvent, Option<MonthSpan>)>,
}

impl<'a> Lane<'a> {
    /// An event without a readable span never shares a row.
    fn accepts(&self, span: Option<MonthSpan>) -> bool {
        let Some(span) = span else {
            return self.placed.is_empty();
        };
        self.placed.iter().all(|(_, other)| matches!(other, Some(other) if !span.overlaps(other)))
    }

    fn into_events(self) -> Vec<&'a CalendarEvent> {
        self.placed.into_iter().map(|(event, _)| event).collect()
    }
}

/// Pack `events` into rows for each category in `category_order`.
///
/// Categories missing from `category_order` are skipped; a category listed
/// twice is packed once. Each packed category has at least one row, empty if
/// no event belongs to it.
pub fn pack<'a>(events: &'a [CalendarEvent], category_order: &[CanonicalCategory]) -> RowAssignment<'a> {
    let mut bands: Vec<(CanonicalCategory, Vec<Vec<&'a CalendarEvent>>)> = Vec::with_capacity(category_order.len());

    for &category in category_order {
        if bands.iter().any(|(c, _)| *c == category) {
            debug!("Category {} listed twice, packing it once", category);
            continue;
        }

        let mut lanes: Vec<Lane<'a>> = Vec::new();
        for event in events.iter().filter(|e| e.category == category) {
            let span = event.month_span();
            if span.is_none() {
                warn!(
                    "Event '{}' has no readable month ({} - {}), giving it its own row",
                    event.title, event.start_date, event.end_date
                );
            }
            match lanes.iter_mut().find(|lane| lane.accepts(span)) {
                Some(lane) => lane.placed.push((event, span)),
                None => lanes.push(Lane { placed: vec![(event, span)] }),
            }
        }

        let mut rows: Vec<Vec<&'a CalendarEvent>> = lanes.into_iter().map(Lane::into_events).collect();
        if rows.is_empty() {
            rows.push(Vec::new());
        }
        debug!("Packed category {} into {} row(s)", category, rows.len());
        bands.push((category, rows));
    }

    RowAssignment { bands }
}

/// Pack using the standard category display order.
pub fn pack_default(events: &[CalendarEvent]) -> RowAssignment<'_> {
    pack(events, CanonicalCategory::display_order())
}
