//! CSV import logic for the campaign calendar.
//
// Spreadsheet exports arrive with whatever headers and tier names their
// authors used. This module maps them onto `CalendarEvent`s: header aliases
// are resolved per field, dates are normalized, tier names are mapped onto
// the canonical categories, and rows without the required fields are dropped
// and counted.

use chrono_tz::Tz;
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use uuid::Uuid;

use crate::calendar::ImportError;
use crate::calendar::calendar_dates::normalize_date_in;
use crate::calendar::calendar_types::{CalendarEvent, CanonicalCategory, DEFAULT_STATUS};

/// One line of an imported table: header name to cell value, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawImportRow {
    cells: Vec<(String, String)>,
}

impl RawImportRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell, replacing any previous value under the exact same header.
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(h, _)| *h == header) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((header, value)),
        }
    }

    pub fn with(mut self, header: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(header, value);
        self
    }

    /// Exact header lookup.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells.iter().find(|(h, _)| h == header).map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(h, _)| h.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Resolve a logical field to its trimmed, non-empty value.
    ///
    /// Aliases are tried in priority order. For each alias the exact header
    /// is checked first, then any header matching it case-insensitively with
    /// surrounding whitespace ignored. Cells that are blank are skipped so a
    /// later alias can still supply the value.
    pub fn resolve(&self, field: ImportField) -> Option<&str> {
        field.aliases().iter().find_map(|alias| {
            non_blank(self.get(alias)).or_else(|| {
                let found = self.cells.iter().find(|(h, _)| h.trim().eq_ignore_ascii_case(alias));
                non_blank(found.map(|(_, v)| v.as_str()))
            })
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawImportRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawImportRow::new();
        for (header, value) in iter {
            row.insert(header, value);
        }
        row
    }
}

/// Logical columns understood by the importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportField {
    Title,
    StartDate,
    EndDate,
    Category,
}

impl ImportField {
    /// Accepted header spellings, in priority order. Existing import files
    /// depend on this table.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            ImportField::Title => &["title", "Title", "Campaign Name"],
            ImportField::StartDate => &["startDate", "startdate", "Start Date", "start_date"],
            ImportField::EndDate => &["endDate", "enddate", "End Date", "end_date"],
            ImportField::Category => &["tier", "Tier", "Category"],
        }
    }
}

/// Tier names seen in spreadsheets, mapped onto canonical categories.
const CATEGORY_ALIASES: &[(&str, CanonicalCategory)] = &[
    ("Overarching Campaigns", CanonicalCategory::OverarchingCampaign),
    ("Overarching", CanonicalCategory::OverarchingCampaign),
    ("Tier 1", CanonicalCategory::OverarchingCampaign),
    ("Category Led", CanonicalCategory::CategoryLed),
    ("Category-Led Campaigns", CanonicalCategory::CategoryLed),
    ("Category Led Campaigns", CanonicalCategory::CategoryLed),
    ("Tier 2", CanonicalCategory::CategoryLed),
    ("Omnichannel Campaigns", CanonicalCategory::Campaigns),
    ("Omnichannel", CanonicalCategory::Campaigns),
    ("Tier 3", CanonicalCategory::Campaigns),
    ("Global Campaigns", CanonicalCategory::OtherGlobalCampaigns),
    ("Global", CanonicalCategory::OtherGlobalCampaigns),
    ("Tier 4", CanonicalCategory::OtherGlobalCampaigns),
    ("Local Campaigns", CanonicalCategory::OtherLocalCampaigns),
    ("Local", CanonicalCategory::OtherLocalCampaigns),
    ("Tier 5", CanonicalCategory::OtherLocalCampaigns),
];

/// Map a free-text tier name to a canonical category. Canonical labels map to
/// themselves; anything unknown, including blank, falls back to
/// `Other Global Campaigns`.
pub fn normalize_category(raw: &str) -> CanonicalCategory {
    let label = raw.trim();
    if let Some(category) = CanonicalCategory::from_label(label) {
        return category;
    }
    match CATEGORY_ALIASES.iter().find(|(alias, _)| *alias == label) {
        Some((_, category)) => *category,
        None => {
            debug!("Unknown tier '{}', using {}", label, CanonicalCategory::default());
            CanonicalCategory::default()
        }
    }
}

/// Result of normalizing a batch of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub events: Vec<CalendarEvent>,
    pub rejected_count: usize,
}

impl ImportOutcome {
    /// True when nothing usable came out of the import.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn summary(&self) -> String {
        let imported = self.events.len();
        let mut summary = format!("Imported {} event{}", imported, plural(imported));
        if self.rejected_count > 0 {
            summary.push_str(&format!(
                ", skipped {} row{} missing a title or dates",
                self.rejected_count,
                plural(self.rejected_count)
            ));
        }
        summary
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Turns raw import rows into canonical calendar events.
#[derive(Debug, Clone)]
pub struct CalendarImportNormalizer {
    default_status: String,
    timezone: Tz,
}

impl Default for CalendarImportNormalizer {
    fn default() -> Self {
        Self { default_status: DEFAULT_STATUS.to_string(), timezone: Tz::UTC }
    }
}

impl CalendarImportNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status given to every imported event.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.default_status = status.into();
        self
    }

    /// Zone used to read dates that carry no offset of their own.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Normalize every row. Never fails: rows lacking a title, start date or
    /// end date are dropped and counted, and the kept events stay in input
    /// order.
    pub fn normalize(&self, rows: &[RawImportRow]) -> ImportOutcome {
        let mut outcome = ImportOutcome::default();
        for (index, row) in rows.iter().enumerate() {
            match self.normalize_row(row) {
                Some(event) => outcome.events.push(event),
                None => {
                    debug!("Skipping import row {}: missing title, start date or end date", index + 1);
                    outcome.rejected_count += 1;
                }
            }
        }
        info!("Normalized {} import rows: {}", rows.len(), outcome.summary());
        outcome
    }

    fn normalize_row(&self, row: &RawImportRow) -> Option<CalendarEvent> {
        let title = row.resolve(ImportField::Title)?;
        let start_date = normalize_date_in(row.resolve(ImportField::StartDate)?, &self.timezone);
        let end_date = normalize_date_in(row.resolve(ImportField::EndDate)?, &self.timezone);
        let category = normalize_category(row.resolve(ImportField::Category).unwrap_or_default());

        Some(CalendarEvent {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            start_date,
            end_date,
            category,
            status: self.default_status.clone(),
        })
    }
}

/// Normalize with default settings: status "Planned", dates read as UTC.
pub fn normalize(rows: &[RawImportRow]) -> ImportOutcome {
    CalendarImportNormalizer::default().normalize(rows)
}

/// Read a headed CSV stream into raw rows. Short records are allowed; their
/// missing trailing cells are simply absent from the row.
pub fn read_csv_rows<R: Read>(reader: R) -> Result<Vec<RawImportRow>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).trim(csv::Trim::Headers).from_reader(reader);

    let headers = csv_reader.headers().map_err(|e| ImportError::from_csv(e, 1))?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ImportError::MissingHeader);
    }

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        // Header is line 1
        let record = record.map_err(|e| ImportError::from_csv(e, index as u64 + 2))?;
        let row: RawImportRow = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, _)| !header.is_empty())
            .collect();
        rows.push(row);
    }
    debug!("Read {} CSV rows with headers {:?}", rows.len(), headers);
    Ok(rows)
}

/// Import events from a CSV file
pub fn import_csv_file(path: &Path, normalizer: &CalendarImportNormalizer) -> Result<ImportOutcome, ImportError> {
    info!("Importing calendar events from {}", path.display());
    let file = File::open(path)?;
    let rows = read_csv_rows(file)?;
    Ok(normalizer.normalize(&rows))
}
