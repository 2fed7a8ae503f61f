use anyhow::Result;
use campaign_toolkit::calendar::{self, CalendarImportNormalizer, CanonicalCategory, ImportError};
use campaign_toolkit::state::{EventStore, JsonFileStore};
use campaign_toolkit::timeline::{pack, pack_default, render_timeline};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

const PLAN_CSV: &str = "\
Campaign Name,Start Date,End Date,Tier
New Year Reset,2026-01-01,2026-03-31,Category-Led
Valentine Edit,2026-02-01,2026-02-15,Category-Led
Spring Clean,04/01/2026,04/30/2026,Category Led
Brand Relaunch,2026-01-15,2026-12-31,Overarching Campaign
Summer Omni,2026-06-01,2026-08-31,Omnichannel Campaigns
,2026-07-01,2026-07-31,Campaigns
Mystery Promo,2026-09-01,,Unknown Thing
Store Opening,2026-10-01,2026-10-31,Local
";

#[test]
fn integration_csv_to_timeline() -> Result<()> {
    let rows = calendar::read_csv_rows(PLAN_CSV.as_bytes())?;
    assert_eq!(rows.len(), 8);

    let outcome = calendar::normalize(&rows);
    assert_eq!(outcome.events.len() + outcome.rejected_count, rows.len());
    assert_eq!(outcome.rejected_count, 2);

    let spring = outcome.events.iter().find(|e| e.title == "Spring Clean").unwrap();
    assert_eq!(spring.start_date, "2026-04-01");
    assert_eq!(spring.category, CanonicalCategory::CategoryLed);

    let layout = pack_default(&outcome.events);
    let category_led: Vec<Vec<&str>> = layout
        .rows(CanonicalCategory::CategoryLed)
        .unwrap()
        .iter()
        .map(|row| row.iter().map(|e| e.title.as_str()).collect())
        .collect();
    assert_eq!(category_led, vec![vec!["New Year Reset", "Spring Clean"], vec!["Valentine Edit"]]);

    assert_eq!(layout.row_count(CanonicalCategory::Campaigns), 1);
    assert_eq!(layout.rows(CanonicalCategory::Campaigns).unwrap()[0][0].title, "Summer Omni");
    assert_eq!(layout.row_count(CanonicalCategory::OtherGlobalCampaigns), 1);
    assert!(layout.rows(CanonicalCategory::OtherGlobalCampaigns).unwrap()[0].is_empty());
    assert_eq!(layout.rows(CanonicalCategory::OtherLocalCampaigns).unwrap()[0][0].title, "Store Opening");

    let text = render_timeline(&layout);
    assert!(text.contains("Overarching Campaign"));
    assert!(text.contains("New Year Reset, Spring Clean"));
    Ok(())
}

#[test]
fn integration_no_overlap_within_rows() -> Result<()> {
    let rows = calendar::read_csv_rows(PLAN_CSV.as_bytes())?;
    let outcome = calendar::normalize(&rows);
    let layout = pack(&outcome.events, CanonicalCategory::display_order());

    for (_, category_rows) in layout.iter() {
        for row in category_rows {
            for (i, a) in row.iter().enumerate() {
                for b in &row[i + 1..] {
                    let (a, b) = (a.month_span().unwrap(), b.month_span().unwrap());
                    assert!(!a.overlaps(&b), "{:?} overlaps {:?}", a, b);
                }
            }
        }
    }
    Ok(())
}

#[test]
fn integration_import_file_and_store() -> Result<()> {
    let dir = tempdir()?;
    let csv_path = dir.path().join("plan.csv");
    fs::write(&csv_path, PLAN_CSV)?;

    let normalizer = CalendarImportNormalizer::new().with_status("Approved");
    let outcome = calendar::import_csv_file(&csv_path, &normalizer)?;
    assert!(outcome.events.iter().all(|e| e.status == "Approved"));

    let store = JsonFileStore::new(dir.path().join("events.json"));
    store.save(&outcome.events)?;
    let reloaded = store.load()?;
    assert_eq!(reloaded, outcome.events);
    assert_eq!(pack_default(&reloaded), pack_default(&outcome.events));
    Ok(())
}

#[test]
fn integration_missing_file_is_io_error() {
    let err = calendar::import_csv_file(
        std::path::Path::new("/definitely/not/here.csv"),
        &CalendarImportNormalizer::new(),
    )
    .unwrap_err();
    assert!(matches!(err, ImportError::Io(_)));
}
