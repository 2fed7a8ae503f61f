use anyhow::{Context, Result};
use log::{info, warn};
use std::path::Path;

use crate::calendar::{self, CalendarEvent};
use crate::config::Config;
use crate::state::{self, EventStore};

pub fn import(config: &Config, file: &Path, dry_run: bool, json: bool) -> Result<()> {
    let normalizer = config.import.normalizer()?;
    let outcome = calendar::import_csv_file(file, &normalizer)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    if outcome.is_empty() {
        println!("Nothing to import from {}.", file.display());
        if outcome.rejected_count > 0 {
            println!("All {} rows were missing a title, start date or end date.", outcome.rejected_count);
        }
        return Ok(());
    }

    let suspicious = outcome.events.iter().filter(|e| !calendar::check_event_dates(e)).count();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.events)?);
    } else {
        print_events(&outcome.events);
    }
    println!("{}", outcome.summary());
    if suspicious > 0 {
        println!("{} imported event(s) have reversed or non-ISO dates; see the warnings above.", suspicious);
    }

    if dry_run {
        info!("Dry run, nothing saved");
        return Ok(());
    }

    let store = config.storage.store()?;
    let saved = state::append(&store, &outcome.events)?;
    println!("Saved {} events to {}", saved, store.path().display());
    Ok(())
}

pub fn list(config: &Config) -> Result<()> {
    let store = config.storage.store()?;
    let events = store.load()?;
    if events.is_empty() {
        println!("No stored events. Use 'campaign-toolkit import <file.csv>' to add some.");
        return Ok(());
    }
    println!("Stored Campaign Events:");
    print_events(&events);
    Ok(())
}

fn print_events(events: &[CalendarEvent]) {
    for event in events {
        println!("  - {}", event.title);
        println!("    Dates: {} to {}", event.start_date, event.end_date);
        println!("    Category: {}", event.category);
        println!("    Status: {}", event.status);
        if event.month_span().is_none() {
            warn!("'{}' will not be drawn on the timeline grid", event.title);
        }
        println!(); // Empty line between events
    }
}
