use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::calendar;
use crate::config::Config;
use crate::state::EventStore;
use crate::timeline::{pack, render_timeline};

pub fn show(config: &Config, file: Option<&Path>) -> Result<()> {
    let events = match file {
        Some(path) => {
            let normalizer = config.import.normalizer()?;
            let outcome = calendar::import_csv_file(path, &normalizer)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            if outcome.rejected_count > 0 {
                println!("{}", outcome.summary());
            }
            outcome.events
        }
        None => config.storage.store()?.load()?,
    };

    let layout = pack(&events, &config.timeline.category_order);
    info!("Laid out {} events in {} rows", events.len(), layout.total_rows());
    print!("{}", render_timeline(&layout));
    Ok(())
}
