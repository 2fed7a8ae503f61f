use anyhow::Result;
use std::path::Path;

use crate::cli::ConfigActions;
use crate::config::{Config, get_config_path};

pub fn handle(config: &Config, explicit_path: Option<&Path>, action: ConfigActions) -> Result<()> {
    match action {
        ConfigActions::Show => {
            println!("\nCurrent Configuration:");
            println!("\nImport Settings:");
            println!("  Default Status: {}", config.import.default_status);
            println!("  Date Timezone: {}", config.import.timezone);
            println!("\nTimeline Settings:");
            for (index, category) in config.timeline.category_order.iter().enumerate() {
                println!("  {}. {}", index + 1, category);
            }
            println!("\nStorage Settings:");
            match &config.storage.events_file {
                Some(path) => println!("  Events File: {}", path.display()),
                None => println!("  Events File: default data directory"),
            }
            Ok(())
        }
        ConfigActions::Path => {
            match explicit_path {
                Some(path) => println!("{}", path.display()),
                None => println!("{}", get_config_path()?.display()),
            }
            Ok(())
        }
    }
}
