pub mod calendar;
pub mod cli;
pub mod commands;
pub mod config;
pub mod state;
pub mod timeline;

use env_logger::Env;

/// Initialize logging. `RUST_LOG` wins over the verbosity flag.
pub fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

// Re-export commonly used types
pub use calendar::{CalendarEvent, CalendarImportNormalizer, CanonicalCategory, ImportOutcome, RawImportRow};
pub use config::Config;
pub use timeline::{RowAssignment, pack};
