use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::config::Config;

mod config;
mod events;
mod timeline;

/// Run a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Import { file, dry_run, json } => events::import(&config, &file, dry_run, json),
        Commands::Timeline { file } => timeline::show(&config, file.as_deref()),
        Commands::List => events::list(&config),
        Commands::Config { action } => config::handle(&config, cli.config.as_deref(), action),
    }
}
