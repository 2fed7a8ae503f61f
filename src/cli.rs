use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Campaign Toolkit - import and lay out seasonal campaign calendars
#[derive(Debug, Parser)]
#[command(name = "campaign-toolkit")]
#[command(about = "Import and lay out seasonal campaign calendars", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this config file instead of the per-user one
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import events from a CSV file
    Import {
        /// CSV file with a header row
        #[arg(required = true)]
        file: PathBuf,

        /// Show what would be imported without saving
        #[arg(long)]
        dry_run: bool,

        /// Print the imported events as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the campaign timeline
    #[command(alias = "gantt")]
    Timeline {
        /// Lay out events from this CSV instead of the stored ones
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// List stored events
    #[command(alias = "ls")]
    List,

    /// View configuration
    Config {
        #[command(subcommand)]
        action: ConfigActions,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigActions {
    /// Show current settings
    Show,

    /// Print the config file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_import() {
        let cli = Cli::parse_from(["campaign-toolkit", "import", "plan.csv", "--dry-run", "-v"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Import { file, dry_run, json } => {
                assert_eq!(file, PathBuf::from("plan.csv"));
                assert!(dry_run);
                assert!(!json);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_timeline_alias() {
        let cli = Cli::parse_from(["campaign-toolkit", "gantt", "--file", "plan.csv"]);
        assert!(matches!(cli.command, Commands::Timeline { file: Some(_) }));
    }
}
