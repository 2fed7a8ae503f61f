use campaign_toolkit::cli::Cli;
use clap::Parser;
use log::{debug, error};

fn main() {
    let cli = Cli::parse();
    campaign_toolkit::init_logger(cli.verbose);
    debug!("Parsed arguments: {:?}", cli);

    if let Err(err) = campaign_toolkit::commands::run(cli) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}
