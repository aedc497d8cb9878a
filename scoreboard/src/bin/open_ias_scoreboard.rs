use std::error::Error;

use clap::Parser;
use scoreboard::framework::config::{AppConfig, Args};
use scoreboard::framework::logging::init_logger;

fn main() -> Result<(), Box<dyn Error>> {
    init_logger();

    let config = AppConfig::from_args(Args::parse());
    log::info!(
        "Starting open-ias-scoreboard {} (dev tools: {})",
        config.version,
        config.dev_tools
    );

    scoreboard::run(config)
}
