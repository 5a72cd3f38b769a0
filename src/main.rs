//! Reportgen - converts a markdown report tree into a JSON document store.

mod category;
mod cli;
mod config;
mod html;
mod logger;
mod markdown;
mod report;
mod scan;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::{ConfigError, RunConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    logger::set_verbose(cli.verbose);

    let config = match RunConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err @ ConfigError::OutputExists(_)) => {
            // Reported before any writes; the process still exits cleanly.
            log!("error"; "{err}, nothing written");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    cli::run::run(&config)
}
