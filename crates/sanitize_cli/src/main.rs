//! sanitize - make file names valid on every common filesystem
//!
//! Main entry point.

mod app;
mod cli;
mod config;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use sanitize_log::LogOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging first
    let log_options = LogOptions::from_verbosity(cli.verbose).with_log_dir(cli.file_log_dir());
    let _guard = sanitize_log::init(&log_options)?;

    // Load configuration, then let flags override it
    let mut config = config::AppConfig::load(cli.config.as_deref())?;
    config.merge_cli(&cli);

    app::run(&config, &cli.names)
}
