//! stampline CLI
//!
//! Command-line front end for placing still images on a project timeline.

use clap::Parser;
use env_logger::Env;
use log::debug;

use stampline::cli::{commands, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("stampline v{}", env!("CARGO_PKG_VERSION"));

    commands::run(cli.command)
}
