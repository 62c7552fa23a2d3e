//! Mirage CLI - browser profile validation and extension conflict checks
//!
//! This is the main entry point for the Mirage command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use commands::CommandContext;

fn main() -> Result<ExitCode> {
    // Parse CLI args
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    let ctx = CommandContext::load(&cli)?;

    // Run command
    match cli.command {
        Commands::Profile(cmd) => commands::profile::run(cmd, &ctx),
        Commands::Extension(cmd) => commands::extension::run(cmd, &ctx),
        Commands::Rules(cmd) => commands::rules::run(cmd, &ctx),
        Commands::Config(cmd) => commands::config::run(cmd, &ctx),
    }
}

/// Initialize tracing with appropriate verbosity
///
/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
