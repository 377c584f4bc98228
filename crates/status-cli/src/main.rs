//! Status agent CLI
//!
//! Collects device state, projects it into a datastore and drives WiFi
//! edits back into the native configuration store.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context::load(cli.config.as_deref(), cli.lease_file.as_deref())?;

    match cli.command {
        Commands::Show { json } => commands::run_show(&ctx, json),
        Commands::Project { output } => commands::run_project(&ctx, output.as_deref()),
        Commands::Apply { edits, no_reload } => commands::run_apply(&ctx, &edits, no_reload),
    }
}

/// Log to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "debug"
    } else {
        "status_cli=info,status_core=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
    tracing::debug!("Verbose mode enabled");
}
