//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Status agent - project device state into the datastore and write WiFi edits back
#[derive(Parser, Debug)]
#[command(name = "status-agent")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Agent configuration file (TOML, JSON or YAML)
    #[arg(short, long, global = true, env = "STATUS_AGENT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the DHCP lease file location
    #[arg(long, global = true)]
    pub lease_file: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Collect live state and print it
    Show {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Project live state into a datastore and print the resulting items
    Project {
        /// Write the items as JSON to this file instead of printing them
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Commit edits from a file through the verify/apply cycle
    ///
    /// The edits file holds `[[set]]` entries with `path` and `value`, and
    /// `[[delete]]` entries with `path`.
    ///
    /// Examples:
    ///   status-agent apply edits.toml
    ///   status-agent apply edits.toml --no-reload
    Apply {
        /// Edits file (TOML, JSON or YAML)
        edits: PathBuf,

        /// Skip the network service reload after committing
        #[arg(long)]
        no_reload: bool,
    },
}
