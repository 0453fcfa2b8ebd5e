//! Command-line arguments.

use checkforge_core::maintenance::DEFAULT_RETENTION_DAYS;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Design, export and verify printable checks.
#[derive(Parser, Debug)]
#[command(name = "checkforge", author, version, about)]
pub struct Cli {
    /// Store directory (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export a check as a PDF and record its provenance
    Export {
        /// JSON file with the check fields
        #[arg(long)]
        fields: PathBuf,

        /// Saved layout to place elements with
        #[arg(long)]
        layout: Option<String>,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Look up an exported check by id, fingerprint, filename, check number or payee
    Verify {
        query: String,
    },

    /// Manage saved layouts
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },

    /// Show storage usage
    Stats,

    /// Remove export records older than the retention period
    Cleanup {
        #[arg(long, default_value_t = DEFAULT_RETENTION_DAYS)]
        days: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum LayoutAction {
    /// List saved layouts
    List,
    /// Delete a saved layout
    Delete { name: String },
    /// Write a saved layout to a layout file
    Export {
        name: String,
        /// Destination file (defaults to check-layout-<millis>.json)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Save a layout file under a name
    Import { file: PathBuf, name: String },
}
