use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Convert a single file between common formats.
#[derive(Debug, Parser)]
#[command(name = "transmute", version, about)]
pub struct Args {
    /// Configuration file. Without one, defaults and TRANSMUTE_* variables apply.
    #[arg(long, global = true, env = "TRANSMUTE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the available conversions in menu order.
    List,
    /// Show which optional capabilities were detected.
    Capabilities,
    /// Convert one file.
    Convert {
        /// File to convert.
        file: PathBuf,
        /// Conversion label, e.g. "Data: CSV -> JSON". Defaults to the first listed.
        #[arg(short, long)]
        label: Option<String>,
    },
}
