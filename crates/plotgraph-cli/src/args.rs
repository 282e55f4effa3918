//! Command-line argument definitions for the plotgraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input story, the output files, the
//! label display mode, the configuration file and logging verbosity.

use clap::Parser;

/// Command-line arguments for the plotgraph tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input XML story
    #[arg(short = 'x', long = "xml")]
    pub xml: String,

    /// Path to the interactive HTML output
    #[arg(short, long)]
    pub out: Option<String>,

    /// Path to the Graphviz DOT output
    #[arg(long)]
    pub out_dot: Option<String>,

    /// Show derived labels instead of node identifiers
    #[arg(long)]
    pub use_label: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
