//! Command-line argument definitions for the Trellis CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output directories, configuration
//! file selection, and logging verbosity.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the Trellis batch converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory scanned for mind-map input files
    #[arg(short, long, default_value = "xmindInput")]
    pub input_dir: PathBuf,

    /// Directory receiving one diagram file per input file
    #[arg(short, long, default_value = "drawioOutput")]
    pub output_dir: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
