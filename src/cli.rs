//! Command-line interface definitions.
//!
//! Kept in the library so `xtask` can render man pages from the same
//! definitions the binary parses.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::timecode::parse_position;

/// Cuemark - persistent time-coded markers for media files
#[derive(Debug, Parser)]
#[command(name = "cuemark", version, about, long_about = None)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add a marker at a playback position
    Add {
        /// Media file the marker belongs to
        media: PathBuf,
        /// Playback position (seconds or H:MM:SS.CC)
        #[arg(long, value_name = "TIME", value_parser = parse_time)]
        at: Option<f64>,
    },

    /// Remove the most recently added marker
    RemoveLast {
        /// Media file whose markers to edit
        media: PathBuf,
    },

    /// Remove all markers and delete the marker document
    Clear {
        /// Media file whose markers to clear
        media: PathBuf,
    },

    /// Export markers to a plain-text listing next to the media file
    Export {
        /// Media file whose markers to export
        media: PathBuf,
    },

    /// Print the marker before a playback position
    Prev {
        /// Media file to navigate
        media: PathBuf,
        /// Current playback position (seconds or H:MM:SS.CC)
        #[arg(long, value_name = "TIME", value_parser = parse_time)]
        at: f64,
    },

    /// Print the marker after a playback position
    Next {
        /// Media file to navigate
        media: PathBuf,
        /// Current playback position (seconds or H:MM:SS.CC)
        #[arg(long, value_name = "TIME", value_parser = parse_time)]
        at: f64,
    },

    /// List markers of a media file
    List {
        /// Media file whose markers to list
        media: PathBuf,
        /// Order by time instead of creation
        #[arg(long)]
        by_time: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show or migrate the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Add missing fields to the configuration file
    Migrate {
        /// Apply without asking
        #[arg(short, long)]
        yes: bool,
    },
}

fn parse_time(value: &str) -> Result<f64, String> {
    parse_position(value).map_err(|e| e.to_string())
}
