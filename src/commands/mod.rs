//! Subcommand handlers for the cuemark binary.

pub mod completions;
pub mod config;
pub mod markers;
