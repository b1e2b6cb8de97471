//! Cuemark command-line entry point.

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cuemark::cli::{Cli, Commands, ConfigCommands};
use cuemark::controller::Trigger;

/// Environment variable holding a tracing filter (e.g. `cuemark=debug`).
const LOG_ENV: &str = "CUEMARK_LOG";

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// Run one command. `Ok(false)` means a failure was already reported.
fn run(command: Commands) -> Result<bool> {
    use commands::markers::{handle_list, handle_trigger};

    match command {
        Commands::Add { media, at } => handle_trigger(&media, Trigger::AddMarker, at),
        Commands::RemoveLast { media } => handle_trigger(&media, Trigger::RemoveLast, None),
        Commands::Clear { media } => handle_trigger(&media, Trigger::ClearAll, None),
        Commands::Export { media } => handle_trigger(&media, Trigger::Export, None),
        Commands::Prev { media, at } => handle_trigger(&media, Trigger::GotoPrevious, Some(at)),
        Commands::Next { media, at } => handle_trigger(&media, Trigger::GotoNext, Some(at)),
        Commands::List {
            media,
            by_time,
            json,
        } => handle_list(&media, by_time, json),
        Commands::Config { command } => {
            match command {
                ConfigCommands::Show => commands::config::handle_show()?,
                ConfigCommands::Migrate { yes } => commands::config::handle_migrate(yes)?,
            }
            Ok(true)
        }
        Commands::Completions { shell } => {
            commands::completions::handle_completions(shell);
            Ok(true)
        }
    }
}
