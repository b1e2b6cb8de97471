//! Marker subcommand handlers.
//!
//! Each invocation plays the part of a media player: loading the session is
//! the media-loaded event, the subcommand is the trigger, and the player's
//! playback position comes from `--at`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use cuemark::controller::{self, PlaybackHost, Trigger};
use cuemark::timecode::encode_display;
use cuemark::{Config, MarkerSession};

/// Playback host backed by command-line arguments.
#[derive(Debug, Default)]
struct CliHost {
    position: Option<f64>,
    seek_to: Option<f64>,
}

impl PlaybackHost for CliHost {
    fn position(&self) -> Option<f64> {
        self.position
    }

    fn seek(&mut self, seconds: f64) {
        self.seek_to = Some(seconds);
    }

    // Printed by the caller, which knows whether it goes to stdout or stderr
    fn show_message(&mut self, _text: &str, _duration: f64) {}
}

fn open_session(media: &Path, config: &Config) -> Result<MarkerSession> {
    MarkerSession::open(media, config)
        .with_context(|| format!("Failed to load markers for {}", media.display()))
}

/// Run one trigger for `media` and print the resulting message.
///
/// Returns `false` when the trigger failed (the message went to stderr).
#[cfg(not(tarpaulin_include))]
pub fn handle_trigger(media: &Path, trigger: Trigger, position: Option<f64>) -> Result<bool> {
    let config = Config::load()?;
    let mut session = open_session(media, &config)?;
    let mut host = CliHost {
        position,
        seek_to: None,
    };

    let feedback =
        controller::handle_trigger(&mut session, &mut host, trigger, config.display.osd_duration);

    if feedback.success {
        println!("{}", feedback.message);
    } else {
        eprintln!("{}", feedback.message);
    }
    if let Some(target) = host.seek_to {
        println!("seek {:.3}", target);
    }

    Ok(feedback.success)
}

/// One row of `cuemark list --json`.
#[derive(Debug, Serialize)]
struct MarkerRow {
    id: u64,
    time: f64,
    timestamp: String,
    label: String,
}

/// List the markers of `media`.
#[cfg(not(tarpaulin_include))]
pub fn handle_list(media: &Path, by_time: bool, json: bool) -> Result<bool> {
    let config = Config::load()?;
    let session = open_session(media, &config)?;
    let store = session.store();
    let prefix = &config.markers.prefix;

    let markers: Vec<_> = if by_time {
        store.by_time_ascending().collect()
    } else {
        store.by_id_ascending().collect()
    };

    if json {
        let rows: Vec<MarkerRow> = markers
            .iter()
            .map(|m| MarkerRow {
                id: m.id,
                time: m.time,
                timestamp: encode_display(m.time),
                label: m.label(prefix),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(true);
    }

    if markers.is_empty() {
        println!("No markers for {}", session.paths().media_name());
        return Ok(true);
    }

    for marker in markers {
        println!(
            "{:>4}  {:>12}  {}",
            format!("{:02}", marker.id),
            encode_display(marker.time),
            marker.label(prefix)
        );
    }
    Ok(true)
}
