//! Trigger dispatch between a media player and a marker session.
//!
//! The player is modelled by [`PlaybackHost`]: it reports the playback
//! position, accepts seek requests and shows short messages. Each
//! [`Trigger`] runs one session operation to completion and produces exactly
//! one message; failures are reported, never raised.

use crate::error::MarkerError;
use crate::session::MarkerSession;
use crate::store::Marker;
use crate::timecode::encode_display;

/// What the marker core needs from the media player.
pub trait PlaybackHost {
    /// Current playback position in seconds, if known.
    fn position(&self) -> Option<f64>;

    /// Ask the player to seek to `seconds`.
    fn seek(&mut self, seconds: f64);

    /// Show `text` to the user for `duration` seconds.
    fn show_message(&mut self, text: &str, duration: f64);
}

/// User actions mapped by the host to marker operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    AddMarker,
    RemoveLast,
    ClearAll,
    Export,
    GotoPrevious,
    GotoNext,
}

/// Outcome of a trigger, as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    /// Message passed to [`PlaybackHost::show_message`]
    pub message: String,
    /// Whether the operation succeeded
    pub success: bool,
    /// Seek target, for navigation triggers that found a marker
    pub seek_to: Option<f64>,
}

impl Feedback {
    fn success(message: String) -> Self {
        Self {
            message,
            success: true,
            seek_to: None,
        }
    }

    fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
            seek_to: None,
        }
    }
}

/// Run `trigger` against `session`, seeking and messaging through `host`.
///
/// # Arguments
/// * `session` - The open media file's markers
/// * `host` - The media player
/// * `trigger` - Which operation to run
/// * `osd_duration` - How long the message should stay on screen
pub fn handle_trigger<H: PlaybackHost>(
    session: &mut MarkerSession,
    host: &mut H,
    trigger: Trigger,
    osd_duration: f64,
) -> Feedback {
    let prefix = session.format().prefix.clone();
    let feedback = match trigger {
        Trigger::AddMarker => match session.add(host.position()) {
            Ok(marker) => Feedback::success(format!(
                "{} added at {}",
                marker.label(&prefix),
                encode_display(marker.time)
            )),
            Err(e) => failure(trigger, e),
        },
        Trigger::RemoveLast => match session.remove_last() {
            Ok(marker) => Feedback::success(format!(
                "Removed {} ({})",
                marker.label(&prefix),
                encode_display(marker.time)
            )),
            Err(e) => failure(trigger, e),
        },
        Trigger::ClearAll => match session.clear() {
            Ok(count) => Feedback::success(format!("Cleared {}", count_markers(count))),
            Err(e) => failure(trigger, e),
        },
        Trigger::Export => match session.export() {
            Ok((path, count)) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                Feedback::success(format!("Exported {} to {}", count_markers(count), name))
            }
            Err(e) => failure(trigger, e),
        },
        Trigger::GotoPrevious => jump(session.previous(host.position()), &prefix, trigger),
        Trigger::GotoNext => jump(session.next(host.position()), &prefix, trigger),
    };

    if let Some(target) = feedback.seek_to {
        host.seek(target);
    }
    host.show_message(&feedback.message, osd_duration);
    tracing::debug!(?trigger, success = feedback.success, message = %feedback.message);
    feedback
}

fn jump(target: Result<Marker, MarkerError>, prefix: &str, trigger: Trigger) -> Feedback {
    match target {
        Ok(marker) => Feedback {
            message: format!(
                "Jumped to {} ({})",
                marker.label(prefix),
                encode_display(marker.time)
            ),
            success: true,
            seek_to: Some(marker.time),
        },
        Err(e) => failure(trigger, e),
    }
}

/// Short failure message for `error`.
///
/// An empty store is a "nothing to do" for remove and clear.
fn failure(trigger: Trigger, error: MarkerError) -> Feedback {
    let message = match (&error, trigger) {
        (MarkerError::EmptyStore, Trigger::RemoveLast) => "No markers to remove".to_string(),
        (MarkerError::EmptyStore, Trigger::ClearAll) => "No markers to clear".to_string(),
        _ if error.is_io() => format!("Could not save markers: {}", error),
        _ => error.to_string(),
    };
    Feedback::failure(message)
}

fn count_markers(count: usize) -> String {
    if count == 1 {
        "1 marker".to_string()
    } else {
        format!("{} markers", count)
    }
}
