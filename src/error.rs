//! Marker operation errors.

use std::path::PathBuf;

/// Errors that can occur while working with a marker store.
///
/// Every variant is reported to the user as a short message; none of them
/// is fatal to the host application.
#[derive(Debug, thiserror::Error)]
pub enum MarkerError {
    #[error("No playback position")]
    NoPlaybackPosition,

    #[error("No markers")]
    EmptyStore,

    #[error("No markers to export")]
    NoMarkers,

    #[error("Invalid marker time: {0}")]
    InvalidTime(f64),

    #[error("No marker ids left")]
    IdsExhausted,

    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MarkerError {
    /// Wrap an IO error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is a filesystem failure (document may be stale).
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

pub type Result<T, E = MarkerError> = std::result::Result<T, E>;
