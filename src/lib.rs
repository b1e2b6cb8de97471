//! Cuemark - persistent time-coded markers for media files
//!
//! Keeps an ordered set of markers per media file, stores them in a
//! subtitle document next to the media so they survive restarts, and
//! answers "which marker comes before/after this position" for playback.
//!
//! # Modules
//! - `timecode`: seconds to `H:MM:SS.CC` / `MM:SS.mmm` and back
//! - `store`: the marker collection with id and time views
//! - `document`: backing document writer and lenient reader
//! - `navigation`: previous/next marker with wrap-around
//! - `export`: plain-text listing
//! - `session`: one media file's markers with write-through persistence
//! - `controller`: trigger dispatch against a [`PlaybackHost`]
//!
//! # Usage
//!
//! ```no_run
//! use cuemark::{Config, MarkerSession};
//!
//! let config = Config::load().unwrap();
//! let mut session = MarkerSession::open("movie.mkv", &config).unwrap();
//! let marker = session.add(Some(12.5)).unwrap();
//! println!("{}", marker.label(&config.markers.prefix));
//! ```

pub mod cli;
pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod export;
pub mod navigation;
pub mod paths;
pub mod session;
pub mod store;
pub mod timecode;

pub use config::Config;
pub use controller::{handle_trigger, Feedback, PlaybackHost, Trigger};
pub use document::{ParseReport, RecordFormat, SkipReason, SkippedLine};
pub use error::MarkerError;
pub use paths::MediaPaths;
pub use session::MarkerSession;
pub use store::{Marker, MarkerStore};
