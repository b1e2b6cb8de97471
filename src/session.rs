//! Marker session for one open media file.
//!
//! A `MarkerSession` is created when media is loaded and owns that file's
//! marker store. Every mutation is written through to the backing document
//! before the call returns; when the store becomes empty the document is
//! deleted instead. A failed write leaves the in-memory store as it is and
//! reports the error, so memory and disk may differ until the next
//! successful write.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::document::{self, ParseReport, RecordFormat, SkippedLine};
use crate::error::{MarkerError, Result};
use crate::export;
use crate::navigation;
use crate::paths::MediaPaths;
use crate::store::{Marker, MarkerStore};

/// Markers of one media file plus the documents they are persisted to.
#[derive(Debug)]
pub struct MarkerSession {
    paths: MediaPaths,
    format: RecordFormat,
    store: MarkerStore,
    skipped: Vec<SkippedLine>,
}

impl MarkerSession {
    /// Open the session for `media`, loading its backing document if any.
    pub fn open<P: AsRef<Path>>(media: P, config: &Config) -> Result<Self> {
        Self::open_with_format(media, config.record_format())
    }

    /// Open with an explicit record format.
    pub fn open_with_format<P: AsRef<Path>>(media: P, format: RecordFormat) -> Result<Self> {
        let paths = MediaPaths::for_media(media)?;
        let report = document::load(&paths.backing, &format.prefix)?;
        if !report.skipped.is_empty() {
            tracing::info!(
                path = %paths.backing.display(),
                skipped = report.skipped.len(),
                "Ignored unreadable marker records"
            );
        }

        let ParseReport { markers, skipped } = report;
        Ok(Self {
            paths,
            format,
            store: MarkerStore::from_markers(markers),
            skipped,
        })
    }

    pub fn store(&self) -> &MarkerStore {
        &self.store
    }

    pub fn paths(&self) -> &MediaPaths {
        &self.paths
    }

    pub fn format(&self) -> &RecordFormat {
        &self.format
    }

    /// Candidate lines skipped while loading the backing document.
    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    pub fn backing_path(&self) -> &Path {
        &self.paths.backing
    }

    /// Add a marker at the playback position and persist.
    pub fn add(&mut self, position: Option<f64>) -> Result<Marker> {
        let time = position.ok_or(MarkerError::NoPlaybackPosition)?;
        let marker = self.store.add(time)?;
        self.flush()?;
        Ok(marker)
    }

    /// Remove the newest marker and persist.
    pub fn remove_last(&mut self) -> Result<Marker> {
        let marker = self.store.remove_last().ok_or(MarkerError::EmptyStore)?;
        self.flush()?;
        Ok(marker)
    }

    /// Remove all markers and delete the backing document.
    pub fn clear(&mut self) -> Result<usize> {
        if self.store.is_empty() {
            return Err(MarkerError::EmptyStore);
        }
        let count = self.store.clear();
        self.flush()?;
        Ok(count)
    }

    /// Write the export listing next to the media file.
    ///
    /// Returns the path written and the number of markers.
    pub fn export(&self) -> Result<(PathBuf, usize)> {
        let count = export::write_listing(
            &self.paths.export,
            &self.store,
            &self.paths.media_name(),
            &self.format.prefix,
        )?;
        Ok((self.paths.export.clone(), count))
    }

    /// Marker to seek to when going backwards from `position`.
    pub fn previous(&self, position: Option<f64>) -> Result<Marker> {
        if self.store.is_empty() {
            return Err(MarkerError::EmptyStore);
        }
        let time = position.ok_or(MarkerError::NoPlaybackPosition)?;
        navigation::previous(&self.store, time)
    }

    /// Marker to seek to when going forwards from `position`.
    pub fn next(&self, position: Option<f64>) -> Result<Marker> {
        if self.store.is_empty() {
            return Err(MarkerError::EmptyStore);
        }
        let time = position.ok_or(MarkerError::NoPlaybackPosition)?;
        navigation::next(&self.store, time)
    }

    /// Rewrite (or delete) the backing document from the store.
    pub fn flush(&self) -> Result<usize> {
        document::sync(
            &self.paths.backing,
            &self.store,
            &self.format,
            &self.paths.media_name(),
        )
        .map_err(|e| {
            tracing::warn!(error = %e, "Marker document is out of date");
            e
        })
    }
}
