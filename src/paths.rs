//! Paths of the documents that belong to a media file.
//!
//! Both live next to the media file and share its base name:
//! `movie.mkv` keeps its markers in `movie.markers.ass` and exports to
//! `movie.markers.txt`.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::{MarkerError, Result};

/// Double extension of the backing document.
pub const BACKING_EXTENSION: &str = "markers.ass";

/// Double extension of the export listing.
pub const EXPORT_EXTENSION: &str = "markers.txt";

/// Documents derived from one media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPaths {
    /// The media file itself
    pub media: PathBuf,
    /// Backing document holding the markers
    pub backing: PathBuf,
    /// Plain-text export listing
    pub export: PathBuf,
}

impl MediaPaths {
    /// Derive document paths for `media`.
    ///
    /// Fails when the path has no file stem (e.g. `/` or `..`).
    pub fn for_media<P: AsRef<Path>>(media: P) -> Result<Self> {
        let media = media.as_ref();
        let stem = media
            .file_stem()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                MarkerError::io(
                    media,
                    io::Error::new(io::ErrorKind::InvalidInput, "media path has no file name"),
                )
            })?;

        let sibling = |ext: &str| {
            let mut name = stem.to_os_string();
            name.push(".");
            name.push(ext);
            media.with_file_name(name)
        };

        Ok(Self {
            media: media.to_path_buf(),
            backing: sibling(BACKING_EXTENSION),
            export: sibling(EXPORT_EXTENSION),
        })
    }

    /// File name of the media, for headers and messages.
    pub fn media_name(&self) -> String {
        self.media
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
