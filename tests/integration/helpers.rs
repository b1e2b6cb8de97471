//! Shared helpers for integration tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Directory holding test fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Read a fixture file as a string.
pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixtures_dir().join(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

/// Temp directory with a (nonexistent) `movie.mkv` media path.
pub fn temp_media() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let media = dir.path().join("movie.mkv");
    (dir, media)
}

/// Temp directory where `movie.mkv` already has the given backing document.
pub fn temp_media_with_fixture(name: &str) -> (TempDir, PathBuf) {
    let (dir, media) = temp_media();
    fs::write(dir.path().join("movie.markers.ass"), load_fixture(name))
        .expect("Failed to copy fixture");
    (dir, media)
}
