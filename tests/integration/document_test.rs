//! Integration tests for reading and writing backing documents

use cuemark::document::{self, RecordFormat, SkipReason};
use cuemark::{Marker, MarkerStore};

use super::helpers::{fixtures_dir, load_fixture, temp_media};

// ============================================================================
// Lenient Reading Tests
// ============================================================================

#[test]
fn mixed_fixture_yields_only_valid_markers() {
    let report = document::parse_str(&load_fixture("mixed.markers.ass"), "Marker");

    assert_eq!(
        report.markers,
        vec![
            Marker::new(1, 10.0),
            Marker::new(3, 30.0),
            Marker::new(4, 50.0),
        ]
    );
    assert_eq!(report.skipped.len(), 4);
    assert!(report
        .skipped
        .iter()
        .any(|s| s.reason == SkipReason::BadTimestamp && s.text.contains("Marker 02")));
    assert!(report
        .skipped
        .iter()
        .any(|s| s.reason == SkipReason::MissingId));
}

#[test]
fn mixed_fixture_continues_numbering_after_highest_id() {
    let report = document::load(fixtures_dir().join("mixed.markers.ass"), "Marker").unwrap();
    let mut store = report.into_store();
    assert_eq!(store.next_id(), 5);
    assert_eq!(store.add(60.0).unwrap().id, 5);
}

#[test]
fn foreign_subtitles_are_ignored() {
    let report = document::load(fixtures_dir().join("foreign.ass"), "Marker").unwrap();
    assert!(report.markers.is_empty());
    assert!(report.skipped.is_empty());
}

#[test]
fn nonexistent_document_loads_as_empty() {
    let report = document::load("/nonexistent/path/movie.markers.ass", "Marker").unwrap();
    assert!(report.markers.is_empty());
    assert_eq!(report.into_store().next_id(), 1);
}

#[test]
fn empty_document_loads_as_empty() {
    let (dir, _media) = temp_media();
    let path = dir.path().join("movie.markers.ass");
    std::fs::write(&path, "").unwrap();

    let report = document::load(&path, "Marker").unwrap();
    assert!(report.markers.is_empty());
}

// ============================================================================
// Round-trip Tests
// ============================================================================

#[test]
fn save_then_load_preserves_ids_and_centiseconds() {
    let (dir, _media) = temp_media();
    let path = dir.path().join("movie.markers.ass");
    let format = RecordFormat::default();

    let mut store = MarkerStore::new();
    for t in [7.891, 0.004, 125.5, 3600.129] {
        store.add(t).unwrap();
    }

    let written = document::save(&path, &store, &format, "movie.mkv").unwrap();
    assert_eq!(written, 4);

    let reloaded = document::load(&path, &format.prefix).unwrap().into_store();
    let got: Vec<(u64, f64)> = reloaded.by_id_ascending().map(|m| (m.id, m.time)).collect();
    let expected = [(1, 7.89), (2, 0.0), (3, 125.5), (4, 3600.12)];

    assert_eq!(got.len(), expected.len());
    for ((id, time), (want_id, want_time)) in got.into_iter().zip(expected) {
        assert_eq!(id, want_id);
        assert!((time - want_time).abs() < 1e-9, "id {}: {}", id, time);
    }
    assert_eq!(reloaded.next_id(), 5);
}

#[test]
fn changing_prefix_hides_previous_markers() {
    let (dir, _media) = temp_media();
    let path = dir.path().join("movie.markers.ass");

    let mut store = MarkerStore::new();
    store.add(1.0).unwrap();
    document::save(&path, &store, &RecordFormat::default(), "movie.mkv").unwrap();

    let report = document::load(&path, "Chapter").unwrap();
    assert!(report.markers.is_empty());
}

#[test]
fn sync_of_empty_store_removes_document() {
    let (dir, _media) = temp_media();
    let path = dir.path().join("movie.markers.ass");
    let format = RecordFormat::default();

    let mut store = MarkerStore::new();
    store.add(2.0).unwrap();
    assert_eq!(document::sync(&path, &store, &format, "movie.mkv").unwrap(), 1);
    assert!(path.exists());

    store.clear();
    assert_eq!(document::sync(&path, &store, &format, "movie.mkv").unwrap(), 0);
    assert!(!path.exists());

    // Nothing left to delete is not an error
    assert!(!document::remove(&path).unwrap());
}

#[test]
fn written_document_snapshot() {
    let mut store = MarkerStore::new();
    store.add(12.345).unwrap();
    store.add(5.0).unwrap();

    let doc = document::serialize(&store, &RecordFormat::default(), "movie.mkv");
    let events: String = doc
        .lines()
        .skip_while(|l| *l != "[Events]")
        .map(|l| format!("{}\n", l))
        .collect();

    insta::assert_snapshot!(events, @r###"
    [Events]
    Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
    Dialogue: 0,0:00:12.34,0:00:14.34,Default,,0,0,0,,Marker 01
    Dialogue: 0,0:00:05.00,0:00:07.00,Default,,0,0,0,,Marker 02
    "###);
}
