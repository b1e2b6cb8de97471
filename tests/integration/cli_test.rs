//! Integration tests for the cuemark CLI

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

use super::helpers::{temp_media, temp_media_with_fixture};

/// cuemark command isolated from the user's config and log settings.
fn cuemark(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cuemark").expect("binary should build");
    cmd.env("CUEMARK_CONFIG", config_dir.join("config.toml"))
        .env_remove("CUEMARK_LOG");
    cmd
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_marker_commands() {
    let (dir, _media) = temp_media();
    cuemark(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("remove-last"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn add_without_media_is_usage_error() {
    let (dir, _media) = temp_media();
    cuemark(dir.path())
        .arg("add")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<MEDIA>"));
}

// ============================================================================
// Marker Lifecycle Tests
// ============================================================================

#[test]
fn add_writes_document_and_reports_marker() {
    let (dir, media) = temp_media();
    cuemark(dir.path())
        .args(["add", media.to_str().unwrap(), "--at", "12.345"])
        .assert()
        .success()
        .stdout("Marker 01 added at 00:12.345\n");

    let doc = fs::read_to_string(dir.path().join("movie.markers.ass")).unwrap();
    assert!(doc.contains(",,Marker 01"));
}

#[test]
fn add_without_position_fails_without_writing() {
    let (dir, media) = temp_media();
    cuemark(dir.path())
        .args(["add", media.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No playback position"));

    assert!(!dir.path().join("movie.markers.ass").exists());
}

#[test]
fn remove_last_on_empty_store_reports_nothing_to_do() {
    let (dir, media) = temp_media();
    cuemark(dir.path())
        .args(["remove-last", media.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No markers to remove"));
}

#[test]
fn markers_persist_between_invocations() {
    let (dir, media) = temp_media();
    let media = media.to_str().unwrap();

    for at in ["30", "0:00:10.00"] {
        cuemark(dir.path()).args(["add", media, "--at", at]).assert().success();
    }

    cuemark(dir.path())
        .args(["list", media, "--by-time"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)02.*00:10\.000.*01.*00:30\.000").unwrap());

    cuemark(dir.path())
        .args(["remove-last", media])
        .assert()
        .success()
        .stdout("Removed Marker 02 (00:10.000)\n");
}

#[test]
fn clear_deletes_backing_document() {
    let (dir, media) = temp_media_with_fixture("mixed.markers.ass");
    cuemark(dir.path())
        .args(["clear", media.to_str().unwrap()])
        .assert()
        .success()
        .stdout("Cleared 3 markers\n");

    assert!(!dir.path().join("movie.markers.ass").exists());
}

#[test]
fn export_writes_listing() {
    let (dir, media) = temp_media_with_fixture("mixed.markers.ass");
    cuemark(dir.path())
        .args(["export", media.to_str().unwrap()])
        .assert()
        .success()
        .stdout("Exported 3 markers to movie.markers.txt\n");

    let listing = fs::read_to_string(dir.path().join("movie.markers.txt")).unwrap();
    let rows: Vec<&str> = listing.lines().skip(2).collect();
    assert_eq!(
        rows,
        vec![
            "01\t00:10.000\t\"Marker 01\"",
            "03\t00:30.000\t\"Marker 03\"",
            "04\t00:50.000\t\"Marker 04\"",
        ]
    );
}

#[test]
fn export_without_markers_fails() {
    let (dir, media) = temp_media();
    cuemark(dir.path())
        .args(["export", media.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No markers to export"));
    assert!(!dir.path().join("movie.markers.txt").exists());
}

// ============================================================================
// Navigation Tests
// ============================================================================

#[test]
fn next_wraps_and_prints_seek_target() {
    let (dir, media) = temp_media_with_fixture("mixed.markers.ass");
    cuemark(dir.path())
        .args(["next", media.to_str().unwrap(), "--at", "50.2"])
        .assert()
        .success()
        .stdout("Jumped to Marker 01 (00:10.000)\nseek 10.000\n");
}

#[test]
fn prev_skips_marker_under_playhead() {
    let (dir, media) = temp_media_with_fixture("mixed.markers.ass");
    cuemark(dir.path())
        .args(["prev", media.to_str().unwrap(), "--at", "0:00:30.00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seek 10.000"));
}

#[test]
fn navigation_on_empty_store_fails() {
    let (dir, media) = temp_media();
    cuemark(dir.path())
        .args(["next", media.to_str().unwrap(), "--at", "5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No markers"))
        .stdout(predicate::str::contains("seek").not());
}

// ============================================================================
// List and Config Tests
// ============================================================================

#[test]
fn list_json_includes_labels() {
    let (dir, media) = temp_media_with_fixture("mixed.markers.ass");
    let output = cuemark(dir.path())
        .args(["list", media.to_str().unwrap(), "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1]["id"], 3);
    assert_eq!(rows[1]["label"], "Marker 03");
    assert_eq!(rows[1]["timestamp"], "00:30.000");
}

#[test]
fn configured_prefix_is_used() {
    let (dir, media) = temp_media();
    fs::write(
        dir.path().join("config.toml"),
        "[markers]\nprefix = \"Chapter\"\n",
    )
    .unwrap();

    cuemark(dir.path())
        .args(["add", media.to_str().unwrap(), "--at", "1"])
        .assert()
        .success()
        .stdout("Chapter 01 added at 00:01.000\n");
}

#[test]
fn invalid_config_is_reported() {
    let (dir, media) = temp_media();
    fs::write(dir.path().join("config.toml"), "[markers]\nprefix = \"\"\n").unwrap();

    cuemark(dir.path())
        .args(["add", media.to_str().unwrap(), "--at", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("markers.prefix"));
}

#[test]
fn config_show_prints_defaults() {
    let (dir, _media) = temp_media();
    cuemark(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prefix = \"Marker\""))
        .stdout(predicate::str::contains("osd_duration = 2.0"));
}

#[test]
fn config_migrate_with_yes_creates_file() {
    let (dir, _media) = temp_media();
    cuemark(dir.path())
        .args(["config", "migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ prefix = \"Marker\""));

    let written = fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(written.contains("[display]"));
}

#[test]
fn completions_are_generated() {
    let (dir, _media) = temp_media();
    cuemark(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cuemark"));
}
