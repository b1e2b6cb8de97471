//! Backing document reader and writer.
//!
//! The backing document is an Advanced SubStation Alpha script so that any
//! subtitle renderer can show the markers on top of the video. Only the
//! `Dialogue:` records matter for round-tripping; the header is boilerplate.
//!
//! Reading is deliberately lenient: a line is considered only if it contains
//! the marker prefix, and a candidate that does not yield both a timestamp
//! and an id is recorded in the [`ParseReport`] and skipped.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::{MarkerError, Result};
use crate::store::{Marker, MarkerStore, MAX_MARKER_ID};
use crate::timecode::{decode_storage, encode_storage};

/// Number of comma-separated fields in an `[Events]` record.
const EVENT_FIELDS: usize = 10;

const SCRIPT_HEADER: &str = "[Script Info]
; Generated by cuemark
ScriptType: v4.00+
WrapStyle: 0
ScaledBorderAndShadow: yes
PlayResX: 1280
PlayResY: 720
";

const STYLES_AND_EVENTS_HEADER: &str = "
[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Sans,28,&H00FFFFFF,&H000000FF,&H00000000,&H80000000,0,0,0,0,100,100,0,0,1,2,1,7,20,20,20,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
";

/// How marker records are labelled and timed in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFormat {
    /// Label prefix, also used to recognise records when reading
    pub prefix: String,
    /// Seconds between a record's start and end timestamps
    pub display_duration: f64,
}

impl Default for RecordFormat {
    fn default() -> Self {
        Self {
            prefix: "Marker".to_string(),
            display_duration: 2.0,
        }
    }
}

/// Why a candidate line was not turned into a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than the ten event fields
    TooFewFields,
    /// Start field is not `H:MM:SS.CC`
    BadTimestamp,
    /// No positive integer follows the prefix in the text field
    MissingId,
    /// An earlier record already used this id
    DuplicateId,
}

/// A candidate line that was skipped while reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    pub reason: SkipReason,
    pub text: String,
}

/// Result of reading a backing document.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    /// Parsed markers, id ascending
    pub markers: Vec<Marker>,
    /// Candidate lines that were skipped
    pub skipped: Vec<SkippedLine>,
}

impl ParseReport {
    /// Build a store from the parsed markers.
    pub fn into_store(self) -> MarkerStore {
        MarkerStore::from_markers(self.markers)
    }
}

/// Render the whole store as a backing document.
///
/// # Arguments
/// * `store` - Markers to write, emitted in id order
/// * `format` - Prefix and display duration for each record
/// * `title` - Written to the script header (usually the media file name)
pub fn serialize(store: &MarkerStore, format: &RecordFormat, title: &str) -> String {
    let mut out = String::from(SCRIPT_HEADER);
    // A line break in the title would start a bogus header line
    let title: String = title
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    out.push_str(&format!("Title: {}\n", title));
    out.push_str(STYLES_AND_EVENTS_HEADER);

    for marker in store.by_id_ascending() {
        out.push_str(&format!(
            "Dialogue: 0,{},{},Default,,0,0,0,,{}\n",
            encode_storage(marker.time),
            encode_storage(marker.time + format.display_duration),
            marker.label(&format.prefix)
        ));
    }

    out
}

/// Write the store to a writer and return the number of records written.
pub fn write_to<W: Write>(
    store: &MarkerStore,
    format: &RecordFormat,
    title: &str,
    writer: &mut W,
) -> io::Result<usize> {
    writer.write_all(serialize(store, format, title).as_bytes())?;
    writer.flush()?;
    Ok(store.len())
}

/// Write the store to `path`, replacing any previous content.
pub fn save<P: AsRef<Path>>(
    path: P,
    store: &MarkerStore,
    format: &RecordFormat,
    title: &str,
) -> Result<usize> {
    let path = path.as_ref();
    let mut file = fs::File::create(path).map_err(|e| MarkerError::io(path, e))?;
    let count = write_to(store, format, title, &mut file).map_err(|e| MarkerError::io(path, e))?;
    tracing::info!(path = %path.display(), count, "Wrote marker document");
    Ok(count)
}

/// Delete the document at `path`.
///
/// Returns `false` when there was nothing to delete.
pub fn remove<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "Removed marker document");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(MarkerError::io(path, e)),
    }
}

/// Bring the document at `path` in line with the store.
///
/// A non-empty store is written out; an empty store removes the document.
/// Returns the number of records now on disk.
pub fn sync<P: AsRef<Path>>(
    path: P,
    store: &MarkerStore,
    format: &RecordFormat,
    title: &str,
) -> Result<usize> {
    if store.is_empty() {
        remove(path)?;
        Ok(0)
    } else {
        save(path, store, format, title)
    }
}

/// Read a backing document from `path`.
///
/// A missing file is an empty document, not an error.
pub fn load<P: AsRef<Path>>(path: P, prefix: &str) -> Result<ParseReport> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No marker document");
            return Ok(ParseReport::default());
        }
        Err(e) => return Err(MarkerError::io(path, e)),
    };

    let report = parse_str(&String::from_utf8_lossy(&bytes), prefix);
    tracing::info!(
        path = %path.display(),
        markers = report.markers.len(),
        skipped = report.skipped.len(),
        "Loaded marker document"
    );
    Ok(report)
}

/// Read a backing document from any reader.
///
/// Invalid UTF-8 is replaced rather than rejected so one damaged line does
/// not cost the rest of the document.
pub fn parse_reader<R: Read>(mut reader: R, prefix: &str) -> io::Result<ParseReport> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(parse_str(&String::from_utf8_lossy(&bytes), prefix))
}

/// Parse document text.
pub fn parse_str(text: &str, prefix: &str) -> ParseReport {
    let mut report = ParseReport::default();
    if prefix.is_empty() {
        return report;
    }
    let mut seen = HashSet::new();

    for (idx, line) in text.lines().enumerate() {
        if !line.contains(prefix) {
            continue;
        }

        let outcome = parse_record(line, prefix).and_then(|marker| {
            if seen.insert(marker.id) {
                Ok(marker)
            } else {
                Err(SkipReason::DuplicateId)
            }
        });

        match outcome {
            Ok(marker) => report.markers.push(marker),
            Err(reason) => {
                tracing::debug!(line = idx + 1, ?reason, "Skipping marker record");
                report.skipped.push(SkippedLine {
                    line: idx + 1,
                    reason,
                    text: line.to_string(),
                });
            }
        }
    }

    report.markers.sort_by_key(|m| m.id);
    report
}

/// Parse one `Dialogue:` record.
fn parse_record(line: &str, prefix: &str) -> std::result::Result<Marker, SkipReason> {
    let fields: Vec<&str> = line.splitn(EVENT_FIELDS, ',').collect();
    if fields.len() < EVENT_FIELDS {
        return Err(SkipReason::TooFewFields);
    }

    let time = decode_storage(fields[1]).map_err(|_| SkipReason::BadTimestamp)?;
    let id = parse_id(fields[EVENT_FIELDS - 1], prefix).ok_or(SkipReason::MissingId)?;
    Ok(Marker::new(id, time))
}

/// Extract the id that follows `prefix` in a record's text field.
///
/// Ids must lie in `1..=MAX_MARKER_ID`; anything else counts as missing.
fn parse_id(text: &str, prefix: &str) -> Option<u64> {
    let start = text.find(prefix)? + prefix.len();
    let rest = text[start..].trim_start();
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end]
        .parse::<u64>()
        .ok()
        .filter(|id| (1..=MAX_MARKER_ID).contains(id))
}
