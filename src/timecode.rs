//! Conversions between seconds and the two textual timestamp formats.
//!
//! - Storage format `H:MM:SS.CC` (centiseconds) is what the backing document carries.
//! - Display format `MM:SS.mmm` / `H:MM:SS.mmm` (milliseconds) is what users see.
//!
//! Both encoders truncate rather than round.

use crate::error::{MarkerError, Result};

/// Slack added before truncation so that values such as `12.34`, which are
/// stored as `12.339999...`, still land on their intended unit.
const TRUNCATION_SLACK: f64 = 1e-6;

/// Split seconds into whole units of `1 / per_second` seconds, truncating.
fn whole_units(seconds: f64, per_second: u64) -> u64 {
    let scaled = seconds.max(0.0) * per_second as f64;
    (scaled + TRUNCATION_SLACK).floor() as u64
}

/// Format seconds as a storage timestamp.
///
/// Negative or NaN input is treated as zero.
///
/// # Arguments
/// * `seconds` - Offset into the media in seconds
///
/// # Returns
/// A string in `H:MM:SS.CC` format, hours unbounded
pub fn encode_storage(seconds: f64) -> String {
    let centis = whole_units(seconds, 100);
    let total_secs = centis / 100;
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    format!("{}:{:02}:{:02}.{:02}", hours, mins, secs, centis % 100)
}

/// Format seconds as a display timestamp.
///
/// The hour field is omitted when it is zero.
///
/// # Arguments
/// * `seconds` - Offset into the media in seconds
///
/// # Returns
/// A string in `MM:SS.mmm` or `H:MM:SS.mmm` format
pub fn encode_display(seconds: f64) -> String {
    let millis = whole_units(seconds, 1000);
    let total_secs = millis / 1000;
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours == 0 {
        format!("{:02}:{:02}.{:03}", mins, secs, millis % 1000)
    } else {
        format!("{}:{:02}:{:02}.{:03}", hours, mins, secs, millis % 1000)
    }
}

/// Parse a storage timestamp (`H:MM:SS.CC`) back into seconds.
///
/// All four groups must be present and consist only of ASCII digits.
/// The fractional group is read as a decimal fraction, so `.5` and `.50`
/// both mean half a second. Values too large to represent are rejected.
pub fn decode_storage(text: &str) -> Result<f64> {
    let invalid = || MarkerError::InvalidTimestamp(text.to_string());
    let trimmed = text.trim();

    let (hours, rest) = trimmed.split_once(':').ok_or_else(invalid)?;
    let (mins, rest) = rest.split_once(':').ok_or_else(invalid)?;
    let (secs, frac) = rest.split_once('.').ok_or_else(invalid)?;

    let hours = parse_digits(hours).ok_or_else(invalid)?;
    let mins = parse_digits(mins).ok_or_else(invalid)?;
    let secs = parse_digits(secs).ok_or_else(invalid)?;
    // Nine fractional digits is already nanoseconds
    if frac.len() > 9 {
        return Err(invalid());
    }
    let frac_value = parse_digits(frac).ok_or_else(invalid)?;

    let scale = 10u64.pow(frac.len() as u32);
    let scaled = hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(mins.checked_mul(60)?))
        .and_then(|hm| hm.checked_add(secs))
        .and_then(|whole| whole.checked_mul(scale))
        .and_then(|whole| whole.checked_add(frac_value))
        .ok_or_else(invalid)?;
    Ok(scaled as f64 / scale as f64)
}

/// Parse a user-supplied playback position.
///
/// Accepts plain seconds (`12.5`) or colon-separated forms such as
/// `1:02.5`, `0:01:02.50` and `01:02.500`.
pub fn parse_position(text: &str) -> Result<f64> {
    let invalid = || MarkerError::InvalidTimestamp(text.to_string());
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() > 3 {
        return Err(invalid());
    }

    let (last, leading) = parts.split_last().ok_or_else(invalid)?;
    let secs: f64 = last.parse().map_err(|_| invalid())?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(invalid());
    }

    let mut total = 0u64;
    for part in leading {
        let value = parse_digits(part).ok_or_else(invalid)?;
        total = total
            .checked_mul(60)
            .and_then(|t| t.checked_add(value))
            .ok_or_else(invalid)?;
    }
    Ok(total as f64 * 60.0 + secs)
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
