//! Marker navigation relative to the playback position.

use crate::error::{MarkerError, Result};
use crate::store::{Marker, MarkerStore};

/// Seconds around the current position that do not count as "before" or
/// "after". Sitting on a marker and jumping backwards lands on the one
/// before it instead of the same marker again.
pub const NAVIGATION_EPSILON: f64 = 0.5;

/// Find the marker to jump to when going backwards from `current_time`.
///
/// Picks the latest marker strictly before `current_time - NAVIGATION_EPSILON`,
/// wrapping to the latest marker overall when there is none.
pub fn previous(store: &MarkerStore, current_time: f64) -> Result<Marker> {
    let threshold = current_time - NAVIGATION_EPSILON;
    store
        .by_time_ascending()
        .rev()
        .find(|m| m.time < threshold)
        .or_else(|| store.by_time_ascending().next_back())
        .copied()
        .ok_or(MarkerError::EmptyStore)
}

/// Find the marker to jump to when going forwards from `current_time`.
///
/// Picks the earliest marker strictly after `current_time + NAVIGATION_EPSILON`,
/// wrapping to the earliest marker overall when there is none.
pub fn next(store: &MarkerStore, current_time: f64) -> Result<Marker> {
    let threshold = current_time + NAVIGATION_EPSILON;
    store
        .by_time_ascending()
        .find(|m| m.time > threshold)
        .or_else(|| store.by_time_ascending().next())
        .copied()
        .ok_or(MarkerError::EmptyStore)
}
