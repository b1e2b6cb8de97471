//! In-memory marker store.
//!
//! Markers live in an append-only arena (`Vec<Marker>`) in creation order.
//! The two orderings users care about, by id and by time, are index views
//! into that arena. They are built on first use and dropped on every
//! mutation, so readers never pay for a sort twice and writers never see a
//! stale view.

use std::cell::OnceCell;

use serde::Serialize;

use crate::error::{MarkerError, Result};

/// Highest id a marker can carry; one more must still fit in `next_id`.
pub const MAX_MARKER_ID: u64 = u64::MAX - 1;

/// A named point in time within a media file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    /// Sequence number, unique within a store and never reused
    pub id: u64,
    /// Offset into the media in seconds
    pub time: f64,
}

impl Marker {
    pub fn new(id: u64, time: f64) -> Self {
        Self { id, time }
    }

    /// Label shown to users and written to documents, e.g. `Marker 07`.
    pub fn label(&self, prefix: &str) -> String {
        format!("{} {:02}", prefix, self.id)
    }
}

/// Ordered collection of markers for one media file.
#[derive(Debug, Clone)]
pub struct MarkerStore {
    /// Arena in creation order
    markers: Vec<Marker>,
    /// Id handed to the next `add`
    next_id: u64,
    /// Arena indices sorted by id (lazy)
    by_id: OnceCell<Vec<usize>>,
    /// Arena indices sorted by time, then id (lazy)
    by_time: OnceCell<Vec<usize>>,
}

impl Default for MarkerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerStore {
    /// Create an empty store whose first marker will get id 1.
    pub fn new() -> Self {
        Self {
            markers: Vec::new(),
            next_id: 1,
            by_id: OnceCell::new(),
            by_time: OnceCell::new(),
        }
    }

    /// Create a store from previously persisted markers.
    pub fn from_markers(markers: Vec<Marker>) -> Self {
        let mut store = Self::new();
        store.load_replace(markers);
        store
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Id that the next `add` will assign.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Look up a marker by id.
    pub fn get(&self, id: u64) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// Add a marker at `time` and return it.
    ///
    /// Fails with `InvalidTime` for negative or non-finite times and with
    /// `IdsExhausted` once `MAX_MARKER_ID` has been handed out; the store is
    /// left untouched in both cases.
    pub fn add(&mut self, time: f64) -> Result<Marker> {
        if !time.is_finite() || time < 0.0 {
            return Err(MarkerError::InvalidTime(time));
        }
        if self.next_id > MAX_MARKER_ID {
            return Err(MarkerError::IdsExhausted);
        }

        let marker = Marker::new(self.next_id, time);
        self.markers.push(marker);
        self.next_id += 1;
        self.invalidate_views();
        Ok(marker)
    }

    /// Remove the marker with the highest id.
    ///
    /// Returns `None` when the store is empty. `next_id` is not decremented.
    pub fn remove_last(&mut self) -> Option<Marker> {
        let (idx, _) = self
            .markers
            .iter()
            .enumerate()
            .max_by_key(|(_, m)| m.id)?;
        let removed = self.markers.remove(idx);
        self.invalidate_views();
        Some(removed)
    }

    /// Remove every marker and return how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.markers.len();
        self.markers.clear();
        self.invalidate_views();
        count
    }

    /// Replace the whole collection with persisted markers.
    ///
    /// Markers are kept in id order; when an id occurs more than once only
    /// the first occurrence survives. Ids outside `1..=MAX_MARKER_ID` are
    /// dropped. `next_id` becomes one more than the highest id kept, or 1
    /// for an empty list.
    pub fn load_replace(&mut self, mut markers: Vec<Marker>) {
        let supplied = markers.len();
        markers.retain(|m| (1..=MAX_MARKER_ID).contains(&m.id));
        if markers.len() != supplied {
            tracing::warn!(
                dropped = supplied - markers.len(),
                "Dropped markers with out-of-range ids"
            );
        }

        markers.sort_by_key(|m| m.id);
        let before = markers.len();
        markers.dedup_by_key(|m| m.id);
        if markers.len() != before {
            tracing::debug!(
                dropped = before - markers.len(),
                "Dropped markers with duplicate ids"
            );
        }

        self.next_id = markers.last().map_or(1, |m| m.id + 1);
        self.markers = markers;
        self.invalidate_views();
    }

    /// Markers in creation order (id ascending).
    pub fn by_id_ascending(
        &self,
    ) -> impl DoubleEndedIterator<Item = &Marker> + ExactSizeIterator + '_ {
        self.id_view().iter().map(move |&idx| &self.markers[idx])
    }

    /// Markers in temporal order; equal times are ordered by id.
    pub fn by_time_ascending(
        &self,
    ) -> impl DoubleEndedIterator<Item = &Marker> + ExactSizeIterator + '_ {
        self.time_view().iter().map(move |&idx| &self.markers[idx])
    }

    fn id_view(&self) -> &[usize] {
        self.by_id.get_or_init(|| {
            let mut order: Vec<usize> = (0..self.markers.len()).collect();
            order.sort_by_key(|&idx| self.markers[idx].id);
            order
        })
    }

    fn time_view(&self) -> &[usize] {
        self.by_time.get_or_init(|| {
            let mut order: Vec<usize> = (0..self.markers.len()).collect();
            order.sort_by(|&a, &b| {
                let (a, b) = (&self.markers[a], &self.markers[b]);
                a.time.total_cmp(&b.time).then(a.id.cmp(&b.id))
            });
            order
        })
    }

    fn invalidate_views(&mut self) {
        self.by_id.take();
        self.by_time.take();
    }
}
