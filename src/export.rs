//! Plain-text marker listing.
//!
//! Two `#` comment lines naming the media file, then one tab-separated line
//! per marker in id order: `id`, display timestamp, quoted label.

use std::fs;
use std::path::Path;

use crate::error::{MarkerError, Result};
use crate::store::MarkerStore;
use crate::timecode::encode_display;

/// Render the listing for `store`.
///
/// # Arguments
/// * `store` - Markers to list
/// * `media_name` - Media file name shown in the header
/// * `prefix` - Label prefix, same as in the backing document
///
/// # Returns
/// The listing text, or `NoMarkers` for an empty store
pub fn render_listing(store: &MarkerStore, media_name: &str, prefix: &str) -> Result<String> {
    if store.is_empty() {
        return Err(MarkerError::NoMarkers);
    }

    let mut out = format!("# Markers for {}\n# id\ttime\tlabel\n", media_name);
    for marker in store.by_id_ascending() {
        out.push_str(&format!(
            "{:02}\t{}\t\"{}\"\n",
            marker.id,
            encode_display(marker.time),
            marker.label(prefix)
        ));
    }
    Ok(out)
}

/// Render the listing and write it to `path`.
///
/// Returns the number of markers written. Nothing is written for an empty
/// store.
pub fn write_listing<P: AsRef<Path>>(
    path: P,
    store: &MarkerStore,
    media_name: &str,
    prefix: &str,
) -> Result<usize> {
    let path = path.as_ref();
    let listing = render_listing(store, media_name, prefix)?;
    fs::write(path, listing).map_err(|e| MarkerError::io(path, e))?;
    tracing::info!(path = %path.display(), count = store.len(), "Exported markers");
    Ok(store.len())
}
