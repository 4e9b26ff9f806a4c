use std::cmp::Reverse;
use tracing::debug;

use super::filter::FilterSelection;
use super::types::{Photo, ResolvedPhoto};

/// Derives timestamps for a whole input batch, preserving input order.
pub fn resolve_batch(photos: &[Photo]) -> Vec<ResolvedPhoto> {
    let resolved: Vec<ResolvedPhoto> = photos
        .iter()
        .cloned()
        .map(ResolvedPhoto::from_photo)
        .collect();
    debug!(
        "resolved batch: {} of {} photos have a determinable date",
        resolved.iter().filter(|p| p.timestamp.is_some()).count(),
        resolved.len()
    );
    resolved
}

/// Stable newest-first sort. `None` orders below every real timestamp, so
/// undated photos sink to the bottom while ties keep their input order.
pub fn sort_newest_first(photos: &mut [ResolvedPhoto]) {
    photos.sort_by_key(|p| Reverse(p.timestamp));
}

/// The full query pipeline: resolve, sort newest-first, filter. The result
/// is the sequence the viewer indexes into.
pub fn query(photos: &[Photo], filter: &FilterSelection) -> Vec<ResolvedPhoto> {
    let mut resolved = resolve_batch(photos);
    sort_newest_first(&mut resolved);
    resolved.retain(|p| filter.matches(p));
    resolved
}
