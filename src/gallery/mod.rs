// Gallery module - batch state and its derived, memoized views
mod error;
mod filter;
mod index;
mod query;
mod resolver;
mod types;

pub use error::GalleryError;
pub use filter::FilterSelection;
pub use index::{MonthNode, TemporalIndex, YearNode, month_name};
pub use query::{query, resolve_batch, sort_newest_first};
pub use resolver::resolve;
pub use types::{Photo, ResolvedPhoto};

use tracing::info;

/// Owns the current photo batch and every view derived from it.
///
/// Derivations (resolved list, temporal index, filtered sequence) are pure
/// functions of the batch and the filter selection. They are recomputed
/// exactly when one of those inputs changes and served from fields
/// otherwise, so repeated reads are free. All operations are synchronous;
/// the async fetch boundary lives in [`crate::provider`].
#[derive(Debug, Default)]
pub struct Gallery {
    photos: Vec<Photo>,
    /// Resolved batch, already sorted newest-first.
    resolved: Vec<ResolvedPhoto>,
    index: TemporalIndex,
    filter: FilterSelection,
    /// Memoized query output for the current batch + filter.
    filtered: Vec<ResolvedPhoto>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the input batch and re-derives every view. The filter
    /// selection is kept; the viewer, if open, must be closed or reopened
    /// by the caller since the filtered sequence changes identity.
    pub fn set_photos(&mut self, photos: Vec<Photo>) {
        info!("loading batch of {} photos", photos.len());
        self.photos = photos;
        self.resolved = query::resolve_batch(&self.photos);
        query::sort_newest_first(&mut self.resolved);
        self.index = TemporalIndex::build(&self.resolved);
        self.refresh_filtered();
    }

    fn refresh_filtered(&mut self) {
        self.filtered = self
            .resolved
            .iter()
            .filter(|p| self.filter.matches(p))
            .cloned()
            .collect();
    }

    pub fn select_year(&mut self, year: i32) {
        self.filter.set_year(year);
        self.refresh_filtered();
    }

    pub fn select_month(&mut self, month: u32) {
        self.filter.set_month(month);
        self.refresh_filtered();
    }

    pub fn select_day(&mut self, day: u32) {
        self.filter.set_day(day);
        self.refresh_filtered();
    }

    pub fn reset_filter(&mut self) {
        self.filter.reset();
        self.refresh_filtered();
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// The date picker tree with per-node counts.
    pub fn index(&self) -> &TemporalIndex {
        &self.index
    }

    pub fn filter(&self) -> &FilterSelection {
        &self.filter
    }

    /// The current filtered sequence, newest-first. This is what the grid
    /// renders and what the viewer indexes into.
    pub fn filtered(&self) -> &[ResolvedPhoto] {
        &self.filtered
    }

    /// True when the current filter matches nothing; the renderer shows an
    /// explicit empty-state message for this.
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }
}
