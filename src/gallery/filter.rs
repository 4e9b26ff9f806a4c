use serde::Serialize;

use super::types::ResolvedPhoto;

/// The active year/month/day narrowing over the gallery view.
///
/// Fields cascade: a month is only meaningful under a selected year, a day
/// only under a selected month. Every mutator re-establishes that invariant
/// by clearing dependent fields instead of rejecting the assignment, so the
/// selection is always consistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn day(&self) -> Option<u32> {
        self.day
    }

    /// Selects a year, or clears the whole selection when `year` is already
    /// selected (toggle-off). Month and day are cleared either way.
    pub fn set_year(&mut self, year: i32) {
        if self.year == Some(year) {
            self.year = None;
        } else {
            self.year = Some(year);
        }
        self.month = None;
        self.day = None;
    }

    /// Selects a month with the same toggle-off rule, clearing the day and
    /// leaving the year untouched.
    pub fn set_month(&mut self, month: u32) {
        if self.month == Some(month) {
            self.month = None;
        } else {
            self.month = Some(month);
        }
        self.day = None;
        self.normalize();
    }

    /// Selects a day with the same toggle-off rule, leaving year and month
    /// untouched.
    pub fn set_day(&mut self, day: u32) {
        if self.day == Some(day) {
            self.day = None;
        } else {
            self.day = Some(day);
        }
        self.normalize();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Month requires year, day requires month; assignments that would
    /// violate this are corrected by dropping the dependent fields.
    fn normalize(&mut self) {
        if self.year.is_none() {
            self.month = None;
        }
        if self.month.is_none() {
            self.day = None;
        }
    }

    /// Normalization guarantees month/day imply year, so one check suffices.
    pub fn is_active(&self) -> bool {
        self.year.is_some()
    }

    /// True iff every selected field equals the photo's corresponding
    /// field. An empty selection matches everything, including undated
    /// photos.
    pub fn matches(&self, photo: &ResolvedPhoto) -> bool {
        self.year.is_none_or(|y| photo.year == Some(y))
            && self.month.is_none_or(|m| photo.month == Some(m))
            && self.day.is_none_or(|d| photo.day == Some(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::types::Photo;

    fn resolved(filename: &str) -> ResolvedPhoto {
        ResolvedPhoto::from_photo(Photo {
            filename: filename.to_string(),
            url: String::new(),
            thumb_url: None,
            taken_at: None,
            id: None,
        })
    }

    #[test]
    fn set_year_twice_clears_selection() {
        let mut filter = FilterSelection::new();
        filter.set_year(2023);
        assert_eq!(filter.year(), Some(2023));
        filter.set_year(2023);
        assert_eq!(filter, FilterSelection::default());
    }

    #[test]
    fn changing_year_clears_month_and_day() {
        let mut filter = FilterSelection::new();
        filter.set_year(2023);
        filter.set_month(5);
        filter.set_day(10);
        filter.set_year(2024);
        assert_eq!(filter.year(), Some(2024));
        assert_eq!(filter.month(), None);
        assert_eq!(filter.day(), None);
    }

    #[test]
    fn month_toggle_clears_day_and_keeps_year() {
        let mut filter = FilterSelection::new();
        filter.set_year(2023);
        filter.set_month(5);
        filter.set_day(10);
        filter.set_month(5);
        assert_eq!(filter.year(), Some(2023));
        assert_eq!(filter.month(), None);
        assert_eq!(filter.day(), None);
    }

    #[test]
    fn day_toggle_keeps_year_and_month() {
        let mut filter = FilterSelection::new();
        filter.set_year(2023);
        filter.set_month(5);
        filter.set_day(10);
        filter.set_day(10);
        assert_eq!(filter.year(), Some(2023));
        assert_eq!(filter.month(), Some(5));
        assert_eq!(filter.day(), None);
    }

    #[test]
    fn month_without_year_is_corrected_away() {
        let mut filter = FilterSelection::new();
        filter.set_month(5);
        assert_eq!(filter, FilterSelection::default());

        filter.set_day(10);
        assert_eq!(filter, FilterSelection::default());
    }

    #[test]
    fn reset_clears_everything() {
        let mut filter = FilterSelection::new();
        filter.set_year(2023);
        filter.set_month(5);
        filter.reset();
        assert!(!filter.is_active());
    }

    #[test]
    fn matches_constrains_only_selected_fields() {
        let photo = resolved("2023-05-10.jpg");
        let undated = resolved("no-date.jpg");

        let mut filter = FilterSelection::new();
        assert!(filter.matches(&photo));
        assert!(filter.matches(&undated));

        filter.set_year(2023);
        assert!(filter.matches(&photo));
        assert!(!filter.matches(&undated));

        filter.set_month(5);
        assert!(filter.matches(&photo));

        filter.set_day(11);
        assert!(!filter.matches(&photo));

        filter.set_year(2024);
        assert!(!filter.matches(&photo));
    }
}
