use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use super::types::ResolvedPhoto;

/// Year -> month -> day count tree over a resolved photo batch.
///
/// Leaf counts are always positive: a (year, month, day) entry exists only
/// because at least one photo resolved to that day. Photos with an
/// undetermined date are not represented here at all; they remain visible
/// in the unfiltered gallery sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemporalIndex {
    years: BTreeMap<i32, YearNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct YearNode {
    months: BTreeMap<u32, MonthNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MonthNode {
    days: BTreeMap<u32, usize>,
}

impl TemporalIndex {
    /// Builds the tree in a single pass over the resolved batch. The result
    /// depends only on the input multiset, not its order.
    pub fn build(photos: &[ResolvedPhoto]) -> Self {
        let mut years: BTreeMap<i32, YearNode> = BTreeMap::new();

        for photo in photos {
            let (Some(year), Some(month), Some(day)) = (photo.year, photo.month, photo.day)
            else {
                continue;
            };
            *years
                .entry(year)
                .or_default()
                .months
                .entry(month)
                .or_default()
                .days
                .entry(day)
                .or_insert(0) += 1;
        }

        let index = Self { years };
        debug!(
            "built temporal index: {} dated photos across {} years",
            index.count_deep(),
            index.years.len()
        );
        index
    }

    /// Total photo count under the whole tree.
    pub fn count_deep(&self) -> usize {
        self.years.values().map(YearNode::count_deep).sum()
    }

    pub fn year(&self, year: i32) -> Option<&YearNode> {
        self.years.get(&year)
    }

    /// Years newest-first, the order the date picker lists them.
    pub fn years(&self) -> impl Iterator<Item = (i32, &YearNode)> {
        self.years.iter().rev().map(|(year, node)| (*year, node))
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl YearNode {
    /// Photo count for the whole year.
    pub fn count_deep(&self) -> usize {
        self.months.values().map(MonthNode::count_deep).sum()
    }

    pub fn month(&self, month: u32) -> Option<&MonthNode> {
        self.months.get(&month)
    }

    /// Months newest-first.
    pub fn months(&self) -> impl Iterator<Item = (u32, &MonthNode)> {
        self.months.iter().rev().map(|(month, node)| (*month, node))
    }
}

impl MonthNode {
    /// Photo count for the whole month.
    pub fn count_deep(&self) -> usize {
        self.days.values().sum()
    }

    pub fn day_count(&self, day: u32) -> Option<usize> {
        self.days.get(&day).copied()
    }

    /// Days newest-first with their leaf counts.
    pub fn days(&self) -> impl Iterator<Item = (u32, usize)> {
        self.days.iter().rev().map(|(day, count)| (*day, *count))
    }
}

/// English month name for the date picker, `None` outside 1-12.
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| m.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::types::Photo;

    fn resolved(filename: &str) -> ResolvedPhoto {
        ResolvedPhoto::from_photo(Photo {
            filename: filename.to_string(),
            url: format!("https://example.com/{filename}"),
            thumb_url: None,
            taken_at: None,
            id: None,
        })
    }

    fn sample_batch() -> Vec<ResolvedPhoto> {
        vec![
            resolved("2023-01-01.jpg"),
            resolved("2023-01-02.jpg"),
            resolved("2024-06-15.jpg"),
            resolved("no-date-here.jpg"),
        ]
    }

    #[test]
    fn build_counts_each_day() {
        let index = TemporalIndex::build(&sample_batch());

        let jan = index.year(2023).unwrap().month(1).unwrap();
        assert_eq!(jan.day_count(1), Some(1));
        assert_eq!(jan.day_count(2), Some(1));
        assert_eq!(
            index.year(2024).unwrap().month(6).unwrap().day_count(15),
            Some(1)
        );
    }

    #[test]
    fn undated_photos_are_excluded() {
        let index = TemporalIndex::build(&sample_batch());
        assert_eq!(index.count_deep(), 3);
    }

    #[test]
    fn count_deep_matches_subtree_totals() {
        let index = TemporalIndex::build(&sample_batch());
        assert_eq!(index.year(2023).unwrap().count_deep(), 2);
        assert_eq!(index.year(2024).unwrap().count_deep(), 1);
        assert_eq!(index.year(2023).unwrap().month(1).unwrap().count_deep(), 2);
    }

    #[test]
    fn build_is_order_independent() {
        let mut reversed = sample_batch();
        reversed.reverse();
        assert_eq!(
            TemporalIndex::build(&sample_batch()),
            TemporalIndex::build(&reversed)
        );
    }

    #[test]
    fn duplicate_days_accumulate() {
        let batch = vec![
            resolved("2023-01-01_a.jpg"),
            resolved("2023-01-01_b.jpg"),
            resolved("2023-01-01_c.jpg"),
        ];
        let index = TemporalIndex::build(&batch);
        assert_eq!(
            index.year(2023).unwrap().month(1).unwrap().day_count(1),
            Some(3)
        );
    }

    #[test]
    fn iteration_is_newest_first() {
        let index = TemporalIndex::build(&sample_batch());
        let years: Vec<i32> = index.years().map(|(y, _)| y).collect();
        assert_eq!(years, vec![2024, 2023]);

        let days: Vec<u32> = index
            .year(2023)
            .unwrap()
            .month(1)
            .unwrap()
            .days()
            .map(|(d, _)| d)
            .collect();
        assert_eq!(days, vec![2, 1]);
    }

    #[test]
    fn empty_batch_gives_empty_tree() {
        let index = TemporalIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.count_deep(), 0);
    }

    #[test]
    fn month_names_cover_the_valid_range() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn serializes_as_nested_count_maps() {
        let index = TemporalIndex::build(&sample_batch());
        let json = serde_json::to_value(&index).unwrap();
        assert_eq!(json["2023"]["1"]["2"], 1);
        assert_eq!(json["2024"]["6"]["15"], 1);
    }
}
