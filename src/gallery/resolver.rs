use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Midday keeps filename-only dates inside the matched calendar day in
/// every timezone the renderer might display them in.
const DEFAULT_HOUR: u32 = 12;

/// Year 1900-2099, then month and day, each pair optionally separated by
/// `-` or `_`, optionally followed by hour/minute(/second) the same way.
static FILENAME_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(19\d{2}|20\d{2})[-_]?(\d{2})[-_]?(\d{2})(?:[-_](\d{2})[-_]?(\d{2})(?:[-_]?(\d{2}))?)?",
    )
    .expect("filename date pattern is valid")
});

/// Derives the canonical timestamp for a photo.
///
/// An explicit `taken_at` value wins when it parses; an unparseable or
/// absent value falls through to the filename pattern. This is the expected
/// path for records without usable metadata, not an error, so the only
/// failure signal is `None`.
pub fn resolve(taken_at: Option<&str>, filename: &str) -> Option<DateTime<Utc>> {
    if let Some(raw) = taken_at {
        if let Some(timestamp) = parse_taken_at(raw) {
            return Some(timestamp);
        }
        trace!("unparseable takenAt {raw:?}, trying filename {filename:?}");
    }
    parse_filename(filename)
}

fn parse_taken_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    // Naive datetime variants seen in the wild, interpreted as UTC
    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y:%m:%d %H:%M:%S",
    ];
    for format in &datetime_formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }

    // Date-only variants, taken at midnight UTC
    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%Y:%m:%d"];
    for format in &date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }

    None
}

fn parse_filename(filename: &str) -> Option<DateTime<Utc>> {
    let caps = FILENAME_DATE.captures(filename)?;

    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    let hour: u32 = match caps.get(4) {
        Some(m) => m.as_str().parse().ok()?,
        None => DEFAULT_HOUR,
    };
    let minute: u32 = match caps.get(5) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    let second: u32 = match caps.get(6) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    // Calendar validation rejects month 13, Feb 30, hour 25 and friends
    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    Some(DateTime::from_naive_utc_and_offset(naive, Utc))
}
